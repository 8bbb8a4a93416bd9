use serde::{Deserialize, Serialize};

/// A first-order term: either a variable or an application of a function
/// symbol to zero or more argument terms. A zero-arity application is a
/// constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Term {
    Var(String),
    App(String, Vec<Term>),
}

impl Term {
    /// Build a 0-ary function application, i.e. a constant.
    pub fn constant(symbol: impl Into<String>) -> Term {
        Term::App(symbol.into(), Vec::new())
    }

    pub fn var(name: impl Into<String>) -> Term {
        Term::Var(name.into())
    }

    /// True if no variable occurs anywhere in this term.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::App(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// True if this is a 0-ary function application.
    pub fn is_constant(&self) -> bool {
        matches!(self, Term::App(_, args) if args.is_empty())
    }

    /// Capture-avoiding substitution of `variable` by `replacement`.
    /// Since constants and function symbols are never bound, plain recursive
    /// substitution is already capture-avoiding here: no term constructor
    /// introduces a new binder.
    pub fn substitute(&self, variable: &str, replacement: &Term) -> Term {
        match self {
            Term::Var(name) => {
                if name == variable {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Term::App(symbol, args) => Term::App(
                symbol.clone(),
                args.iter().map(|a| a.substitute(variable, replacement)).collect(),
            ),
        }
    }

    /// Append every ground 0-ary function symbol occurring in this term to `out`.
    pub fn collect_constants(&self, out: &mut Vec<String>) {
        match self {
            Term::Var(_) => {}
            Term::App(symbol, args) => {
                if args.is_empty() {
                    if !out.iter().any(|c| c == symbol) {
                        out.push(symbol.clone());
                    }
                } else {
                    for a in args {
                        a.collect_constants(out);
                    }
                }
            }
        }
    }

    pub fn display_string(&self) -> String {
        match self {
            Term::Var(name) => name.clone(),
            Term::App(symbol, args) => {
                if args.is_empty() {
                    symbol.clone()
                } else {
                    let rendered: Vec<String> = args.iter().map(Term::display_string).collect();
                    format!("{}({})", symbol, rendered.join(", "))
                }
            }
        }
    }
}

/// Lexical convention used by the parser (and respected by this module for
/// programmatic term construction): identifiers beginning with one of
/// `u v w x y z` (case-sensitive, optionally followed by digits or primes)
/// denote variables; every other identifier denotes a function symbol.
pub fn looks_like_variable(identifier: &str) -> bool {
    matches!(identifier.chars().next(), Some('u' | 'v' | 'w' | 'x' | 'y' | 'z'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_detection() {
        assert!(Term::constant("a").is_ground());
        assert!(!Term::var("x").is_ground());
        assert!(!Term::App("f".into(), vec![Term::var("x")]).is_ground());
        assert!(Term::App("f".into(), vec![Term::constant("a")]).is_ground());
    }

    #[test]
    fn substitution_replaces_matching_variable_only() {
        let t = Term::App("f".into(), vec![Term::var("x"), Term::var("y")]);
        let out = t.substitute("x", &Term::constant("a"));
        assert_eq!(out, Term::App("f".into(), vec![Term::constant("a"), Term::var("y")]));
    }

    #[test]
    fn collect_constants_dedups_and_recurses() {
        let t = Term::App("f".into(), vec![Term::constant("a"), Term::App("g".into(), vec![Term::constant("a"), Term::constant("b")])]);
        let mut out = Vec::new();
        t.collect_constants(&mut out);
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn variable_lexical_convention() {
        assert!(looks_like_variable("x"));
        assert!(looks_like_variable("x1"));
        assert!(!looks_like_variable("a"));
        assert!(!looks_like_variable("P"));
    }
}
