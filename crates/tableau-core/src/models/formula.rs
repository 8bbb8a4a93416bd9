use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::term::Term;

/// Discriminator mirroring the formula's syntactic shape, independent of sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    Atom,
    Not,
    And,
    Or,
    Imp,
    Iff,
    Forall,
    Exists,
    True,
    False,
}

/// A first-order classical logic formula. Nodes are structurally immutable:
/// every transformation (substitution, normalization, rule application)
/// produces a new tree rather than mutating an existing one, so the same
/// node can be referenced from many tableau branches at once without
/// aliasing hazards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Formula {
    Atom(String, Vec<Term>),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Forall(String, Box<Formula>),
    Exists(String, Box<Formula>),
    True,
    False,
}

impl Formula {
    pub fn atom(name: impl Into<String>, args: Vec<Term>) -> Formula {
        Formula::Atom(name.into(), args)
    }

    pub fn prop(name: impl Into<String>) -> Formula {
        Formula::Atom(name.into(), Vec::new())
    }

    pub fn kind(&self) -> FormulaKind {
        match self {
            Formula::Atom(_, _) => FormulaKind::Atom,
            Formula::Not(_) => FormulaKind::Not,
            Formula::And(_, _) => FormulaKind::And,
            Formula::Or(_, _) => FormulaKind::Or,
            Formula::Implies(_, _) => FormulaKind::Imp,
            Formula::Iff(_, _) => FormulaKind::Iff,
            Formula::Forall(_, _) => FormulaKind::Forall,
            Formula::Exists(_, _) => FormulaKind::Exists,
            Formula::True => FormulaKind::True,
            Formula::False => FormulaKind::False,
        }
    }

    /// The single operand of a unary connective (`Not`).
    pub fn operand(&self) -> Option<&Formula> {
        match self {
            Formula::Not(inner) => Some(inner),
            _ => None,
        }
    }

    /// The left operand of a binary connective.
    pub fn operand1(&self) -> Option<&Formula> {
        match self {
            Formula::And(l, _) | Formula::Or(l, _) | Formula::Implies(l, _) | Formula::Iff(l, _) => Some(l),
            _ => None,
        }
    }

    /// The right operand of a binary connective.
    pub fn operand2(&self) -> Option<&Formula> {
        match self {
            Formula::And(_, r) | Formula::Or(_, r) | Formula::Implies(_, r) | Formula::Iff(_, r) => Some(r),
            _ => None,
        }
    }

    pub fn bound_variable(&self) -> Option<&str> {
        match self {
            Formula::Forall(v, _) | Formula::Exists(v, _) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Formula> {
        match self {
            Formula::Forall(_, b) | Formula::Exists(_, b) => Some(b),
            _ => None,
        }
    }

    /// Capture-avoiding substitution of every free occurrence of `variable`
    /// by `term`. Since `term` is always ground in this prover (quantifier
    /// instantiation only ever substitutes a constant), there is no term
    /// variable that could be captured by a binder encountered during the
    /// walk, so the only subtlety is shadowing: a nested quantifier that
    /// rebinds the same name stops the substitution from descending further.
    pub fn instantiate(&self, variable: &str, term: &Term) -> Formula {
        match self {
            Formula::Atom(name, args) => {
                Formula::Atom(name.clone(), args.iter().map(|a| a.substitute(variable, term)).collect())
            }
            Formula::Not(inner) => Formula::Not(Box::new(inner.instantiate(variable, term))),
            Formula::And(l, r) => Formula::And(
                Box::new(l.instantiate(variable, term)),
                Box::new(r.instantiate(variable, term)),
            ),
            Formula::Or(l, r) => Formula::Or(
                Box::new(l.instantiate(variable, term)),
                Box::new(r.instantiate(variable, term)),
            ),
            Formula::Implies(l, r) => Formula::Implies(
                Box::new(l.instantiate(variable, term)),
                Box::new(r.instantiate(variable, term)),
            ),
            Formula::Iff(l, r) => Formula::Iff(
                Box::new(l.instantiate(variable, term)),
                Box::new(r.instantiate(variable, term)),
            ),
            Formula::Forall(v, body) => {
                if v == variable {
                    self.clone()
                } else {
                    Formula::Forall(v.clone(), Box::new(body.instantiate(variable, term)))
                }
            }
            Formula::Exists(v, body) => {
                if v == variable {
                    self.clone()
                } else {
                    Formula::Exists(v.clone(), Box::new(body.instantiate(variable, term)))
                }
            }
            Formula::True => Formula::True,
            Formula::False => Formula::False,
        }
    }

    /// Eliminate every biconditional, rewriting `A <-> B` as `(A -> B) & (B -> A)`.
    pub fn release_iff(&self) -> Formula {
        match self {
            Formula::Atom(_, _) | Formula::True | Formula::False => self.clone(),
            Formula::Not(inner) => Formula::Not(Box::new(inner.release_iff())),
            Formula::And(l, r) => Formula::And(Box::new(l.release_iff()), Box::new(r.release_iff())),
            Formula::Or(l, r) => Formula::Or(Box::new(l.release_iff()), Box::new(r.release_iff())),
            Formula::Implies(l, r) => Formula::Implies(Box::new(l.release_iff()), Box::new(r.release_iff())),
            Formula::Iff(l, r) => {
                let l = l.release_iff();
                let r = r.release_iff();
                Formula::And(
                    Box::new(Formula::Implies(Box::new(l.clone()), Box::new(r.clone()))),
                    Box::new(Formula::Implies(Box::new(r), Box::new(l))),
                )
            }
            Formula::Forall(v, body) => Formula::Forall(v.clone(), Box::new(body.release_iff())),
            Formula::Exists(v, body) => Formula::Exists(v.clone(), Box::new(body.release_iff())),
        }
    }

    /// Simplify away `True`/`False` subformulas wherever their absorption or
    /// identity laws apply, working bottom-up so a simplification performed
    /// on a child can enable one at the parent.
    pub fn absorb_constants(&self) -> Formula {
        match self {
            Formula::Atom(_, _) | Formula::True | Formula::False => self.clone(),
            Formula::Not(inner) => match inner.absorb_constants() {
                Formula::True => Formula::False,
                Formula::False => Formula::True,
                other => Formula::Not(Box::new(other)),
            },
            Formula::And(l, r) => {
                let (l, r) = (l.absorb_constants(), r.absorb_constants());
                match (l, r) {
                    (Formula::False, _) | (_, Formula::False) => Formula::False,
                    (Formula::True, x) | (x, Formula::True) => x,
                    (l, r) => Formula::And(Box::new(l), Box::new(r)),
                }
            }
            Formula::Or(l, r) => {
                let (l, r) = (l.absorb_constants(), r.absorb_constants());
                match (l, r) {
                    (Formula::True, _) | (_, Formula::True) => Formula::True,
                    (Formula::False, x) | (x, Formula::False) => x,
                    (l, r) => Formula::Or(Box::new(l), Box::new(r)),
                }
            }
            Formula::Implies(l, r) => {
                let (l, r) = (l.absorb_constants(), r.absorb_constants());
                match (l, r) {
                    (Formula::False, _) => Formula::True,
                    (_, Formula::True) => Formula::True,
                    (Formula::True, r) => r,
                    (l, Formula::False) => Formula::Not(Box::new(l)),
                    (l, r) => Formula::Implies(Box::new(l), Box::new(r)),
                }
            }
            Formula::Iff(l, r) => {
                let (l, r) = (l.absorb_constants(), r.absorb_constants());
                match (l, r) {
                    (Formula::False, Formula::False) => Formula::True,
                    (Formula::True, r) => r,
                    (l, Formula::True) => l,
                    (Formula::False, r) => Formula::Not(Box::new(r)).absorb_constants(),
                    (l, Formula::False) => Formula::Not(Box::new(l)).absorb_constants(),
                    (l, r) => Formula::Iff(Box::new(l), Box::new(r)),
                }
            }
            Formula::Forall(v, body) => match body.absorb_constants() {
                Formula::True => Formula::True,
                Formula::False => Formula::False,
                other => Formula::Forall(v.clone(), Box::new(other)),
            },
            Formula::Exists(v, body) => match body.absorb_constants() {
                Formula::True => Formula::True,
                Formula::False => Formula::False,
                other => Formula::Exists(v.clone(), Box::new(other)),
            },
        }
    }

    /// Rewrite a degenerate `True` result into a disjunction that is
    /// trivially true yet not itself a `True` node, so that F-signing it
    /// remains the usual "assume the negation, close every branch" search
    /// rather than a special case. `A v ~A` for an atom absent from
    /// `context` (normally the pre-normalization input) satisfies this.
    pub fn trivial_tautology(context: &Formula) -> Formula {
        let atom = context.fresh_atom_name();
        Formula::Or(
            Box::new(Formula::prop(atom.clone())),
            Box::new(Formula::Not(Box::new(Formula::prop(atom)))),
        )
    }

    /// Dual of [`trivial_tautology`] for a degenerate `False` result.
    pub fn trivial_contradiction(context: &Formula) -> Formula {
        let atom = context.fresh_atom_name();
        Formula::And(
            Box::new(Formula::prop(atom.clone())),
            Box::new(Formula::Not(Box::new(Formula::prop(atom)))),
        )
    }

    fn fresh_atom_name(&self) -> String {
        let used = self.atom_names();
        let mut n = 0usize;
        loop {
            let candidate = format!("Z{}", n);
            if !used.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn atom_names(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        self.collect_atom_names(&mut out);
        out
    }

    fn collect_atom_names(&self, out: &mut HashSet<String>) {
        match self {
            Formula::Atom(name, _) => {
                out.insert(name.clone());
            }
            Formula::Not(inner) => inner.collect_atom_names(out),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
                l.collect_atom_names(out);
                r.collect_atom_names(out);
            }
            Formula::Forall(_, b) | Formula::Exists(_, b) => b.collect_atom_names(out),
            Formula::True | Formula::False => {}
        }
    }

    /// Append every ground 0-ary function symbol appearing anywhere in this
    /// formula's atoms to `out`, without duplicates.
    pub fn collect_constants(&self, out: &mut Vec<String>) {
        match self {
            Formula::Atom(_, args) => {
                for a in args {
                    a.collect_constants(out);
                }
            }
            Formula::Not(inner) => inner.collect_constants(out),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
                l.collect_constants(out);
                r.collect_constants(out);
            }
            Formula::Forall(_, b) | Formula::Exists(_, b) => b.collect_constants(out),
            Formula::True | Formula::False => {}
        }
    }

    pub fn equals(&self, other: &Formula) -> bool {
        self == other
    }

    /// Human-readable rendering used in trace output and diagnostics.
    pub fn display_string(&self) -> String {
        match self {
            Formula::Atom(name, args) => {
                if args.is_empty() {
                    name.clone()
                } else {
                    let rendered: Vec<String> = args.iter().map(Term::display_string).collect();
                    format!("{}({})", name, rendered.join(", "))
                }
            }
            Formula::Not(inner) => {
                if inner.needs_parens_as_not_operand() {
                    format!("~({})", inner.display_string())
                } else {
                    format!("~{}", inner.display_string())
                }
            }
            Formula::And(l, r) => format!("{} & {}", Self::maybe_paren(l, self, true), Self::maybe_paren(r, self, false)),
            Formula::Or(l, r) => format!("{} | {}", Self::maybe_paren(l, self, true), Self::maybe_paren(r, self, false)),
            Formula::Implies(l, r) => {
                format!("{} -> {}", Self::maybe_paren(l, self, true), Self::maybe_paren(r, self, false))
            }
            Formula::Iff(l, r) => {
                format!("{} <-> {}", Self::maybe_paren(l, self, true), Self::maybe_paren(r, self, false))
            }
            Formula::Forall(v, body) => format!("forall {}. {}", v, body.display_string()),
            Formula::Exists(v, body) => format!("exists {}. {}", v, body.display_string()),
            Formula::True => "true".to_string(),
            Formula::False => "false".to_string(),
        }
    }

    fn needs_parens_as_not_operand(&self) -> bool {
        !matches!(self, Formula::Atom(_, _) | Formula::Not(_) | Formula::True | Formula::False)
    }

    /// Operator precedence used by both the display printer and the parser;
    /// quantifiers sit below every binary connective so a quantified operand
    /// is always parenthesized — otherwise its body would greedily swallow
    /// whatever follows and a printed formula would not reparse to itself.
    fn precedence(&self) -> u8 {
        match self {
            Formula::Atom(_, _) | Formula::True | Formula::False => 6,
            Formula::Not(_) => 5,
            Formula::And(_, _) => 4,
            Formula::Or(_, _) => 3,
            Formula::Implies(_, _) => 2,
            Formula::Iff(_, _) => 1,
            Formula::Forall(_, _) | Formula::Exists(_, _) => 0,
        }
    }

    fn maybe_paren(inner: &Formula, outer: &Formula, is_left: bool) -> String {
        let inner_prec = inner.precedence();
        let outer_prec = outer.precedence();
        // The parser only ever builds left-associated trees, so a right
        // operand at the same precedence as its parent needs parens to
        // round-trip regardless of which binary connective it is.
        let needs_parens = inner_prec < outer_prec || (inner_prec == outer_prec && !is_left);
        if needs_parens {
            format!("({})", inner.display_string())
        } else {
            inner.display_string()
        }
    }
}

const MAX_PARSE_DEPTH: usize = 100;

/// Recursive-descent parser for the ASCII surface syntax. Precedence
/// climbs biconditional -> implication -> disjunction -> conjunction ->
/// negation -> quantifier -> atom, matching [`Formula::precedence`].
pub struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error at position {}: {}", self.position, self.message)
    }
}

impl<'a> FormulaParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, depth: 0 }
    }

    fn enter_depth(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(ParseError {
                message: format!("formula too deeply nested (max {} levels)", MAX_PARSE_DEPTH),
                position: self.pos,
            });
        }
        Ok(())
    }

    fn exit_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn parse(&mut self) -> Result<Formula, ParseError> {
        self.skip_whitespace();
        let result = self.parse_biconditional()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(ParseError {
                message: format!("unexpected character: '{}'", self.current_char().unwrap()),
                position: self.pos,
            });
        }
        Ok(result)
    }

    fn parse_biconditional(&mut self) -> Result<Formula, ParseError> {
        let mut left = self.parse_implication()?;
        self.skip_whitespace();
        while self.matches("<->") || self.matches("<=>") || self.matches("≡") {
            self.enter_depth()?;
            let right = self.parse_implication()?;
            left = Formula::Iff(Box::new(left), Box::new(right));
            self.exit_depth();
            self.skip_whitespace();
        }
        Ok(left)
    }

    fn parse_implication(&mut self) -> Result<Formula, ParseError> {
        let mut left = self.parse_disjunction()?;
        self.skip_whitespace();
        while self.matches("->") || self.matches("=>") || self.matches("⊃") {
            self.enter_depth()?;
            let right = self.parse_implication()?; // right associative
            left = Formula::Implies(Box::new(left), Box::new(right));
            self.exit_depth();
            self.skip_whitespace();
        }
        Ok(left)
    }

    fn parse_disjunction(&mut self) -> Result<Formula, ParseError> {
        let mut left = self.parse_conjunction()?;
        self.skip_whitespace();
        while self.matches("||") || self.matches("|") || self.matches("∨") || self.matches_keyword("or") {
            self.enter_depth()?;
            let right = self.parse_conjunction()?;
            left = Formula::Or(Box::new(left), Box::new(right));
            self.exit_depth();
            self.skip_whitespace();
        }
        Ok(left)
    }

    fn parse_conjunction(&mut self) -> Result<Formula, ParseError> {
        let mut left = self.parse_negation()?;
        self.skip_whitespace();
        while self.matches("&&") || self.matches("&") || self.matches("∧") || self.matches_keyword("and") {
            self.enter_depth()?;
            let right = self.parse_negation()?;
            left = Formula::And(Box::new(left), Box::new(right));
            self.exit_depth();
            self.skip_whitespace();
        }
        Ok(left)
    }

    fn parse_negation(&mut self) -> Result<Formula, ParseError> {
        self.skip_whitespace();
        if self.matches("~") || self.matches("!") || self.matches("¬") || self.matches_keyword("not") {
            self.enter_depth()?;
            let inner = self.parse_negation()?;
            self.exit_depth();
            Ok(Formula::Not(Box::new(inner)))
        } else {
            self.parse_quantifier()
        }
    }

    fn parse_quantifier(&mut self) -> Result<Formula, ParseError> {
        self.skip_whitespace();
        if self.matches("forall") || self.matches("∀") {
            self.enter_depth()?;
            let v = self.parse_identifier()?;
            self.skip_whitespace();
            self.matches("."); // optional separator
            let body = self.parse_negation()?;
            self.exit_depth();
            return Ok(Formula::Forall(v, Box::new(body)));
        }
        if self.matches("exists") || self.matches("∃") {
            self.enter_depth()?;
            let v = self.parse_identifier()?;
            self.skip_whitespace();
            self.matches(".");
            let body = self.parse_negation()?;
            self.exit_depth();
            return Ok(Formula::Exists(v, Box::new(body)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Formula, ParseError> {
        self.skip_whitespace();

        if self.matches_keyword("true") || self.matches("⊤") {
            return Ok(Formula::True);
        }
        if self.matches_keyword("false") || self.matches("⊥") || self.matches("_|_") {
            return Ok(Formula::False);
        }

        if self.matches("(") {
            self.enter_depth()?;
            let inner = self.parse_biconditional()?;
            self.skip_whitespace();
            if !self.matches(")") {
                return Err(ParseError { message: "expected closing parenthesis ')'".to_string(), position: self.pos });
            }
            self.exit_depth();
            return Ok(inner);
        }

        let name = self.parse_identifier()?;
        self.skip_whitespace();
        if self.matches("(") {
            let args = self.parse_term_list()?;
            if !self.matches(")") {
                return Err(ParseError { message: "expected closing parenthesis ')' after arguments".to_string(), position: self.pos });
            }
            Ok(Formula::Atom(name, args))
        } else {
            Ok(Formula::Atom(name, Vec::new()))
        }
    }

    fn parse_term_list(&mut self) -> Result<Vec<Term>, ParseError> {
        let mut terms = Vec::new();
        self.skip_whitespace();
        if self.peek_char() == Some(')') {
            return Ok(terms);
        }
        loop {
            terms.push(self.parse_term()?);
            self.skip_whitespace();
            if self.matches(",") {
                continue;
            }
            break;
        }
        Ok(terms)
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        self.skip_whitespace();
        let name = self.parse_identifier()?;
        self.skip_whitespace();
        if self.matches("(") {
            let args = self.parse_term_list()?;
            if !self.matches(")") {
                return Err(ParseError { message: "expected closing parenthesis ')' in term".to_string(), position: self.pos });
            }
            Ok(Term::App(name, args))
        } else if crate::models::term::looks_like_variable(&name) {
            Ok(Term::Var(name))
        } else {
            Ok(Term::App(name, Vec::new()))
        }
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.current_char() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '\'' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(ParseError { message: "expected identifier".to_string(), position: self.pos });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self) -> Option<char> {
        self.current_char()
    }

    fn matches(&mut self, s: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Like [`matches`] but requires a word boundary after the keyword, so
    /// e.g. `"forallx"` does not get mis-lexed as `forall` applied to `x`.
    fn matches_keyword(&mut self, kw: &str) -> bool {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        if !rest.starts_with(kw) {
            return false;
        }
        let after = rest[kw.len()..].chars().next();
        if after.map(|c| c.is_ascii_alphanumeric() || c == '_').unwrap_or(false) {
            return false;
        }
        self.pos += kw.len();
        true
    }
}

impl Formula {
    pub fn parse(input: &str) -> Result<Formula, ParseError> {
        if input.chars().count() > 10000 {
            return Err(ParseError { message: "formula too long (max 10000 chars)".to_string(), position: 0 });
        }
        let mut parser = FormulaParser::new(input);
        parser.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_propositional_atom() {
        let f = Formula::parse("P").unwrap();
        assert_eq!(f, Formula::prop("P"));
    }

    #[test]
    fn parse_negation_and_conjunction() {
        let f = Formula::parse("~P & Q").unwrap();
        assert_eq!(f, Formula::And(Box::new(Formula::Not(Box::new(Formula::prop("P")))), Box::new(Formula::prop("Q"))));
    }

    #[test]
    fn parse_implication_right_associative() {
        let f = Formula::parse("P -> Q -> R").unwrap();
        assert_eq!(
            f,
            Formula::Implies(Box::new(Formula::prop("P")), Box::new(Formula::Implies(Box::new(Formula::prop("Q")), Box::new(Formula::prop("R")))))
        );
    }

    #[test]
    fn parse_predicate_with_arguments() {
        let f = Formula::parse("P(a, x)").unwrap();
        assert_eq!(f, Formula::atom("P", vec![Term::constant("a"), Term::var("x")]));
    }

    #[test]
    fn parse_quantifiers() {
        let f = Formula::parse("forall x. P(x) -> P(a)").unwrap();
        assert_eq!(
            f,
            Formula::Implies(
                Box::new(Formula::Forall(
                    "x".to_string(),
                    Box::new(Formula::atom("P", vec![Term::var("x")])),
                )),
                Box::new(Formula::atom("P", vec![Term::constant("a")])),
            )
        );
    }

    #[test]
    fn instantiate_respects_shadowing() {
        let f = Formula::Forall("x".to_string(), Box::new(Formula::atom("P", vec![Term::var("x")])));
        let out = f.instantiate("x", &Term::constant("a"));
        // x is rebound by the inner forall, so the outer substitution must not reach in.
        assert_eq!(out, f);
    }

    #[test]
    fn instantiate_substitutes_free_occurrences() {
        let body = Formula::atom("P", vec![Term::var("x")]);
        let out = body.instantiate("x", &Term::constant("a"));
        assert_eq!(out, Formula::atom("P", vec![Term::constant("a")]));
    }

    #[test]
    fn release_iff_expands_to_conjunction_of_implications() {
        let f = Formula::Iff(Box::new(Formula::prop("A")), Box::new(Formula::prop("B")));
        let out = f.release_iff();
        assert_eq!(
            out,
            Formula::And(
                Box::new(Formula::Implies(Box::new(Formula::prop("A")), Box::new(Formula::prop("B")))),
                Box::new(Formula::Implies(Box::new(Formula::prop("B")), Box::new(Formula::prop("A")))),
            )
        );
    }

    #[test]
    fn absorb_constants_simplifies_implication_from_true() {
        let f = Formula::Implies(Box::new(Formula::True), Box::new(Formula::prop("A")));
        assert_eq!(f.absorb_constants(), Formula::prop("A"));
    }

    #[test]
    fn absorb_constants_simplifies_nested() {
        let f = Formula::And(Box::new(Formula::prop("A")), Box::new(Formula::True));
        assert_eq!(f.absorb_constants(), Formula::prop("A"));
    }

    #[test]
    fn absorb_constants_fully_propagates_iff_of_two_falses() {
        let f = Formula::Iff(Box::new(Formula::False), Box::new(Formula::False));
        assert_eq!(f.absorb_constants(), Formula::True);
    }

    #[test]
    fn absorb_constants_collapses_quantifier_over_a_constant_body() {
        let forall_true = Formula::Forall("x".to_string(), Box::new(Formula::True));
        assert_eq!(forall_true.absorb_constants(), Formula::True);

        let exists_false = Formula::Exists("x".to_string(), Box::new(Formula::False));
        assert_eq!(exists_false.absorb_constants(), Formula::False);
    }

    #[test]
    fn display_of_a_right_associated_and_chain_round_trips() {
        let f = Formula::And(
            Box::new(Formula::prop("A")),
            Box::new(Formula::And(Box::new(Formula::prop("B")), Box::new(Formula::prop("C")))),
        );
        let reparsed = Formula::parse(&f.display_string()).unwrap();
        assert_eq!(f, reparsed);
    }

    #[test]
    fn display_roundtrips_through_parser() {
        let f = Formula::parse("(P & Q) -> R").unwrap();
        let printed = f.display_string();
        let reparsed = Formula::parse(&printed).unwrap();
        assert_eq!(f, reparsed);
    }

    #[test]
    fn quantifier_operand_is_parenthesized_to_avoid_greedy_body() {
        let f = Formula::And(
            Box::new(Formula::Forall("x".to_string(), Box::new(Formula::atom("P", vec![Term::var("x")])))),
            Box::new(Formula::prop("Q")),
        );
        let printed = f.display_string();
        let reparsed = Formula::parse(&printed).unwrap();
        assert_eq!(f, reparsed);
    }

    #[test]
    fn collect_constants_walks_atoms() {
        let f = Formula::And(
            Box::new(Formula::atom("P", vec![Term::constant("a")])),
            Box::new(Formula::atom("Q", vec![Term::constant("b"), Term::constant("a")])),
        );
        let mut out = Vec::new();
        f.collect_constants(&mut out);
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);
    }
}
