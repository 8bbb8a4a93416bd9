use log::debug;

use crate::error::MalformedInput;
use crate::models::branch::Branch;
use crate::models::formula::Formula;
use crate::models::signed::SignedFormula;
use crate::services::rules::{alpha_children, beta_children, delta_expand, gamma_instantiate};
use crate::services::trace::TraceSink;

/// Eliminate biconditionals and logic constants, then guard against the
/// degenerate cases where that leaves a bare `True` or `False` at the root —
/// classification has no type for either, so each is rewritten into an
/// equivalent formula that keeps classification total.
fn normalize(raw: &Formula) -> Formula {
    let simplified = raw.release_iff().absorb_constants();
    match simplified {
        Formula::True => Formula::trivial_tautology(raw),
        Formula::False => Formula::trivial_contradiction(raw),
        other => other,
    }
}

/// Owns the root of a tableau proof and runs the recursive search described
/// by the rule-selection policy: close on a complementary pair, otherwise
/// expand the first non-gamma formula, otherwise saturate gamma formulas
/// one round at a time until a fixed point declares the branch open.
pub struct Prover {
    root: Formula,
    result: Option<bool>,
}

impl Prover {
    /// `raw` is the formula under test. The prover seeks to close `F(raw)`
    /// — ever branch closing means `raw` cannot be made false, i.e. it is
    /// a tautology.
    pub fn new(raw: Formula) -> Self {
        Self { root: normalize(&raw), result: None }
    }

    pub fn normalized_root(&self) -> &Formula {
        &self.root
    }

    /// True if the formula was proved a tautology, once [`run`] has completed.
    pub fn result(&self) -> Option<bool> {
        self.result
    }

    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<bool, MalformedInput> {
        let branch = Branch::from_root(SignedFormula::f(self.root.clone()));
        let closed = Self::prove(branch, sink, 0)?;
        self.result = Some(closed);
        Ok(closed)
    }

    fn prove(mut branch: Branch, sink: &mut dyn TraceSink, depth: usize) -> Result<bool, MalformedInput> {
        sink.state(depth, &branch);
        debug!("depth {} branch has {} formulae, {} constants", depth, branch.len(), branch.constants().len());

        if branch.has_complementary_pair() {
            sink.outcome(depth + 1, true);
            return Ok(true);
        }

        if let Some(index) = branch.next_non_gamma()? {
            let sf = branch.formulae()[index].clone();
            return Self::expand(branch, index, sf, sink, depth);
        }

        Self::saturate_gamma(branch, sink, depth)
    }

    fn expand(
        mut branch: Branch,
        index: usize,
        sf: SignedFormula,
        sink: &mut dyn TraceSink,
        depth: usize,
    ) -> Result<bool, MalformedInput> {
        use crate::models::signed::TableauType;

        match sf.tableau_type()? {
            TableauType::Alpha => {
                branch.remove(index);
                for child in alpha_children(&sf)? {
                    branch.insert(child);
                }
                Self::prove(branch, sink, depth)
            }
            TableauType::Beta => {
                branch.remove(index);
                let (left, right) = beta_children(&sf)?;

                // Each sub-call's own termination (complementary-pair closure
                // or gamma-saturation fixed point) emits its own outcome line
                // at its own depth — the split point itself marks nothing, or
                // every leaf under it would be double-counted.
                let mut left_branch = branch.clone();
                left_branch.insert(left);
                let left_closed = Self::prove(left_branch, sink, depth + 1)?;

                if !left_closed {
                    // Sound short-circuit: both successors must close for the
                    // parent to close, so an open left branch already settles it.
                    return Ok(false);
                }

                let mut right_branch = branch;
                right_branch.insert(right);
                let right_closed = Self::prove(right_branch, sink, depth + 1)?;

                Ok(left_closed && right_closed)
            }
            TableauType::Delta => {
                let expanded = delta_expand(&sf, &mut branch)?;
                branch.remove(index);
                branch.insert(expanded);
                Self::prove(branch, sink, depth)
            }
            TableauType::Atom | TableauType::Gamma => {
                Err(MalformedInput::at("rule selection chose a formula that is not alpha/beta/delta", sf))
            }
        }
    }

    /// One round of gamma saturation: instantiate every gamma formula with
    /// every constant on the branch, then recurse if that grew the branch.
    /// Delta rules have strictly higher priority in [`prove`], so every
    /// witness a delta rule can contribute is already on the branch by the
    /// time a saturation round runs — a fixed point here is therefore a
    /// sound open-branch signal, not merely a lack of available witnesses.
    fn saturate_gamma(mut branch: Branch, sink: &mut dyn TraceSink, depth: usize) -> Result<bool, MalformedInput> {
        branch.rotate_atoms_to_tail();

        let gammas = branch.gamma_formulas()?;
        let constants: Vec<String> = branch.constants().to_vec();

        let mut grew = false;
        for g in &gammas {
            for c in &constants {
                let instantiated = gamma_instantiate(g, c)?;
                if branch.insert(instantiated) {
                    grew = true;
                }
            }
        }

        if !grew {
            sink.outcome(depth + 1, false);
            return Ok(false);
        }

        Self::prove(branch, sink, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::term::Term;
    use crate::models::Formula as F;
    use crate::services::trace::{NullTrace, VecTrace};

    fn check(formula: Formula) -> bool {
        let mut prover = Prover::new(formula);
        prover.run(&mut NullTrace).unwrap()
    }

    /// Count of `X`/`O` outcome lines in a captured trace, as `(closed, open)`.
    fn outcome_counts(lines: &[String]) -> (usize, usize) {
        let closed = lines.iter().filter(|l| l.trim() == "X").count();
        let open = lines.iter().filter(|l| l.trim() == "O").count();
        (closed, open)
    }

    #[test]
    fn excluded_middle_is_a_tautology() {
        assert!(check(F::Or(Box::new(F::prop("A")), Box::new(F::Not(Box::new(F::prop("A")))))));
    }

    #[test]
    fn excluded_middle_trace_has_one_closed_leaf_and_no_open_leaves() {
        let f = F::Or(Box::new(F::prop("A")), Box::new(F::Not(Box::new(F::prop("A")))));
        let mut prover = Prover::new(f);
        let mut sink = VecTrace::default();
        assert!(prover.run(&mut sink).unwrap());
        let (closed, open) = outcome_counts(&sink.lines);
        assert_eq!(closed, 1);
        assert_eq!(open, 0);
    }

    #[test]
    fn contradiction_is_not_a_tautology() {
        assert!(!check(F::And(Box::new(F::prop("A")), Box::new(F::Not(Box::new(F::prop("A")))))));
    }

    #[test]
    fn identity_implication_is_a_tautology() {
        assert!(check(F::Implies(Box::new(F::prop("A")), Box::new(F::prop("A")))));
    }

    #[test]
    fn contrapositive_is_a_tautology() {
        let a = F::prop("A");
        let b = F::prop("B");
        let f = F::Implies(
            Box::new(F::Implies(Box::new(a.clone()), Box::new(b.clone()))),
            Box::new(F::Implies(Box::new(F::Not(Box::new(b))), Box::new(F::Not(Box::new(a))))),
        );
        assert!(check(f));
    }

    #[test]
    fn contrapositive_trace_has_one_closed_leaf_per_branch_and_no_open_leaves() {
        let a = F::prop("A");
        let b = F::prop("B");
        let f = F::Implies(
            Box::new(F::Implies(Box::new(a.clone()), Box::new(b.clone()))),
            Box::new(F::Implies(Box::new(F::Not(Box::new(b))), Box::new(F::Not(Box::new(a))))),
        );
        let mut prover = Prover::new(f);
        let mut sink = VecTrace::default();
        assert!(prover.run(&mut sink).unwrap());
        let (closed, open) = outcome_counts(&sink.lines);
        // Exactly one beta step splits the tableau into two branches, each
        // of which closes on its own complementary pair.
        assert_eq!(closed, 2);
        assert_eq!(open, 0);
    }

    #[test]
    fn reflexive_biconditional_is_a_tautology() {
        let a = F::prop("A");
        assert!(check(F::Iff(Box::new(a.clone()), Box::new(a))));
    }

    #[test]
    fn true_implies_anything_absorbs_to_the_consequent() {
        // true -> A simplifies to A, which is not a tautology on its own.
        assert!(!check(F::Implies(Box::new(F::True), Box::new(F::prop("A")))));
    }

    #[test]
    fn universal_instantiation_with_existing_constant_is_a_tautology() {
        let p_x = F::atom("P", vec![Term::var("x")]);
        let p_a = F::atom("P", vec![Term::constant("a")]);
        let f = F::Implies(Box::new(F::Forall("x".to_string(), Box::new(p_x))), Box::new(p_a));
        assert!(check(f));
    }

    #[test]
    fn existential_witness_does_not_follow_from_an_unrelated_constant() {
        let p_x = F::atom("P", vec![Term::var("x")]);
        let p_a = F::atom("P", vec![Term::constant("a")]);
        let f = F::Implies(Box::new(F::Exists("x".to_string(), Box::new(p_x))), Box::new(p_a));
        assert!(!check(f));
    }

    #[test]
    fn malformed_input_is_unreachable_after_normalization_for_well_formed_input() {
        let f = F::Iff(Box::new(F::prop("A")), Box::new(F::prop("B")));
        let mut prover = Prover::new(f);
        assert!(prover.run(&mut NullTrace).is_ok());
    }
}
