use crate::error::MalformedInput;
use crate::models::branch::Branch;
use crate::models::formula::Formula;
use crate::models::signed::{Sign, SignedFormula};
use crate::models::term::Term;

/// Expand an alpha-type signed formula into its one-successor-per-conjunct
/// children. The parent is not included in the result; the caller is
/// responsible for removing it from the branch.
pub fn alpha_children(sf: &SignedFormula) -> Result<Vec<SignedFormula>, MalformedInput> {
    match (sf.sign, &sf.formula) {
        (Sign::T, Formula::Not(x)) => Ok(vec![SignedFormula::f((**x).clone())]),
        (Sign::F, Formula::Not(x)) => Ok(vec![SignedFormula::t((**x).clone())]),
        (Sign::T, Formula::And(x, y)) => Ok(vec![SignedFormula::t((**x).clone()), SignedFormula::t((**y).clone())]),
        (Sign::F, Formula::Or(x, y)) => Ok(vec![SignedFormula::f((**x).clone()), SignedFormula::f((**y).clone())]),
        (Sign::F, Formula::Implies(x, y)) => Ok(vec![SignedFormula::t((**x).clone()), SignedFormula::f((**y).clone())]),
        _ => Err(MalformedInput::at("alpha rule dispatched on a formula that is not alpha-type", sf.clone())),
    }
}

/// Split a beta-type signed formula into its two successor branches' sole
/// new formula each. The caller clones the branch and applies one half to
/// each clone.
pub fn beta_children(sf: &SignedFormula) -> Result<(SignedFormula, SignedFormula), MalformedInput> {
    match (sf.sign, &sf.formula) {
        (Sign::F, Formula::And(x, y)) => Ok((SignedFormula::f((**x).clone()), SignedFormula::f((**y).clone()))),
        (Sign::T, Formula::Or(x, y)) => Ok((SignedFormula::t((**x).clone()), SignedFormula::t((**y).clone()))),
        (Sign::T, Formula::Implies(x, y)) => Ok((SignedFormula::f((**x).clone()), SignedFormula::t((**y).clone()))),
        _ => Err(MalformedInput::at("beta rule dispatched on a formula that is not beta-type", sf.clone())),
    }
}

/// Apply a delta rule: introduce a fresh constant not occurring anywhere on
/// the branch and instantiate the quantifier body with it. Mutates `branch`
/// only to register the new constant.
pub fn delta_expand(sf: &SignedFormula, branch: &mut Branch) -> Result<SignedFormula, MalformedInput> {
    match (sf.sign, &sf.formula) {
        (Sign::F, Formula::Forall(v, body)) => {
            let c = branch.fresh_constant();
            Ok(SignedFormula::f(body.instantiate(v, &Term::constant(c))))
        }
        (Sign::T, Formula::Exists(v, body)) => {
            let c = branch.fresh_constant();
            Ok(SignedFormula::t(body.instantiate(v, &Term::constant(c))))
        }
        _ => Err(MalformedInput::at("delta rule dispatched on a formula that is not delta-type", sf.clone())),
    }
}

/// Instantiate a reusable gamma-type signed formula with an existing ground
/// constant from the branch. The formula carrying `sf` is left untouched on
/// the branch — only the new instantiated formula is returned.
pub fn gamma_instantiate(sf: &SignedFormula, constant: &str) -> Result<SignedFormula, MalformedInput> {
    match (sf.sign, &sf.formula) {
        (Sign::T, Formula::Forall(v, body)) => Ok(SignedFormula::t(body.instantiate(v, &Term::constant(constant)))),
        (Sign::F, Formula::Exists(v, body)) => Ok(SignedFormula::f(body.instantiate(v, &Term::constant(constant)))),
        _ => Err(MalformedInput::at("gamma rule dispatched on a formula that is not gamma-type", sf.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Formula as F;

    #[test]
    fn alpha_rule_for_and() {
        let sf = SignedFormula::t(F::And(Box::new(F::prop("A")), Box::new(F::prop("B"))));
        let children = alpha_children(&sf).unwrap();
        assert_eq!(children, vec![SignedFormula::t(F::prop("A")), SignedFormula::t(F::prop("B"))]);
    }

    #[test]
    fn beta_rule_for_false_implication_is_not_beta() {
        let sf = SignedFormula::f(F::Implies(Box::new(F::prop("A")), Box::new(F::prop("B"))));
        assert!(beta_children(&sf).is_err());
    }

    #[test]
    fn beta_rule_for_true_implication() {
        let sf = SignedFormula::t(F::Implies(Box::new(F::prop("A")), Box::new(F::prop("B"))));
        let (left, right) = beta_children(&sf).unwrap();
        assert_eq!(left, SignedFormula::f(F::prop("A")));
        assert_eq!(right, SignedFormula::t(F::prop("B")));
    }

    #[test]
    fn delta_rule_mints_a_constant_absent_from_the_branch() {
        let root = SignedFormula::f(F::Forall("x".to_string(), Box::new(F::atom("P", vec![Term::var("x")]))));
        let mut branch = Branch::from_root(root.clone());
        let expanded = delta_expand(&root, &mut branch).unwrap();
        assert_eq!(expanded, SignedFormula::f(F::atom("P", vec![Term::constant("c0")])));
    }

    #[test]
    fn gamma_rule_instantiates_with_given_constant() {
        let sf = SignedFormula::t(F::Forall("x".to_string(), Box::new(F::atom("P", vec![Term::var("x")]))));
        let out = gamma_instantiate(&sf, "a").unwrap();
        assert_eq!(out, SignedFormula::t(F::atom("P", vec![Term::constant("a")])));
    }
}
