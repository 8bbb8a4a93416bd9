use serde::{Deserialize, Serialize};

use crate::error::MalformedInput;
use crate::models::formula::{Formula, FormulaKind};

/// One of the two tableau signs: `T` asserts the formula, `F` denies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    T,
    F,
}

impl Sign {
    pub fn flip(self) -> Sign {
        match self {
            Sign::T => Sign::F,
            Sign::F => Sign::T,
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::T => write!(f, "T"),
            Sign::F => write!(f, "F"),
        }
    }
}

/// The uniform-notation class of a signed formula, derived from its sign
/// and the syntactic shape of the formula it carries. Every non-atomic
/// signed formula has exactly one type once biconditionals and logic
/// constants have been eliminated by normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableauType {
    Atom,
    Alpha,
    Beta,
    Gamma,
    Delta,
}

/// An immutable (sign, formula) pair. Equality and hashing are structural —
/// two signed formulas built from equal but distinct trees compare equal —
/// which is what lets a branch deduplicate formulas and detect closure by
/// ordinary set membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedFormula {
    pub sign: Sign,
    pub formula: Formula,
}

impl SignedFormula {
    pub fn new(sign: Sign, formula: Formula) -> Self {
        Self { sign, formula }
    }

    pub fn t(formula: Formula) -> Self {
        Self::new(Sign::T, formula)
    }

    pub fn f(formula: Formula) -> Self {
        Self::new(Sign::F, formula)
    }

    /// Classify this signed formula per the tableau type table. Fails if
    /// normalization was skipped (a biconditional or logic constant is
    /// still present) or if a unary/binary kind is missing an operand it
    /// must have.
    pub fn tableau_type(&self) -> Result<TableauType, MalformedInput> {
        use Sign::*;
        let kind = self.formula.kind();
        match (kind, self.sign) {
            (FormulaKind::Atom, _) => Ok(TableauType::Atom),

            (FormulaKind::Not, _) => Ok(TableauType::Alpha),
            (FormulaKind::And, T) => Ok(TableauType::Alpha),
            (FormulaKind::Or, F) => Ok(TableauType::Alpha),
            (FormulaKind::Imp, F) => Ok(TableauType::Alpha),

            (FormulaKind::And, F) => Ok(TableauType::Beta),
            (FormulaKind::Or, T) => Ok(TableauType::Beta),
            (FormulaKind::Imp, T) => Ok(TableauType::Beta),

            (FormulaKind::Forall, T) => Ok(TableauType::Gamma),
            (FormulaKind::Exists, F) => Ok(TableauType::Gamma),

            (FormulaKind::Forall, F) => Ok(TableauType::Delta),
            (FormulaKind::Exists, T) => Ok(TableauType::Delta),

            (FormulaKind::Iff, _) | (FormulaKind::True, _) | (FormulaKind::False, _) => Err(MalformedInput::at(
                "classification undefined: normalization should have removed biconditionals and logic constants",
                self.clone(),
            )),
        }
    }

    pub fn display_string(&self) -> String {
        format!("{} ({})", self.sign, self.formula.display_string())
    }
}
