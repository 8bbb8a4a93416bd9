use std::collections::HashSet;

use crate::error::MalformedInput;
use crate::models::formula::Formula;
use crate::models::signed::{SignedFormula, TableauType};

/// The state of one tableau branch: an ordered, duplicate-free list of
/// signed formulas plus the set of ground constants available for
/// gamma-instantiation. Branches are logically independent of one another —
/// a beta rule clones this struct wholesale rather than sharing any mutable
/// piece of it between the two successors.
#[derive(Debug, Clone)]
pub struct Branch {
    formulae: Vec<SignedFormula>,
    present: HashSet<SignedFormula>,
    constants: Vec<String>,
    constant_set: HashSet<String>,
    next_fresh: usize,
}

impl Branch {
    /// Start a branch from a single root signed formula, seeding its
    /// constant set from every ground function symbol already in it.
    pub fn from_root(root: SignedFormula) -> Self {
        let mut constants = Vec::new();
        root.formula.collect_constants(&mut constants);
        let mut branch = Branch {
            formulae: Vec::new(),
            present: HashSet::new(),
            constants: Vec::new(),
            constant_set: HashSet::new(),
            next_fresh: 0,
        };
        for c in constants.drain(..) {
            branch.register_constant(c);
        }
        branch.insert(root);
        branch
    }

    pub fn formulae(&self) -> &[SignedFormula] {
        &self.formulae
    }

    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    fn register_constant(&mut self, name: String) {
        if self.constant_set.insert(name.clone()) {
            self.constants.push(name);
        }
    }

    /// Insert a signed formula at the tail, suppressing the insertion if an
    /// equal one is already present. Returns true if this call actually
    /// grew the branch.
    pub fn insert(&mut self, sf: SignedFormula) -> bool {
        if self.contains(&sf) {
            return false;
        }
        let mut new_constants = Vec::new();
        sf.formula.collect_constants(&mut new_constants);
        for c in new_constants {
            self.register_constant(c);
        }
        self.present.insert(sf.clone());
        self.formulae.push(sf);
        true
    }

    pub fn contains(&self, sf: &SignedFormula) -> bool {
        self.present.contains(sf)
    }

    pub fn len(&self) -> usize {
        self.formulae.len()
    }

    /// True if the branch holds both `(T, A)` and `(F, A)` for some atomic `A`.
    pub fn has_complementary_pair(&self) -> bool {
        for (i, outer) in self.formulae.iter().enumerate() {
            if !matches!(outer.formula, Formula::Atom(_, _)) {
                continue;
            }
            for inner in &self.formulae[i + 1..] {
                if !matches!(inner.formula, Formula::Atom(_, _)) {
                    continue;
                }
                if outer.sign != inner.sign && outer.formula.equals(&inner.formula) {
                    return true;
                }
            }
        }
        false
    }

    /// Index of the first alpha/beta/delta formula in insertion order, or
    /// `None` if the branch holds only atoms and gamma formulas. Does not
    /// move anything — callers that need the atom-rotation behavior call
    /// [`rotate_atoms_to_tail`] separately once this returns `None`.
    pub fn next_non_gamma(&self) -> Result<Option<usize>, MalformedInput> {
        for (i, sf) in self.formulae.iter().enumerate() {
            match sf.tableau_type()? {
                TableauType::Alpha | TableauType::Beta | TableauType::Delta => return Ok(Some(i)),
                TableauType::Atom | TableauType::Gamma => continue,
            }
        }
        Ok(None)
    }

    /// Stable-partition the formula list into non-atoms followed by atoms,
    /// each group keeping its relative order. Called once rule selection
    /// finds nothing but atoms and gamma formulas left to scan, so that a
    /// later gamma-instantiated formula appended at the tail doesn't get
    /// stuck behind an atom that will never itself need expansion.
    pub fn rotate_atoms_to_tail(&mut self) {
        let (non_atoms, atoms): (Vec<_>, Vec<_>) =
            self.formulae.drain(..).partition(|sf| !matches!(sf.formula, Formula::Atom(_, _)));
        self.formulae = non_atoms;
        self.formulae.extend(atoms);
    }

    /// Remove the formula at `index`, in O(n) — branches are small enough
    /// in practice that a linear shift is preferable to the bookkeeping an
    /// index-stable structure would need.
    pub fn remove(&mut self, index: usize) -> SignedFormula {
        let sf = self.formulae.remove(index);
        self.present.remove(&sf);
        sf
    }

    /// Every gamma-type formula currently on the branch, re-usable across
    /// saturation rounds since applying one never consumes it.
    pub fn gamma_formulas(&self) -> Result<Vec<SignedFormula>, MalformedInput> {
        let mut out = Vec::new();
        for sf in &self.formulae {
            if sf.tableau_type()? == TableauType::Gamma {
                out.push(sf.clone());
            }
        }
        Ok(out)
    }

    /// Mint a constant name absent from the branch, for delta-rule witnesses.
    /// Freshness is verified directly against the branch's constant set
    /// rather than trusted to the counter alone, so a user formula that
    /// happens to use a name like `c3` can never collide with a witness.
    pub fn fresh_constant(&mut self) -> String {
        loop {
            let candidate = format!("c{}", self.next_fresh);
            self.next_fresh += 1;
            if !self.constant_set.contains(&candidate) {
                self.register_constant(candidate.clone());
                return candidate;
            }
        }
    }
}
