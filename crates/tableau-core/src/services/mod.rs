pub mod prover;
pub mod rules;
pub mod trace;

pub use prover::*;
pub use rules::*;
pub use trace::*;
