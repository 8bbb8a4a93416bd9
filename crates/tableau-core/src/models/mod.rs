pub mod branch;
pub mod formula;
pub mod signed;
pub mod term;

pub use branch::*;
pub use formula::*;
pub use signed::*;
pub use term::*;
