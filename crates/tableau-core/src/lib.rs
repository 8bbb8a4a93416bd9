pub mod error;
pub mod models;
pub mod services;

pub use error::MalformedInput;
pub use models::*;
pub use services::*;
