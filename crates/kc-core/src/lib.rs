pub mod error;
pub mod types;

pub use error::KcodeError;
pub use types::*;
