pub mod error;
pub mod handlers;
pub mod types;

pub use error::*;
pub use handlers::*;
pub use types::*;
