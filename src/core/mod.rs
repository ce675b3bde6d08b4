// Public modules
pub mod arithmetic;
pub mod arrays;
pub mod dates;
pub mod defaults;
pub mod error;
pub mod files;
pub mod http;
pub mod strings;
pub mod validator;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
