pub mod types;
pub mod validations;

pub use types::{ClientError, ClientResult};
