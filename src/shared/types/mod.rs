pub mod errors;

pub use errors::{ClientError, ClientResult};
