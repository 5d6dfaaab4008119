pub mod config;
pub mod error;
pub mod memory;
pub mod ops;
pub mod query;
pub mod remote;
pub mod rest;

pub use error::{ConfigError, GatewayError, SubmitError};
pub use memory::MemoryGateway;
pub use remote::{Gateway, SignUp};
pub use rest::RestGateway;
