/// Defines custom error types.
pub mod error;

/// The configuration value tree produced by the reader.
pub mod value;

/// Reader for the shorthand configuration syntax.
pub mod reader;

/// Environment-qualified name and resource type derivation.
pub mod ident;

/// Tagged-literal resolvers scoped to a single read.
pub mod literals;

/// Expansion of shorthand stacks into the provisioning wire format.
pub mod serializer;

/// Configuration reading orchestration.
pub mod config;

/// Scans serialized configurations for SSM parameter names.
pub mod ssm;

pub use config::read;
pub use error::{Error, Result};
pub use value::Value;
