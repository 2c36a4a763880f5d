//! protoadapt: Protocol Adaptation Registry
//!
//! Converts arbitrary values into objects satisfying a requested protocol,
//! using an extensible, prioritized resolution strategy instead of static
//! type checks.
//!
//! # Core Concepts
//!
//! - **Protocols**: identity-compared capability markers, optionally able to adapt values
//! - **Converters**: explicit `(type, protocol)` registrations that always take precedence
//! - **Conformance**: values may adapt themselves, or decline so resolution moves on
//!
//! # Example
//!
//! ```
//! use protoadapt::{AdapterRegistry, Protocol, Value};
//!
//! let registry = AdapterRegistry::new();
//! let param = Protocol::new("ParamProtocol");
//! registry
//!     .register_fn::<i64, _>(&param, |n| Ok(Value::new(n.to_string())))
//!     .unwrap();
//!
//! let adapted = registry.adapt(&Value::new(5i64), &param, None).unwrap();
//! assert_eq!(adapted.downcast_ref::<String>().unwrap(), "5");
//! ```

pub mod config;
mod registry;
pub mod sql;

pub use config::{ConfigError, RegistryConfig};
pub use registry::{
    AdaptError, AdaptResult, Adaptable, AdapterKey, AdapterRegistry, AsAny, BoxError,
    Conformance, Converter, Protocol, ProtocolAdapter, ProtocolId, RegisteredAdapter, TypeKey,
    Value,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
