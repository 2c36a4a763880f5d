//! Protocol adaptation registry

mod error;
mod protocol;
mod resolve;
mod store;
mod value;


pub use error::{AdaptError, AdaptResult, BoxError};
pub use protocol::{Conformance, Protocol, ProtocolAdapter, ProtocolId};
pub use store::{AdapterKey, AdapterRegistry, Converter, RegisteredAdapter};
pub use value::{Adaptable, AsAny, TypeKey, Value};
