//! Protocols and the outcome of dynamic adaptation attempts
//!
//! A protocol is an identity-compared marker for a requested capability.
//! It may carry an adapter that knows how to turn arbitrary values into
//! something satisfying the protocol.

use super::error::{AdaptError, AdaptResult, BoxError};
use super::value::{Adaptable, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_PROTOCOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolId(u64);

impl ProtocolId {
    fn next() -> Self {
        Self(NEXT_PROTOCOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol#{}", self.0)
    }
}

/// Result of asking a protocol or a value to perform an adaptation.
#[derive(Debug)]
pub enum Conformance {
    /// The adaptation succeeded.
    Adapted(Value),
    /// No opinion; resolution moves on as if the method were absent.
    NoOpinion,
    /// Not applicable to this value or protocol; resolution moves on.
    Declined,
    /// A genuine failure. Propagated unless it is a type mismatch.
    Failed(AdaptError),
}

impl Conformance {
    pub fn adapted<T: Adaptable + 'static>(value: T) -> Self {
        Self::Adapted(Value::new(value))
    }

    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self::Failed(AdaptError::callback(err))
    }
}

impl From<AdaptResult<Value>> for Conformance {
    fn from(result: AdaptResult<Value>) -> Self {
        match result {
            Ok(value) => Self::Adapted(value),
            Err(err) if err.is_type_mismatch() => Self::Declined,
            Err(err) => Self::Failed(err),
        }
    }
}

impl From<AdaptResult<Option<Value>>> for Conformance {
    fn from(result: AdaptResult<Option<Value>>) -> Self {
        match result {
            Ok(Some(value)) => Self::Adapted(value),
            Ok(None) => Self::NoOpinion,
            Err(err) if err.is_type_mismatch() => Self::Declined,
            Err(err) => Self::Failed(err),
        }
    }
}

/// The adaptation capability a protocol may expose.
pub trait ProtocolAdapter: Send + Sync {
    /// Adapt `obj` to the owning protocol.
    fn adapt(&self, obj: &Value) -> Conformance;
}

impl<F> ProtocolAdapter for F
where
    F: Fn(&Value) -> Conformance + Send + Sync,
{
    fn adapt(&self, obj: &Value) -> Conformance {
        self(obj)
    }
}

struct ProtocolInner {
    id: ProtocolId,
    name: String,
    adapter: Option<Arc<dyn ProtocolAdapter>>,
}

/// An identity-compared capability marker.
///
/// Clones share identity; two protocols built separately are never equal,
/// even with the same name.
#[derive(Clone)]
pub struct Protocol {
    inner: Arc<ProtocolInner>,
}

impl Protocol {
    /// Create a protocol without an adaptation capability.
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// Create a protocol that can adapt values itself.
    pub fn with_adapter(name: impl Into<String>, adapter: impl ProtocolAdapter + 'static) -> Self {
        Self::build(name.into(), Some(Arc::new(adapter)))
    }

    fn build(name: String, adapter: Option<Arc<dyn ProtocolAdapter>>) -> Self {
        Self {
            inner: Arc::new(ProtocolInner {
                id: ProtocolId::next(),
                name,
                adapter,
            }),
        }
    }

    pub fn id(&self) -> ProtocolId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn adapter(&self) -> Option<&dyn ProtocolAdapter> {
        self.inner.adapter.as_deref()
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Protocol {}

impl Hash for Protocol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Protocol")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("has_adapter", &self.inner.adapter.is_some())
            .finish()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_not_name_decides_equality() {
        let a = Protocol::new("Param");
        let b = Protocol::new("Param");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn adapter_is_optional() {
        let plain = Protocol::new("Plain");
        assert!(plain.adapter().is_none());

        let doubling = Protocol::with_adapter("Doubling", |obj: &Value| -> Conformance {
            obj.try_as::<i64>().map(|n| Value::new(n * 2)).into()
        });
        match doubling.adapter().unwrap().adapt(&Value::new(21i64)) {
            Conformance::Adapted(v) => assert_eq!(v.downcast_ref::<i64>(), Some(&42)),
            other => panic!("expected adapted, got {:?}", other),
        }
    }

    #[test]
    fn type_mismatch_converts_to_declined() {
        let result: AdaptResult<Value> = Value::new("x").try_as::<i64>().map(|_| Value::null());
        assert!(matches!(Conformance::from(result), Conformance::Declined));
    }

    #[test]
    fn none_converts_to_no_opinion() {
        let result: AdaptResult<Option<Value>> = Ok(None);
        assert!(matches!(Conformance::from(result), Conformance::NoOpinion));
    }

    #[test]
    fn other_errors_stay_failures() {
        let result: AdaptResult<Value> = Err(AdaptError::Poisoned);
        assert!(matches!(
            Conformance::from(result),
            Conformance::Failed(AdaptError::Poisoned)
        ));
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Protocol::new("PrepareProtocol").to_string(), "PrepareProtocol");
    }
}
