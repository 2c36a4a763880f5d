//! Adaptation resolution
//!
//! Precedence, first success wins:
//! registered converter, protocol adapter, the value's own conform method,
//! the caller's default. Anything else is `CannotAdapt`.

use super::error::{AdaptError, AdaptResult};
use super::protocol::{Conformance, Protocol};
use super::store::AdapterRegistry;
use super::value::Value;
use tracing::{debug, trace};

/// Map a dynamic attempt to either a final outcome or "keep going".
fn settle(conformance: Conformance) -> Option<AdaptResult<Value>> {
    match conformance {
        Conformance::Adapted(value) => Some(Ok(value)),
        Conformance::Failed(err) if !err.is_type_mismatch() => Some(Err(err)),
        Conformance::Failed(_) | Conformance::Declined | Conformance::NoOpinion => None,
    }
}

impl AdapterRegistry {
    /// Adapt `obj` to `protocol`.
    ///
    /// A registered converter always wins and its result, error included,
    /// is returned as-is. Protocol and conform methods may decline (no
    /// opinion, `Declined`, or a type mismatch) to pass resolution on.
    /// `default` is returned as a new reference when every stage declines.
    pub fn adapt(
        &self,
        obj: &Value,
        protocol: &Protocol,
        default: Option<&Value>,
    ) -> AdaptResult<Value> {
        let type_key = obj.type_key();

        if let Some(converter) = self.lookup(type_key, protocol)? {
            trace!(type_name = type_key.name(), protocol = %protocol, "using registered converter");
            return converter.convert(obj);
        }

        if let Some(adapter) = protocol.adapter() {
            if let Some(outcome) = settle(adapter.adapt(obj)) {
                trace!(type_name = type_key.name(), protocol = %protocol, "protocol adapted value");
                return outcome;
            }
            trace!(type_name = type_key.name(), protocol = %protocol, "protocol declined");
        }

        if let Some(conformance) = obj.as_adaptable().conform(protocol) {
            if let Some(outcome) = settle(conformance) {
                trace!(type_name = type_key.name(), protocol = %protocol, "value conformed");
                return outcome;
            }
            trace!(type_name = type_key.name(), protocol = %protocol, "value declined to conform");
        }

        if let Some(default) = default {
            trace!(type_name = type_key.name(), protocol = %protocol, "falling back to default");
            return Ok(default.clone());
        }

        debug!(type_name = type_key.name(), protocol = %protocol, "cannot adapt");
        Err(AdaptError::CannotAdapt {
            protocol: protocol.name().to_string(),
            type_name: type_key.name(),
        })
    }
}
