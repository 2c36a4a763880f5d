//! AdapterRegistry storage: the `(type, protocol) -> converter` table

use super::error::{AdaptError, AdaptResult};
use super::protocol::{Protocol, ProtocolId};
use super::value::{TypeKey, Value};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

/// A registered conversion for one `(type, protocol)` pair.
pub trait Converter: Send + Sync {
    fn convert(&self, obj: &Value) -> AdaptResult<Value>;
}

impl<F> Converter for F
where
    F: Fn(&Value) -> AdaptResult<Value> + Send + Sync,
{
    fn convert(&self, obj: &Value) -> AdaptResult<Value> {
        self(obj)
    }
}

/// Compound registry key. Equality is structural over both members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterKey {
    pub type_key: TypeKey,
    pub protocol: ProtocolId,
}

impl AdapterKey {
    pub fn new(type_key: TypeKey, protocol: &Protocol) -> Self {
        Self {
            type_key,
            protocol: protocol.id(),
        }
    }
}

struct Entry {
    converter: Arc<dyn Converter>,
    protocol_name: String,
}

/// Snapshot of one registry entry, for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAdapter {
    pub type_key: TypeKey,
    pub protocol: ProtocolId,
    pub protocol_name: String,
}

static GLOBAL: OnceLock<AdapterRegistry> = OnceLock::new();

/// Table of explicitly registered converters.
///
/// Lookups share a read lock; registration takes the write lock. The lock
/// is released before any converter runs, so converters may register or
/// resolve against the same registry.
#[derive(Default)]
pub struct AdapterRegistry {
    entries: RwLock<HashMap<AdapterKey, Entry>>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry, created empty on first access.
    pub fn global() -> &'static AdapterRegistry {
        GLOBAL.get_or_init(AdapterRegistry::new)
    }

    /// Register `converter` for values of `type_key` requested as `protocol`.
    ///
    /// An existing converter for the same pair is replaced and released.
    pub fn register(
        &self,
        type_key: TypeKey,
        protocol: &Protocol,
        converter: impl Converter + 'static,
    ) -> AdaptResult<()> {
        self.register_arc(type_key, protocol, Arc::new(converter))
    }

    pub fn register_arc(
        &self,
        type_key: TypeKey,
        protocol: &Protocol,
        converter: Arc<dyn Converter>,
    ) -> AdaptResult<()> {
        let key = AdapterKey::new(type_key, protocol);
        let entry = Entry {
            converter,
            protocol_name: protocol.name().to_string(),
        };

        // The replaced entry is dropped after the guard so its Drop never runs under the lock.
        let replaced = {
            let mut entries = self.entries.write().map_err(|_| AdaptError::Poisoned)?;
            entries.try_reserve(1)?;
            entries.insert(key, entry)
        };

        debug!(
            type_name = type_key.name(),
            protocol = %protocol,
            replaced = replaced.is_some(),
            "registered adapter"
        );
        Ok(())
    }

    /// Register a typed conversion for `T`.
    ///
    /// The converter receives the value already downcast to `T`.
    pub fn register_fn<T, F>(&self, protocol: &Protocol, f: F) -> AdaptResult<()>
    where
        T: Any,
        F: Fn(&T) -> AdaptResult<Value> + Send + Sync + 'static,
    {
        self.register(TypeKey::of::<T>(), protocol, move |obj: &Value| -> AdaptResult<Value> {
            f(obj.try_as::<T>()?)
        })
    }

    /// Find the converter registered for `(type_key, protocol)`.
    ///
    /// `Ok(None)` means no entry; `Err` means the lookup itself failed.
    pub fn lookup(
        &self,
        type_key: TypeKey,
        protocol: &Protocol,
    ) -> AdaptResult<Option<Arc<dyn Converter>>> {
        let key = AdapterKey::new(type_key, protocol);
        let entries = self.entries.read().map_err(|_| AdaptError::Poisoned)?;
        Ok(entries.get(&key).map(|e| Arc::clone(&e.converter)))
    }

    /// Remove a registration. Returns whether an entry existed.
    pub fn unregister(&self, type_key: TypeKey, protocol: &Protocol) -> AdaptResult<bool> {
        let key = AdapterKey::new(type_key, protocol);
        let removed = {
            let mut entries = self.entries.write().map_err(|_| AdaptError::Poisoned)?;
            entries.remove(&key)
        };
        if removed.is_some() {
            debug!(type_name = type_key.name(), protocol = %protocol, "unregistered adapter");
        }
        Ok(removed.is_some())
    }

    pub fn contains(&self, type_key: TypeKey, protocol: &Protocol) -> AdaptResult<bool> {
        Ok(self.lookup(type_key, protocol)?.is_some())
    }

    /// Number of registered converters
    pub fn len(&self) -> AdaptResult<usize> {
        let entries = self.entries.read().map_err(|_| AdaptError::Poisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> AdaptResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of all registrations, in no particular order.
    pub fn entries(&self) -> AdaptResult<Vec<RegisteredAdapter>> {
        let entries = self.entries.read().map_err(|_| AdaptError::Poisoned)?;
        Ok(entries
            .iter()
            .map(|(key, entry)| RegisteredAdapter {
                type_key: key.type_key,
                protocol: key.protocol,
                protocol_name: entry.protocol_name.clone(),
            })
            .collect())
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AdapterRegistry");
        match self.entries.read() {
            Ok(entries) => s.field("entries", &entries.len()),
            Err(_) => s.field("entries", &"<poisoned>"),
        };
        s.finish()
    }
}
