//! Dynamically typed values flowing through adaptation

use super::error::{AdaptError, AdaptResult};
use super::protocol::{Conformance, Protocol};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The runtime type of a value, used as half of the registry key.
///
/// Equality and hashing use only the `TypeId`; the name is for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Upcast helper so trait objects can be downcast to their concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type whose values can be adapted.
///
/// Implementors may expose a self-conformance capability by overriding
/// [`Adaptable::conform`]. The default returns `None`, meaning the type has
/// no conform method at all (as opposed to declining a particular protocol).
pub trait Adaptable: AsAny + fmt::Debug + Send + Sync {
    /// Ask the value to conform itself to `protocol`.
    fn conform(&self, _protocol: &Protocol) -> Option<Conformance> {
        None
    }
}

/// Wrapper giving any foreign type a place in a `Value`, without a conform method.
struct Foreign<T>(T);

impl<T: fmt::Debug> fmt::Debug for Foreign<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T: Any + fmt::Debug + Send + Sync> Adaptable for Foreign<T> {}

/// A shared, dynamically typed value.
///
/// Cloning is cheap and yields a new reference to the same underlying value.
#[derive(Clone)]
pub struct Value {
    type_key: TypeKey,
    inner: Arc<dyn Adaptable>,
}

impl Value {
    pub fn new<T: Adaptable + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    pub fn from_arc<T: Adaptable + 'static>(value: Arc<T>) -> Self {
        Self {
            type_key: TypeKey::of::<T>(),
            inner: value,
        }
    }

    /// Wrap a value whose type does not implement [`Adaptable`].
    ///
    /// The value keeps its own `TypeKey`, so converters registered for `T`
    /// apply to it. It never conforms itself, even if `T` is `Adaptable`.
    pub fn from_any<T: Any + fmt::Debug + Send + Sync>(value: T) -> Self {
        Self {
            type_key: TypeKey::of::<T>(),
            inner: Arc::new(Foreign(value)),
        }
    }

    /// The unit value, used as SQL `NULL` and as an explicit empty default.
    pub fn null() -> Self {
        Self::new(())
    }

    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub fn type_name(&self) -> &'static str {
        self.type_key.name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_key.id == TypeId::of::<T>()
    }

    pub fn is_null(&self) -> bool {
        self.is::<()>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }
        let any = AsAny::as_any(&*self.inner);
        any.downcast_ref::<T>()
            .or_else(|| any.downcast_ref::<Foreign<T>>().map(|f| &f.0))
    }

    /// Downcast, reporting a failure as [`AdaptError::TypeMismatch`].
    ///
    /// Protocol adapters and conform methods can propagate this error to
    /// decline a value they do not handle.
    pub fn try_as<T: Any>(&self) -> AdaptResult<&T> {
        self.downcast_ref::<T>().ok_or(AdaptError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: self.type_key.name,
        })
    }

    pub fn as_adaptable(&self) -> &dyn Adaptable {
        &*self.inner
    }

    /// True if both values share the same allocation.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

macro_rules! adaptable {
    ($($ty:ty),* $(,)?) => {
        $(impl Adaptable for $ty {})*
    };
}

adaptable!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
);
