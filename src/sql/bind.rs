//! Binding adapted values onto SQLite statements
//!
//! Every parameter is first adapted to the prepare protocol with itself as
//! the default, so values without an adapter pass through unchanged. The
//! adapted value must then be one of the natively bindable types.

use super::error::{BindError, BindResult};
use super::prepare_protocol;
use crate::registry::{Adaptable, AdaptResult, AdapterRegistry, Value};
use rusqlite::types::Value as SqlValue;
use rusqlite::Statement;

impl Adaptable for SqlValue {}

/// Adapt a single parameter to the prepare protocol.
pub fn adapt_param(registry: &AdapterRegistry, value: &Value) -> AdaptResult<Value> {
    registry.adapt(value, prepare_protocol(), Some(value))
}

/// Convert a natively bindable value to its SQLite representation.
///
/// Returns `None` for any other type.
pub fn to_sql_value(value: &Value) -> Option<SqlValue> {
    if value.is_null() {
        return Some(SqlValue::Null);
    }
    if let Some(v) = value.downcast_ref::<SqlValue>() {
        return Some(v.clone());
    }
    if let Some(v) = value.downcast_ref::<i64>() {
        return Some(SqlValue::Integer(*v));
    }
    if let Some(v) = value.downcast_ref::<i32>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<i16>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<i8>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u32>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u16>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u8>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<bool>() {
        return Some(SqlValue::Integer(i64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<f64>() {
        return Some(SqlValue::Real(*v));
    }
    if let Some(v) = value.downcast_ref::<f32>() {
        return Some(SqlValue::Real(f64::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<String>() {
        return Some(SqlValue::Text(v.clone()));
    }
    if let Some(v) = value.downcast_ref::<&'static str>() {
        return Some(SqlValue::Text((*v).to_string()));
    }
    if let Some(v) = value.downcast_ref::<Vec<u8>>() {
        return Some(SqlValue::Blob(v.clone()));
    }
    // u64 only binds when it fits SQLite's signed 64-bit integer.
    if let Some(v) = value.downcast_ref::<u64>() {
        return i64::try_from(*v).ok().map(SqlValue::Integer);
    }
    None
}

/// Adapt and convert a parameter list, reporting 1-based positions on failure.
pub fn adapt_params(registry: &AdapterRegistry, params: &[Value]) -> BindResult<Vec<SqlValue>> {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| adapt_to_sql(registry, param, i + 1))
        .collect()
}

fn adapt_to_sql(registry: &AdapterRegistry, param: &Value, index: usize) -> BindResult<SqlValue> {
    let adapted = adapt_param(registry, param)?;
    to_sql_value(&adapted).ok_or(BindError::Unsupported {
        index,
        type_name: adapted.type_name(),
    })
}

/// Bind positional parameters onto `stmt`.
///
/// The number of parameters must match the statement exactly. Every
/// parameter is adapted before any is bound, so a failure leaves the
/// statement's bindings untouched.
pub fn bind_parameters(
    registry: &AdapterRegistry,
    stmt: &mut Statement<'_>,
    params: &[Value],
) -> BindResult<()> {
    let expected = stmt.parameter_count();
    if expected != params.len() {
        return Err(BindError::ParameterCount {
            expected,
            given: params.len(),
        });
    }

    let values = adapt_params(registry, params)?;
    for (i, value) in values.into_iter().enumerate() {
        stmt.raw_bind_parameter(i + 1, value)?;
    }
    Ok(())
}

/// Bind named parameters (`:name`, `@name` or `$name`) onto `stmt`.
///
/// Names are given without their prefix. Every statement parameter must be
/// named and supplied; extra entries are ignored. Positional placeholders,
/// numbered `?NNN` ones included, are rejected as unnamed. Nothing is bound
/// unless every parameter adapts.
pub fn bind_named(
    registry: &AdapterRegistry,
    stmt: &mut Statement<'_>,
    params: &[(&str, Value)],
) -> BindResult<()> {
    let mut values = Vec::with_capacity(stmt.parameter_count());
    for index in 1..=stmt.parameter_count() {
        let name = match stmt.parameter_name(index) {
            Some(raw) if !raw.starts_with('?') => raw.trim_start_matches([':', '@', '$']),
            _ => return Err(BindError::UnnamedParameter { index }),
        };
        let param = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| BindError::MissingParameter {
                name: name.to_string(),
            })?;

        values.push(adapt_to_sql(registry, param, index)?);
    }

    for (i, value) in values.into_iter().enumerate() {
        stmt.raw_bind_parameter(i + 1, value)?;
    }
    Ok(())
}
