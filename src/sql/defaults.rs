//! Default adapters for common non-primitive types

use super::prepare_protocol;
use crate::registry::{Adaptable, AdaptResult, AdapterRegistry, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use uuid::Uuid;

impl Adaptable for NaiveDate {}
impl Adaptable for NaiveDateTime {}
impl Adaptable for DateTime<Utc> {}
impl Adaptable for Uuid {}
impl Adaptable for serde_json::Value {}

/// Format as ISO 8601 with `sep` between date and time.
///
/// Fractional seconds are written as microseconds, and only when non-zero.
pub fn iso_datetime(dt: &NaiveDateTime, sep: char) -> String {
    let micros = (dt.nanosecond() / 1_000) % 1_000_000;
    let mut out = format!("{}{}{}", dt.format("%Y-%m-%d"), sep, dt.format("%H:%M:%S"));
    if micros != 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}

/// Install the prepare-protocol adapters for dates, times, UUIDs and JSON.
pub fn register_default_adapters(registry: &AdapterRegistry, datetime_separator: char) -> AdaptResult<()> {
    let protocol = prepare_protocol();

    registry.register_fn::<NaiveDate, _>(protocol, |d| {
        Ok(Value::new(d.format("%Y-%m-%d").to_string()))
    })?;
    registry.register_fn::<NaiveDateTime, _>(protocol, move |dt| {
        Ok(Value::new(iso_datetime(dt, datetime_separator)))
    })?;
    registry.register_fn::<DateTime<Utc>, _>(protocol, |dt| Ok(Value::new(dt.to_rfc3339())))?;
    registry.register_fn::<Uuid, _>(protocol, |id| Ok(Value::new(id.hyphenated().to_string())))?;
    registry.register_fn::<serde_json::Value, _>(protocol, |json| Ok(Value::new(json.to_string())))?;

    Ok(())
}
