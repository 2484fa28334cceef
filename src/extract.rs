//! Parameter extraction from the observed composite.
//!
//! Required fields are checked in a fixed order and the first one missing
//! ends extraction. Optional fields never fail: a value of the wrong kind
//! narrows to its zero value instead of falling back to the default.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::document::{fields_or_empty, number_or_zero, string_or_empty, Lookup};
use crate::error::ValidationError;
use crate::input::{FleetManagerParameters, DEFAULT_ENVIRONMENT, DEFAULT_INSTANCE_COUNT};
use crate::protocol::RunFunctionRequest;

/// Extract the fleet parameters from `observed.composite.resource.spec.parameters`.
pub fn extract_parameters(
    req: &RunFunctionRequest,
) -> Result<FleetManagerParameters, ValidationError> {
    let composite = req
        .observed_composite()
        .ok_or(ValidationError::CompositeMissing)?;

    let spec = composite
        .field("spec")
        .ok_or_else(|| ValidationError::missing("spec"))?;

    // A non-mapping spec has no keys, so parameters is reported missing.
    let parameters = spec
        .field("parameters")
        .ok_or_else(|| ValidationError::missing("parameters"))?;

    let params = fields_or_empty(parameters);

    let fleet_name = params
        .get("fleetName")
        .map(string_or_empty)
        .ok_or_else(|| ValidationError::missing("fleetName"))?;

    let region = params
        .get("region")
        .map(string_or_empty)
        .ok_or_else(|| ValidationError::missing("region"))?;

    let instance_count = params
        .get("instanceCount")
        .map(|v| truncate(number_or_zero(v)))
        .unwrap_or(DEFAULT_INSTANCE_COUNT);

    let environment = params
        .get("environment")
        .map(string_or_empty)
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

    let tags = params.get("tags").map(string_map);

    Ok(FleetManagerParameters {
        fleet_name,
        region,
        instance_count,
        environment,
        tags,
    })
}

/// Drops the fractional part; out-of-range values saturate.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

fn string_map(value: &Value) -> BTreeMap<String, String> {
    fields_or_empty(value)
        .iter()
        .map(|(k, v)| (k.clone(), string_or_empty(v)))
        .collect()
}
