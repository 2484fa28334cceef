//! Fleet manager parameters.
//!
//! These are read from `spec.parameters` of the XFleetManager composite and
//! are embedded verbatim as the `fields` block of the synthesized resource.

use std::collections::BTreeMap;

use serde::Serialize;

pub const DEFAULT_INSTANCE_COUNT: i64 = 3;
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Validated parameter set. Only built once both required fields were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetManagerParameters {
    pub fleet_name: String,
    pub region: String,
    pub instance_count: i64,
    pub environment: String,
    /// `None` when the composite sets no tags; serialized as `null`.
    pub tags: Option<BTreeMap<String, String>>,
}

impl FleetManagerParameters {
    /// Parameters with every optional field at its default.
    pub fn new(fleet_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            fleet_name: fleet_name.into(),
            region: region.into(),
            instance_count: DEFAULT_INSTANCE_COUNT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            tags: None,
        }
    }
}
