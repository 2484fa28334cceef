//! Synthesis of the fleet manager resource.
//!
//! One `NopResource` is composed per fleet. Its name is derived from the fleet
//! name alone, so two composites sharing a fleet name target the same slot.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::SerializationError;
use crate::input::FleetManagerParameters;
use crate::protocol::Resource;

pub const API_VERSION: &str = "nop.crossplane.io/v1alpha1";
pub const KIND: &str = "NopResource";
pub const NAME_SUFFIX: &str = "-fleet-manager";
pub const COMPOSITION_RESOURCE_NAME: &str = "fleet-manager";

pub const EXTERNAL_NAME_ANNOTATION: &str = "crossplane.io/external-name";
pub const COMPOSITION_RESOURCE_NAME_ANNOTATION: &str = "crossplane.io/composition-resource-name";

/// Every fleet manager reports Ready this long after creation.
pub const READY_AFTER: &str = "10s";

/// A synthesized resource and the slot it occupies in the desired state.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedResource {
    pub name: String,
    pub resource: Resource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FleetManagerResource<'a> {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata<'a>,
    spec: FleetManagerSpec<'a>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    name: &'a str,
    annotations: BTreeMap<&'static str, &'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FleetManagerSpec<'a> {
    for_provider: ForProvider<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForProvider<'a> {
    condition_after: [ConditionAfter; 1],
    fields: &'a FleetManagerParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConditionAfter {
    condition_type: &'static str,
    condition_status: &'static str,
    time: &'static str,
}

/// Name of the composed resource for a fleet.
pub fn resource_name(fleet_name: &str) -> String {
    format!("{fleet_name}{NAME_SUFFIX}")
}

/// Build the fleet manager resource for `params`.
pub fn synthesize(params: &FleetManagerParameters) -> Result<ComposedResource, SerializationError> {
    let name = resource_name(&params.fleet_name);

    let document = FleetManagerResource {
        api_version: API_VERSION,
        kind: KIND,
        metadata: Metadata {
            name: &name,
            annotations: BTreeMap::from([
                (EXTERNAL_NAME_ANNOTATION, name.as_str()),
                (COMPOSITION_RESOURCE_NAME_ANNOTATION, COMPOSITION_RESOURCE_NAME),
            ]),
        },
        spec: FleetManagerSpec {
            for_provider: ForProvider {
                condition_after: [ConditionAfter {
                    condition_type: "Ready",
                    condition_status: "True",
                    time: READY_AFTER,
                }],
                fields: params,
            },
        },
    };

    let resource: Value = serde_json::to_value(&document)?;

    Ok(ComposedResource {
        name,
        resource: Resource {
            resource: Some(resource),
            ready: None,
        },
    })
}
