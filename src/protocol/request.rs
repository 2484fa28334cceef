//! Request side of the function protocol
//!
//! The host sends the observed state of the composite and its composed
//! resources, plus the desired state accumulated by earlier pipeline steps.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFunctionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,

    /// State of the composite and composed resources as last observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<State>,

    /// State produced by previous functions in the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<State>,

    /// Function input from the composition step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    /// Pipeline context shared between functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// Opaque tag identifying the request, echoed in the response
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<Resource>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Untyped resource document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<Ready>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ready {
    #[serde(rename = "READY_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "READY_TRUE")]
    True,
    #[serde(rename = "READY_FALSE")]
    False,
}

impl RunFunctionRequest {
    /// Tag from the request metadata, or `""` when none was sent.
    pub fn tag(&self) -> &str {
        self.meta.as_ref().map(|m| m.tag.as_str()).unwrap_or("")
    }

    /// The observed composite resource document, if the host sent one.
    pub fn observed_composite(&self) -> Option<&Value> {
        self.observed
            .as_ref()?
            .composite
            .as_ref()?
            .resource
            .as_ref()
    }

    /// Parse a request document, trying JSON first and then YAML.
    pub fn from_document(contents: &str) -> Result<Self, LoadError> {
        match serde_json::from_str(contents) {
            Ok(request) => Ok(request),
            Err(_) => serde_yaml::from_str(contents).map_err(LoadError::Parse),
        }
    }

    /// Load a request document from a JSON or YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_document(&contents)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read request file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("request is neither valid JSON nor YAML: {0}")]
    Parse(serde_yaml::Error),
}
