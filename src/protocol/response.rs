//! Response side of the function protocol
//!
//! A response starts as a copy of the request's desired state and is then
//! completed by exactly one terminal action: a fatal result or a success
//! condition.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::request::{RunFunctionRequest, State};

/// How long the host may cache a response before calling the function again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFunctionResponse {
    pub meta: ResponseMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<State>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<FunctionResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub tag: String,

    #[serde(with = "duration_string")]
    pub ttl: Duration,
}

/// A message for the host, attached to the composite's event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResult {
    pub severity: Severity,
    pub message: String,
    pub target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "SEVERITY_FATAL")]
    Fatal,
    #[serde(rename = "SEVERITY_WARNING")]
    Warning,
    #[serde(rename = "SEVERITY_NORMAL")]
    Normal,
}

/// A status condition the host sets on the composite (and maybe its claim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    #[serde(rename = "STATUS_CONDITION_TRUE")]
    True,
    #[serde(rename = "STATUS_CONDITION_FALSE")]
    False,
    #[serde(rename = "STATUS_CONDITION_UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    #[serde(rename = "TARGET_COMPOSITE")]
    Composite,
    #[serde(rename = "TARGET_COMPOSITE_AND_CLAIM")]
    CompositeAndClaim,
}

/// Terminal status of an invocation, read back from a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Neither terminal action has been applied yet
    Pending,
    Success,
    Fatal(&'a str),
}

impl RunFunctionResponse {
    /// Start a response for `req`: the tag, desired state and context carry over.
    pub fn to(req: &RunFunctionRequest, ttl: Duration) -> Self {
        Self {
            meta: ResponseMeta {
                tag: req.tag().to_string(),
                ttl,
            },
            desired: req.desired.clone(),
            results: Vec::new(),
            conditions: Vec::new(),
            context: req.context.clone(),
        }
    }

    /// Desired state, created empty on first use.
    pub fn desired_mut(&mut self) -> &mut State {
        self.desired.get_or_insert_with(State::default)
    }

    /// Desired composed resource under `name`, if any.
    pub fn desired_resource(&self, name: &str) -> Option<&Value> {
        self.desired
            .as_ref()?
            .resources
            .get(name)?
            .resource
            .as_ref()
    }

    pub fn outcome(&self) -> Outcome<'_> {
        if let Some(fatal) = self
            .results
            .iter()
            .find(|r| r.severity == Severity::Fatal)
        {
            return Outcome::Fatal(&fatal.message);
        }

        let succeeded = self.conditions.iter().any(|c| {
            c.condition_type == crate::respond::SUCCESS_CONDITION
                && c.status == ConditionStatus::True
        });
        if succeeded {
            Outcome::Success
        } else {
            Outcome::Pending
        }
    }
}

/// Protobuf JSON encoding of a duration: seconds with an `s` suffix.
mod duration_string {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = if ttl.subsec_nanos() == 0 {
            format!("{}s", ttl.as_secs())
        } else {
            format!("{}s", ttl.as_secs_f64())
        };
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let seconds = raw
            .strip_suffix('s')
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {raw}")))?;
        Duration::try_from_secs_f64(seconds).map_err(serde::de::Error::custom)
    }
}
