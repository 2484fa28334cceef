//! Composition function protocol model
//!
//! Serde types for the slice of the function protocol this crate reads and
//! writes. Field and enum names follow the protobuf JSON mapping so documents
//! round-trip with the host runtime unchanged.

pub mod request;
pub mod response;

pub use request::{LoadError, Ready, RequestMeta, Resource, RunFunctionRequest, State};
pub use response::{
    Condition, ConditionStatus, FunctionResult, Outcome, ResponseMeta, RunFunctionResponse,
    Severity, Target, DEFAULT_TTL,
};
