//! Terminal actions on a response: exactly one is applied per invocation.

use crate::protocol::{
    Condition, ConditionStatus, FunctionResult, RunFunctionResponse, Severity, Target,
};
use crate::synthesize::ComposedResource;

pub const SUCCESS_CONDITION: &str = "FunctionSuccess";
pub const SUCCESS_REASON: &str = "Success";

/// Attach a fatal result carrying the error's message. Desired resources are left as they are.
pub fn fatal(rsp: &mut RunFunctionResponse, err: &dyn std::error::Error) {
    rsp.results.push(FunctionResult {
        severity: Severity::Fatal,
        message: err.to_string(),
        target: Target::Composite,
    });
}

/// Add the composed resource to the desired state and mark the function successful
/// on both the composite and its claim.
pub fn success(rsp: &mut RunFunctionResponse, composed: ComposedResource) {
    rsp.desired_mut()
        .resources
        .insert(composed.name, composed.resource);

    rsp.conditions.push(Condition {
        condition_type: SUCCESS_CONDITION.to_string(),
        status: ConditionStatus::True,
        reason: SUCCESS_REASON.to_string(),
        message: None,
        target: Target::CompositeAndClaim,
    });
}
