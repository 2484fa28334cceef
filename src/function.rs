//! The fleet manager composition function.
//!
//! Each call runs extract, synthesize and respond in order and stops at the
//! first failure. Calls share no state, so one runner can serve concurrent
//! requests.

use tracing::Span;

use crate::config::FunctionConfig;
use crate::error::FunctionError;
use crate::extract::extract_parameters;
use crate::input::FleetManagerParameters;
use crate::protocol::{RunFunctionRequest, RunFunctionResponse};
use crate::respond;
use crate::synthesize::{synthesize, ComposedResource};

/// The one capability a composition function exposes to its host.
///
/// Failures are reported inside the returned response, never as an error.
pub trait FunctionRunner: Send + Sync {
    fn run_function(&self, req: &RunFunctionRequest) -> RunFunctionResponse;
}

/// Synthesizes one fleet manager resource from an XFleetManager composite.
#[derive(Debug, Clone)]
pub struct FleetManagerFunction {
    /// Parent span for every log line this function emits. It scopes the
    /// lines only; filtering is left to the installed subscriber.
    log: Span,
    config: FunctionConfig,
}

/// Logs as root events (`Span::none()` parent) with the default config.
impl Default for FleetManagerFunction {
    fn default() -> Self {
        Self::new(Span::none(), FunctionConfig::default())
    }
}

impl FleetManagerFunction {
    pub fn new(log: Span, config: FunctionConfig) -> Self {
        Self { log, config }
    }

    fn compose(&self, req: &RunFunctionRequest) -> Result<ComposedResource, FunctionError> {
        let params = extract_parameters(req)?;
        self.log_parameters(&params);
        Ok(synthesize(&params)?)
    }

    fn log_parameters(&self, params: &FleetManagerParameters) {
        tracing::info!(
            parent: &self.log,
            fleet_name = %params.fleet_name,
            region = %params.region,
            instance_count = params.instance_count,
            environment = %params.environment,
            "Creating fleet manager resource"
        );
    }
}

impl FunctionRunner for FleetManagerFunction {
    fn run_function(&self, req: &RunFunctionRequest) -> RunFunctionResponse {
        tracing::info!(parent: &self.log, tag = req.tag(), "Running function");

        let mut rsp = RunFunctionResponse::to(req, self.config.response_ttl);

        match self.compose(req) {
            Ok(composed) => {
                tracing::debug!(parent: &self.log, name = %composed.name, "Composed resource");
                respond::success(&mut rsp, composed);
            }
            Err(e) => {
                tracing::warn!(parent: &self.log, error = %e, "Function failed");
                respond::fatal(&mut rsp, &e);
            }
        }

        rsp
    }
}
