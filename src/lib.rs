//! # xfleetmanager: XFleetManager Composition Function
//!
//! Turns an XFleetManager composite into a single fleet manager resource.
//! Each invocation is a pure transform from one request document to one
//! response document:
//!
//! 1. **Extract**: read `spec.parameters` from the observed composite, checking
//!    required fields in order and defaulting the optional ones
//! 2. **Synthesize**: build a `NopResource` named `<fleetName>-fleet-manager`
//!    that embeds the parameters and becomes Ready after a fixed delay
//! 3. **Respond**: add the resource to the desired state and mark success, or
//!    attach a fatal result naming what went wrong
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use xfleetmanager::{FleetManagerFunction, FunctionRunner, Outcome, RunFunctionRequest};
//!
//! let req: RunFunctionRequest = serde_json::from_value(json!({
//!     "observed": {"composite": {"resource": {"spec": {"parameters": {
//!         "fleetName": "prod-web",
//!         "region": "us-east-1"
//!     }}}}}
//! })).unwrap();
//!
//! let rsp = FleetManagerFunction::default().run_function(&req);
//! assert_eq!(rsp.outcome(), Outcome::Success);
//! assert!(rsp.desired_resource("prod-web-fleet-manager").is_some());
//! ```

// Request/response wire model
pub mod protocol;
pub mod document;

// Transform stages
pub mod input;
pub mod extract;
pub mod synthesize;
pub mod respond;

pub mod config;
pub mod error;
pub mod function;

// Re-export key types
pub use config::FunctionConfig;
pub use error::{FunctionError, SerializationError, ValidationError};
pub use function::{FleetManagerFunction, FunctionRunner};
pub use input::FleetManagerParameters;
pub use protocol::{Outcome, RunFunctionRequest, RunFunctionResponse};
pub use synthesize::ComposedResource;
