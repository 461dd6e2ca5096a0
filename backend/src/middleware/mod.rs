//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod auth_gate;
pub mod trace;

pub use auth_gate::{AuthGate, AuthenticatedUser, GateOutcome, GateRejection, evaluate};
pub use trace::Trace;
