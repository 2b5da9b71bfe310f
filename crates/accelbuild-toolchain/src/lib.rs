//! C toolchain backend for accelbuild.
//!
//! This crate owns everything that touches a real compiler: discovery and
//! probing ([`compiler`]), command-line assembly and process invocation
//! ([`invoke`]), the error taxonomy with its classification step
//! ([`error`]), and the resilient orchestrator that ties them together
//! ([`orchestrator`]).
//!
//! The central contract: a build invocation only returns `Err` for
//! unrecognized failures. Everything in the recognized set is downgraded to
//! a warning in the returned [`BuildReport`] and the invocation still
//! succeeds.

pub mod compiler;
pub mod error;
pub mod invoke;
pub mod orchestrator;

pub use compiler::{find_compiler, probe, resolve, ResolvedCompiler};
pub use error::{ToolchainError, ToolchainResult};
pub use orchestrator::{BuildOptions, Orchestrator, OrchestratorConfig};

pub use accelbuild_spec::report::BuildReport;
