// ABOUTME: tox invocation crate: environment listing and run-command construction
// ABOUTME: Wraps the external tox executable behind an async listing trait

pub mod envs;
pub mod error;
pub mod runner;

pub use envs::{EnvName, parse_env_list};
pub use error::{Result, RunnerError};
pub use runner::{DEFAULT_PROGRAM, EnvLister, ToxRunner};
