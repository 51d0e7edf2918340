//! Client-side analytics tracking core: turns structured activities into the
//! ordered key/value parameter sets a remote collection protocol expects, and
//! persists small pieces of client state between application runs. Transport
//! of the produced parameters is a separate concern and lives elsewhere.

pub mod activities;
pub mod app_config;
pub mod environment;
pub mod errors;
pub mod internal_logger;
pub mod processing;
pub mod services;
pub mod storage;

pub use activities::Activity;
pub use environment::{DisplayMetrics, EnvironmentSnapshot};
pub use errors::AppError;
pub use processing::parameter_mapper::{ActivityParameterMapper, ParameterPairs};
pub use services::session::{ActivityTracker, SessionState};
pub use storage::state_store::StateStore;
