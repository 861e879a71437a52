//! Scoring strategies behind one async interface: the in-process engine
//! from `saju-core` and a client for the external scoring service.

pub mod config;
pub mod error;
pub mod remote;
pub mod strategy;

pub use config::{RemoteConfig, ServiceConfig, Strategy};
pub use error::{ConfigError, UpstreamError};
pub use remote::RemoteScorer;
pub use strategy::{CompatibilityScorer, LocalScorer, build_scorer};
