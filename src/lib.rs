//! Playtest telemetry client: collects free-form key/value playtest
//! variables plus player identity and environment facts, and forwards them
//! to a spreadsheet-backed endpoint over plain HTTP GET requests.
//!
//! Fire-and-forget by design: a lost report is logged and dropped, and no
//! telemetry failure is ever allowed to interrupt the host game.

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod identity;
pub mod platform;
pub mod registry;
pub mod report;
pub mod session;

pub use client::{SheetsClient, SubmitTransport};
pub use config::PlaytestConfig;
pub use error::TelemetryError;
pub use registry::{TelemetryReport, VariableRegistry};
pub use session::PlaytestSession;
