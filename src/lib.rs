pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod runner;

pub use client::AnalyzerClient;
pub use config::Config;
pub use error::{Result, SmokeError};
pub use models::*;
pub use report::{render_report, Outcome};
pub use runner::{check_health, run, Mode};
