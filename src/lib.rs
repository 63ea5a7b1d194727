pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod grouping;
pub mod lookup;
pub mod models;
pub mod reporter;

pub use client::{HiveClient, HttpReply, HttpTransport};
pub use config::Config;
pub use error::LookupError;
pub use lookup::{list_all_analyzers, list_available_responders, EntityType};
pub use models::{AnalyzerRecord, ResponderRecord};
pub use reporter::Reporter;

pub type Result<T> = anyhow::Result<T>;
