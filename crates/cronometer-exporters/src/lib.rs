#![doc = include_str!("../README.md")]

mod api;
mod error;
mod exporter_client;
mod models;
mod parsers;

pub use api::ExportKind;
pub use error::ExportError;
pub use exporter_client::{ExporterClient, ExporterClientExt};
pub use models::{BiometricEntry, DailyNutrition, Exercise, Note, Serving};
