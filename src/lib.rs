//! ripsplit library
//!
//! Parses `mkvinfo` track listings and drives the MKVToolNix, ffmpeg and
//! PgsToSrt tools that split ripped episodes into edit-ready tracks.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod output;
pub mod planner;
pub mod ports;
pub mod probe;
pub mod streams;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{DomainError, ParseError};
pub use domain::model::{ContainerTrackInventory, TrackRecord, TrackType};
pub use probe::parse_report;
