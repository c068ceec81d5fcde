//! Per-track stream handling
//!
//! Maps Matroska codec IDs onto the file extensions and `ffmpeg` decoders the
//! pipeline needs, and track language tags onto OCR languages.

use serde::{Deserialize, Serialize};

pub mod mapper;
pub mod subtitle;

pub use mapper::StreamMapper;
pub use subtitle::OcrLanguageMapper;

/// How the pipeline treats one track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackHandling {
    /// Extract straight into the ready-to-edit directory
    Passthrough,
    /// Extract to the intermediate directory, then transcode to FLAC
    TranscodeFlac,
    /// Extract to the intermediate directory, then OCR to SRT
    OcrToSrt,
}
