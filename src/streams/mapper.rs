//! Codec ID mapping utilities

use crate::domain::model::{TrackRecord, TrackType};
use crate::streams::TrackHandling;

/// Image-based subtitle codec that needs OCR before editing
pub const PGS_CODEC: &str = "S_HDMV/PGS";

/// Decides file extensions and processing for parsed tracks
#[derive(Debug, Clone)]
pub struct StreamMapper {
    transcode_audio_codecs: Vec<String>,
}

impl StreamMapper {
    /// Create a mapper that transcodes the given audio codec IDs to FLAC
    pub fn new(transcode_audio_codecs: Vec<String>) -> Self {
        Self {
            transcode_audio_codecs,
        }
    }

    /// Processing applied to `track`
    pub fn handling(&self, track_type: TrackType, track: &TrackRecord) -> TrackHandling {
        match track_type {
            TrackType::Subtitle if track.codec == PGS_CODEC => TrackHandling::OcrToSrt,
            TrackType::Audio
                if self
                    .transcode_audio_codecs
                    .iter()
                    .any(|codec| codec.eq_ignore_ascii_case(&track.codec)) =>
            {
                TrackHandling::TranscodeFlac
            }
            _ => TrackHandling::Passthrough,
        }
    }

    /// Extension `mkvextract` output should carry for a codec ID
    pub fn extension(codec: &str) -> &'static str {
        match codec {
            "A_TRUEHD" => "truehd",
            "A_AC3" | "A_EAC3" => "ac3",
            "A_DTS" => "dts",
            "A_FLAC" => "flac",
            "A_OPUS" => "opus",
            "A_VORBIS" => "ogg",
            "A_MPEG/L3" => "mp3",
            "A_PCM/INT/LIT" => "wav",
            "S_HDMV/PGS" => "sup",
            "S_TEXT/UTF8" => "srt",
            "S_TEXT/ASS" => "ass",
            "S_TEXT/SSA" => "ssa",
            "S_VOBSUB" => "sub",
            "V_MPEG4/ISO/AVC" => "h264",
            "V_MPEGH/ISO/HEVC" => "h265",
            "V_MPEG2" => "m2v",
            codec if codec.starts_with("A_AAC") => "aac",
            _ => "bin",
        }
    }

    /// `ffmpeg` decoder to force for raw elementary streams lacking a container
    pub fn ffmpeg_decoder(codec: &str) -> Option<&'static str> {
        match codec {
            "A_TRUEHD" => Some("truehd"),
            "A_DTS" => Some("dca"),
            "A_AC3" => Some("ac3"),
            "A_EAC3" => Some("eac3"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(codec: &str) -> TrackRecord {
        TrackRecord::new(1, codec, "eng").unwrap()
    }

    #[test]
    fn test_handling() {
        let mapper = StreamMapper::new(vec!["A_TRUEHD".to_string()]);
        assert_eq!(
            mapper.handling(TrackType::Audio, &track("A_TRUEHD")),
            TrackHandling::TranscodeFlac
        );
        assert_eq!(
            mapper.handling(TrackType::Audio, &track("A_AC3")),
            TrackHandling::Passthrough
        );
        assert_eq!(
            mapper.handling(TrackType::Subtitle, &track("S_HDMV/PGS")),
            TrackHandling::OcrToSrt
        );
        assert_eq!(
            mapper.handling(TrackType::Subtitle, &track("S_TEXT/UTF8")),
            TrackHandling::Passthrough
        );
    }

    #[test]
    fn test_extensions() {
        assert_eq!(StreamMapper::extension("A_TRUEHD"), "truehd");
        assert_eq!(StreamMapper::extension("A_AAC/MPEG4/LC"), "aac");
        assert_eq!(StreamMapper::extension("S_HDMV/PGS"), "sup");
        assert_eq!(StreamMapper::extension("X_UNKNOWN"), "bin");
    }

    #[test]
    fn test_decoders() {
        assert_eq!(StreamMapper::ffmpeg_decoder("A_TRUEHD"), Some("truehd"));
        assert_eq!(StreamMapper::ffmpeg_decoder("A_FLAC"), None);
    }
}
