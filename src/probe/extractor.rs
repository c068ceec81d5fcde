//! Reads the typed record out of a single track block

use crate::domain::errors::ParseError;
use crate::domain::model::{FieldPositionTable, TrackRecord, TrackType};

/// Delimiter of first-level properties inside a track block
pub const PROPERTY_MARKER: &str = "|  + ";

/// Classify a track by its type property; `None` for kinds we do not model
pub fn classify(type_property: &str) -> Option<TrackType> {
    TrackType::ALL
        .into_iter()
        .find(|track_type| type_property.starts_with(track_type.type_marker()))
}

/// Parse one block into its kind and record.
///
/// Returns `Ok(None)` for tracks of an unmodeled kind (menus, buttons, ...).
pub fn extract_track(block: &str) -> Result<Option<(TrackType, TrackRecord)>, ParseError> {
    let properties: Vec<&str> = block.split(PROPERTY_MARKER).skip(1).collect();

    let type_property = property(&properties, FieldPositionTable::TYPE_LINE, "track type")?;
    let Some(track_type) = classify(type_property) else {
        return Ok(None);
    };

    let track_number = track_number(properties[FieldPositionTable::HEADER_LINE])?;

    let positions = FieldPositionTable::positions(track_type);
    let codec = token(
        property(&properties, positions.codec_line, "codec")?,
        FieldPositionTable::CODEC_TOKEN,
        "codec",
    )?;
    let language = token(
        property(&properties, positions.language_line, "language")?,
        FieldPositionTable::LANGUAGE_TOKEN,
        "language",
    )?;

    let record = TrackRecord::new(track_number, codec, language)?;
    Ok(Some((track_type, record)))
}

/// Read the container-level track index from a block header.
///
/// The index is the parenthesized token closing the header's first line, e.g.
/// `Track number: 1 (track ID for mkvmerge & mkvextract: 0)` yields 0.
pub fn track_number(header: &str) -> Result<u32, ParseError> {
    let first_line = header.lines().next().unwrap_or_default();
    let malformed = || ParseError::MalformedTrackHeader {
        header: first_line.trim().to_string(),
    };

    let closing = first_line.split_whitespace().last().ok_or_else(malformed)?;
    if !closing.ends_with(')') {
        return Err(malformed());
    }

    closing
        .trim_start_matches('(')
        .trim_end_matches(')')
        .parse::<u32>()
        .map_err(|_| malformed())
}

fn property<'a>(properties: &[&'a str], index: usize, field: &str) -> Result<&'a str, ParseError> {
    properties
        .get(index)
        .copied()
        .ok_or_else(|| ParseError::MalformedTrackBlock {
            reason: format!(
                "{} line {} missing, block has {} properties",
                field,
                index,
                properties.len()
            ),
        })
}

fn token<'a>(line: &'a str, index: usize, field: &str) -> Result<&'a str, ParseError> {
    line.split_whitespace()
        .nth(index)
        .ok_or_else(|| ParseError::MalformedTrackBlock {
            reason: format!("{} token {} missing in '{}'", field, index, line.trim()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(properties: &[&str]) -> String {
        let mut text = String::from("\r\n");
        for property in properties {
            text.push_str(PROPERTY_MARKER);
            text.push_str(property);
            text.push_str("\r\n");
        }
        text
    }

    fn video_block() -> String {
        block(&[
            "Track number: 1 (track ID for mkvmerge & mkvextract: 0)",
            "Track UID: 1",
            "Track type: video",
            "Lacing flag: 0",
            "Minimum cache: 1",
            "Default duration: 41.708ms (23.976 frames/fields per second for a video track)",
            "Codec ID: V_MPEG4/ISO/AVC",
            "Language: eng",
        ])
    }

    #[test]
    fn test_classify_known_types() {
        assert_eq!(classify("Track type: video\r\n"), Some(TrackType::Video));
        assert_eq!(classify("Track type: audio"), Some(TrackType::Audio));
        assert_eq!(classify("Track type: subtitles"), Some(TrackType::Subtitle));
        assert_eq!(classify("Track type: menu"), None);
        assert_eq!(classify("Track UID: 1"), None);
    }

    #[test]
    fn test_extract_video_track() {
        let (track_type, record) = extract_track(&video_block()).unwrap().unwrap();
        assert_eq!(track_type, TrackType::Video);
        assert_eq!(record.track_number, 0);
        assert_eq!(record.codec, "V_MPEG4/ISO/AVC");
        assert_eq!(record.language, "eng");
    }

    #[test]
    fn test_extract_audio_track_uses_audio_offsets() {
        let audio = block(&[
            "Track number: 2 (track ID for mkvmerge & mkvextract: 1)",
            "Track UID: 2",
            "Track type: audio",
            "Default duration: 0.833ms (1200.000 frames/fields per second for a video track)",
            "Name: Surround 7.1",
            "Codec ID: A_TRUEHD",
            "Language: jpn",
        ]);

        let (track_type, record) = extract_track(&audio).unwrap().unwrap();
        assert_eq!(track_type, TrackType::Audio);
        assert_eq!(record.track_number, 1);
        assert_eq!(record.codec, "A_TRUEHD");
        assert_eq!(record.language, "jpn");
    }

    #[test]
    fn test_unrecognized_type_is_skipped() {
        let menu = block(&[
            "Track number: 5 (track ID for mkvmerge & mkvextract: 4)",
            "Track UID: 5",
            "Track type: menu",
        ]);
        assert_eq!(extract_track(&menu), Ok(None));
    }

    #[test]
    fn test_track_number_from_parenthesized_token() {
        assert_eq!(track_number("| + Track (some text) (42)"), Ok(42));
        assert_eq!(
            track_number("Track number: 3 (track ID for mkvmerge & mkvextract: 2)\r\n"),
            Ok(2)
        );
    }

    #[test]
    fn test_track_number_malformed() {
        assert!(matches!(
            track_number("Track number: 3 (track ID for mkvmerge & mkvextract: two)"),
            Err(ParseError::MalformedTrackHeader { .. })
        ));
        assert!(matches!(
            track_number("Track number: 3"),
            Err(ParseError::MalformedTrackHeader { .. })
        ));
        assert!(matches!(
            track_number(""),
            Err(ParseError::MalformedTrackHeader { .. })
        ));
    }

    #[test]
    fn test_malformed_header_fails_recognized_track() {
        let broken = video_block().replace("mkvextract: 0)", "mkvextract: zero)");
        assert!(matches!(
            extract_track(&broken),
            Err(ParseError::MalformedTrackHeader { .. })
        ));
    }

    #[test]
    fn test_short_block_fails() {
        let short = block(&[
            "Track number: 1 (track ID for mkvmerge & mkvextract: 0)",
            "Track UID: 1",
            "Track type: video",
            "Codec ID: V_MPEG4/ISO/AVC",
        ]);
        assert!(matches!(
            extract_track(&short),
            Err(ParseError::MalformedTrackBlock { .. })
        ));
    }

    #[test]
    fn test_nested_properties_stay_with_their_parent() {
        let mut video = video_block();
        video.push_str("|  + Video track\r\n|   + Pixel width: 1920\r\n|   + Pixel height: 1080\r\n");
        let (_, record) = extract_track(&video).unwrap().unwrap();
        assert_eq!(record.language, "eng");
    }
}
