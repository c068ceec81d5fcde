//! `mkvinfo` report parsing
//!
//! Turns the human-readable element dump printed by `mkvinfo` into a
//! [`ContainerTrackInventory`]. Parsing is purely positional: see
//! [`FieldPositionTable`](crate::domain::model::FieldPositionTable).

use crate::domain::errors::ParseError;
use crate::domain::model::ContainerTrackInventory;

pub mod extractor;
pub mod splitter;

pub use extractor::{classify, extract_track, track_number};
pub use splitter::{split_tracks, LINE_ENDING};

/// Parse a CRLF-delimited `mkvinfo` report.
///
/// Tracks of unmodeled kinds are left out silently. Any other problem aborts
/// the whole parse.
pub fn parse_report(report: &str) -> Result<ContainerTrackInventory, ParseError> {
    let mut tracks = Vec::new();
    for block in split_tracks(report)? {
        if let Some(track) = extract_track(&block)? {
            tracks.push(track);
        }
    }
    Ok(ContainerTrackInventory::from_tracks(tracks))
}

/// Re-terminate every line of captured tool output with [`LINE_ENDING`]
pub fn normalize_line_endings(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len() + raw.len() / 16);
    for line in raw.lines() {
        normalized.push_str(line);
        normalized.push_str(LINE_ENDING);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TrackType;

    const REPORT: &str = "+ EBML head\n\
|+ Document type: matroska\n\
+ Segment: size 5032940127\n\
|+ Segment information\n\
| + Duration: 00:23:40.044000000\n\
|+ Tracks\n\
| + Track\n\
|  + Track number: 1 (track ID for mkvmerge & mkvextract: 0)\n\
|  + Track UID: 1\n\
|  + Track type: video\n\
|  + Lacing flag: 0\n\
|  + Minimum cache: 1\n\
|  + Default duration: 41.708ms (23.976 frames/fields per second for a video track)\n\
|  + Codec ID: V_MPEG4/ISO/AVC\n\
|  + Language: eng\n\
| + EBML void: size 4\n\
| + Track\n\
|  + Track number: 2 (track ID for mkvmerge & mkvextract: 1)\n\
|  + Track UID: 2\n\
|  + Track type: audio\n\
|  + Default duration: 0.833ms (1200.000 frames/fields per second for a video track)\n\
|  + Name: Surround 7.1\n\
|  + Codec ID: A_TRUEHD\n\
|  + Language: jpn\n\
| + Track\n\
|  + Track number: 3 (track ID for mkvmerge & mkvextract: 2)\n\
|  + Track UID: 3\n\
|  + Track type: subtitles\n\
|  + Lacing flag: 0\n\
|  + Name: English\n\
|  + Codec ID: S_HDMV/PGS\n\
|  + Language: eng\n\
| + Track\n\
|  + Track number: 4 (track ID for mkvmerge & mkvextract: 3)\n\
|  + Track UID: 4\n\
|  + Track type: buttons\n\
|+ Chapters\n\
| + Edition entry\n";

    #[test]
    fn test_parse_report() {
        let inventory = parse_report(&normalize_line_endings(REPORT)).unwrap();

        assert_eq!(inventory.total_tracks(), 3);
        assert_eq!(inventory.video()[0].track_number, 0);
        assert_eq!(inventory.audio()[0].codec, "A_TRUEHD");
        assert_eq!(inventory.audio()[0].language, "jpn");
        assert_eq!(inventory.tracks(TrackType::Subtitle)[0].codec, "S_HDMV/PGS");
    }

    #[test]
    fn test_void_lines_do_not_change_result() {
        let stripped: String = REPORT
            .lines()
            .filter(|line| !line.starts_with("| + EBML void"))
            .map(|line| format!("{}\n", line))
            .collect();

        assert_eq!(
            parse_report(&normalize_line_endings(REPORT)).unwrap(),
            parse_report(&normalize_line_endings(&stripped)).unwrap()
        );
    }

    #[test]
    fn test_lf_report_finds_no_tracks_until_normalized() {
        let inventory = parse_report(REPORT).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_report_without_tracks_section() {
        let report = normalize_line_endings("+ Segment: size 1\n|+ Segment information\n");
        assert_eq!(
            parse_report(&report),
            Err(ParseError::MalformedReport { found: 0 })
        );
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\nb\r\nc"), "a\r\nb\r\nc\r\n");
        assert_eq!(normalize_line_endings(""), "");
    }
}
