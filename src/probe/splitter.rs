//! Splits an `mkvinfo` report into one text block per track

use crate::domain::errors::ParseError;

/// Line ending of a captured report
pub const LINE_ENDING: &str = "\r\n";
/// Filler element lines carrying no track information
pub const VOID_MARKER: &str = "| + EBML void: ";
/// Start of every top-level segment element
pub const SECTION_MARKER: &str = "|+ ";
/// Name the track section starts with
pub const TRACKS_SECTION: &str = "Tracks";
/// Header line opening each track inside the track section
pub const TRACK_MARKER: &str = "| + Track\r\n";

/// Return the track blocks of `report` in source order.
///
/// The section preamble before the first track marker is dropped. A report
/// whose Tracks section holds no track yields an empty list.
pub fn split_tracks(report: &str) -> Result<Vec<String>, ParseError> {
    let filtered = report
        .split(LINE_ENDING)
        .filter(|line| !line.starts_with(VOID_MARKER))
        .collect::<Vec<_>>()
        .join(LINE_ENDING);

    let mut sections = filtered
        .split(SECTION_MARKER)
        .filter(|section| section.starts_with(TRACKS_SECTION));

    let tracks_section = match (sections.next(), sections.next()) {
        (Some(section), None) => section,
        (None, _) => return Err(ParseError::MalformedReport { found: 0 }),
        (Some(_), Some(_)) => {
            return Err(ParseError::MalformedReport {
                found: 2 + sections.count(),
            })
        }
    };

    Ok(tracks_section
        .split(TRACK_MARKER)
        .skip(1)
        .map(str::to_string)
        .collect())
}
