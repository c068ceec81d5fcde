// Domain models - Core types and data structures

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, ParseError};


/// Kind of elementary stream described by a track block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Video,
    Audio,
    Subtitle,
}

impl TrackType {
    /// Prefix of the type property that identifies this kind in `mkvinfo` output
    pub const fn type_marker(self) -> &'static str {
        match self {
            TrackType::Video => "Track type: video",
            TrackType::Audio => "Track type: audio",
            TrackType::Subtitle => "Track type: subtitles",
        }
    }

    pub const ALL: [TrackType; 3] = [TrackType::Video, TrackType::Audio, TrackType::Subtitle];
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrackType::Video => "video",
            TrackType::Audio => "audio",
            TrackType::Subtitle => "subtitle",
        };
        f.pad(name)
    }
}

/// Line offsets of the codec and language properties inside a track block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPositions {
    pub codec_line: usize,
    pub language_line: usize,
}

/// Positional layout of an `mkvinfo` track block.
///
/// `mkvinfo` prints properties in a fixed order for a given tool version, so
/// fields are addressed by line offset and whitespace token index rather than
/// by label. Offsets count properties after the leading empty element of the
/// block has been dropped.
pub struct FieldPositionTable;

impl FieldPositionTable {
    /// Property holding "Track number: N (track ID for mkvmerge & mkvextract: M)"
    pub const HEADER_LINE: usize = 0;
    /// Property holding "Track type: ..." for every kind of track
    pub const TYPE_LINE: usize = 2;
    /// Token of the codec line holding the codec ID ("Codec ID: V_MPEG4/ISO/AVC")
    pub const CODEC_TOKEN: usize = 2;
    /// Token of the language line holding the tag ("Language: eng")
    pub const LANGUAGE_TOKEN: usize = 1;

    pub const fn positions(track_type: TrackType) -> FieldPositions {
        match track_type {
            TrackType::Video => FieldPositions {
                codec_line: 6,
                language_line: 7,
            },
            TrackType::Audio | TrackType::Subtitle => FieldPositions {
                codec_line: 5,
                language_line: 6,
            },
        }
    }
}

/// Metadata of one track, as read from its block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_number: u32,
    pub codec: String,
    pub language: String,
}

impl TrackRecord {
    /// Create a record; codec and language must be non-empty
    pub fn new(
        track_number: u32,
        codec: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let codec = codec.into();
        let language = language.into();

        if codec.is_empty() {
            return Err(ParseError::MalformedTrackBlock {
                reason: format!("track {} has an empty codec", track_number),
            });
        }
        if language.is_empty() {
            return Err(ParseError::MalformedTrackBlock {
                reason: format!("track {} has an empty language", track_number),
            });
        }

        Ok(Self {
            track_number,
            codec,
            language,
        })
    }
}

/// Every recognized track of one container, grouped by kind in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTrackInventory {
    video: Vec<TrackRecord>,
    audio: Vec<TrackRecord>,
    subtitles: Vec<TrackRecord>,
}

impl ContainerTrackInventory {
    /// Build an inventory from classified records, keeping their order
    pub fn from_tracks<I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = (TrackType, TrackRecord)>,
    {
        let mut inventory = Self::default();
        for (track_type, record) in tracks {
            match track_type {
                TrackType::Video => inventory.video.push(record),
                TrackType::Audio => inventory.audio.push(record),
                TrackType::Subtitle => inventory.subtitles.push(record),
            }
        }
        inventory
    }

    pub fn video(&self) -> &[TrackRecord] {
        &self.video
    }

    pub fn audio(&self) -> &[TrackRecord] {
        &self.audio
    }

    pub fn subtitles(&self) -> &[TrackRecord] {
        &self.subtitles
    }

    pub fn tracks(&self, track_type: TrackType) -> &[TrackRecord] {
        match track_type {
            TrackType::Video => &self.video,
            TrackType::Audio => &self.audio,
            TrackType::Subtitle => &self.subtitles,
        }
    }

    pub fn total_tracks(&self) -> usize {
        self.video.len() + self.audio.len() + self.subtitles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_tracks() == 0
    }
}

/// Exit code MKVToolNix programs use for "completed with warnings"
pub const MKVTOOLNIX_WARNING_EXIT: i32 = 1;

/// A single external program call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Non-zero exit codes meaning "finished with warnings"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warning_exit_codes: Vec<i32>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            warning_exit_codes: Vec::new(),
        }
    }

    /// Treat exit `code` as success with warnings (MKVToolNix exits 1)
    pub fn warning_exit_code(mut self, code: i32) -> Self {
        self.warning_exit_codes.push(code);
        self
    }

    pub fn is_warning_exit(&self, code: Option<i32>) -> bool {
        code.is_some_and(|code| self.warning_exit_codes.contains(&code))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Pipeline step; all invocations of a stage finish before the next starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    SubtitleExtract,
    SubtitleOcr,
    AudioExtract,
    AudioTranscode,
    VideoExtract,
    VideoRemux,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::SubtitleExtract => "subtitle-extract",
            StageKind::SubtitleOcr => "subtitle-ocr",
            StageKind::AudioExtract => "audio-extract",
            StageKind::AudioTranscode => "audio-transcode",
            StageKind::VideoExtract => "video-extract",
            StageKind::VideoRemux => "video-remux",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub kind: StageKind,
    pub invocations: Vec<ToolInvocation>,
}

/// Everything needed to split one container into per-track files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodePlan {
    pub source: PathBuf,
    pub intermediate_dir: PathBuf,
    pub ready_dir: PathBuf,
    pub stages: Vec<Stage>,
    /// Final files left in `ready_dir` once every stage has run
    pub outputs: Vec<PathBuf>,
}

impl EpisodePlan {
    pub fn invocation_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.invocations.len()).sum()
    }
}

/// One row of the episode title table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    pub number: u32,
    pub title: String,
}

/// Immutable episode-number to file-title mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeCatalog {
    titles: BTreeMap<u32, String>,
}

impl EpisodeCatalog {
    /// Build the catalog, rejecting duplicate numbers and empty titles
    pub fn from_entries(entries: &[EpisodeEntry]) -> Result<Self, DomainError> {
        let mut titles = BTreeMap::new();
        for entry in entries {
            if entry.title.trim().is_empty() {
                return Err(DomainError::ConfigError(format!(
                    "Episode {} has an empty title",
                    entry.number
                )));
            }
            if titles.insert(entry.number, entry.title.clone()).is_some() {
                return Err(DomainError::ConfigError(format!(
                    "Episode {} is listed more than once",
                    entry.number
                )));
            }
        }
        Ok(Self { titles })
    }

    pub fn title(&self, number: u32) -> Option<&str> {
        self.titles.get(&number).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// A directory entry with the size title selection filters on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Open byte-size interval used to pick main-feature titles out of a rip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeWindow {
    pub min_bytes: u64,
    pub max_bytes: u64,
}

impl SizeWindow {
    pub fn new(min_bytes: u64, max_bytes: u64) -> Result<Self, DomainError> {
        if min_bytes >= max_bytes {
            return Err(DomainError::ConfigError(format!(
                "Size window minimum ({}) must be below maximum ({})",
                min_bytes, max_bytes
            )));
        }
        Ok(Self {
            min_bytes,
            max_bytes,
        })
    }

    pub fn from_megabytes(min_mb: u64, max_mb: u64) -> Result<Self, DomainError> {
        Self::new(Self::megabytes_to_bytes(min_mb)?, Self::megabytes_to_bytes(max_mb)?)
    }

    fn megabytes_to_bytes(mb: u64) -> Result<u64, DomainError> {
        mb.checked_mul(1024 * 1024).ok_or_else(|| {
            DomainError::ConfigError(format!("Size of {} MiB does not fit in 64 bits", mb))
        })
    }

    /// Both bounds are exclusive
    pub fn contains(&self, size: u64) -> bool {
        self.min_bytes < size && size < self.max_bytes
    }
}
