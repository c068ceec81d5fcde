//! Episode plan construction

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config_initialization::Settings;
use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::streams::{OcrLanguageMapper, StreamMapper, TrackHandling};

/// Builds an [`EpisodePlan`] from a parsed inventory
#[derive(Debug, Clone)]
pub struct EpisodePlanner {
    mkvextract: String,
    mkvmerge: String,
    ffmpeg: String,
    dotnet: String,
    pgs_to_srt: String,
    intermediate_root: PathBuf,
    ready_root: PathBuf,
    analyze_duration: u64,
    mapper: StreamMapper,
    ocr_languages: OcrLanguageMapper,
}

/// Pending invocations, one list per stage kind, in execution order
#[derive(Default)]
struct StageBuckets {
    subtitle_extract: Vec<ToolInvocation>,
    subtitle_ocr: Vec<ToolInvocation>,
    audio_extract: Vec<ToolInvocation>,
    audio_transcode: Vec<ToolInvocation>,
    video_extract: Vec<ToolInvocation>,
    video_remux: Vec<ToolInvocation>,
}

impl StageBuckets {
    fn into_stages(self) -> Vec<Stage> {
        [
            (StageKind::SubtitleExtract, self.subtitle_extract),
            (StageKind::SubtitleOcr, self.subtitle_ocr),
            (StageKind::AudioExtract, self.audio_extract),
            (StageKind::AudioTranscode, self.audio_transcode),
            (StageKind::VideoExtract, self.video_extract),
            (StageKind::VideoRemux, self.video_remux),
        ]
        .into_iter()
        .filter(|(_, invocations)| !invocations.is_empty())
        .map(|(kind, invocations)| Stage { kind, invocations })
        .collect()
    }
}

impl EpisodePlanner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            mkvextract: settings.tools.mkvextract.clone(),
            mkvmerge: settings.tools.mkvmerge.clone(),
            ffmpeg: settings.tools.ffmpeg.clone(),
            dotnet: settings.tools.dotnet.clone(),
            pgs_to_srt: settings.tools.pgs_to_srt.clone(),
            intermediate_root: settings.paths.intermediate_dir.clone(),
            ready_root: settings.paths.ready_to_edit_dir.clone(),
            analyze_duration: settings.pipeline.analyze_duration,
            mapper: StreamMapper::new(settings.pipeline.transcode_audio_codecs.clone()),
            ocr_languages: OcrLanguageMapper::new(settings.pipeline.ocr_fallback_language.clone()),
        }
    }

    /// Plan every stage for `source`
    pub fn plan(
        &self,
        source: &Path,
        inventory: &ContainerTrackInventory,
    ) -> Result<EpisodePlan, DomainError> {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                DomainError::BadArgs(format!("Invalid input file path: {}", source.display()))
            })?;

        let intermediate_dir = self.intermediate_root.join(&stem);
        let ready_dir = self.ready_root.join(&stem);
        let naming = TrackNaming {
            stem: &stem,
            intermediate_dir: &intermediate_dir,
            ready_dir: &ready_dir,
        };

        let mut buckets = StageBuckets::default();
        let mut outputs = Vec::new();

        self.plan_subtitles(source, inventory, &naming, &mut buckets, &mut outputs);
        self.plan_audio(source, inventory, &naming, &mut buckets, &mut outputs);
        self.plan_video(source, inventory, &naming, &mut buckets, &mut outputs);

        let plan = EpisodePlan {
            source: source.to_path_buf(),
            intermediate_dir: intermediate_dir.clone(),
            ready_dir: ready_dir.clone(),
            stages: buckets.into_stages(),
            outputs,
        };

        debug!(
            "Planned {} commands in {} stages for {}",
            plan.invocation_count(),
            plan.stages.len(),
            source.display()
        );
        Ok(plan)
    }

    fn plan_subtitles(
        &self,
        source: &Path,
        inventory: &ContainerTrackInventory,
        naming: &TrackNaming<'_>,
        buckets: &mut StageBuckets,
        outputs: &mut Vec<PathBuf>,
    ) {
        for track in inventory.subtitles() {
            let extension = StreamMapper::extension(&track.codec);
            match self.mapper.handling(TrackType::Subtitle, track) {
                TrackHandling::OcrToSrt => {
                    let sup = naming.intermediate(track.track_number, extension);
                    let srt = naming.ready(track.track_number, "srt");
                    buckets
                        .subtitle_extract
                        .push(self.extract(source, track.track_number, &sup));
                    buckets.subtitle_ocr.push(
                        ToolInvocation::new(self.dotnet.clone())
                            .arg(self.pgs_to_srt.clone())
                            .arg("--input")
                            .arg(path_arg(&sup))
                            .arg("--output")
                            .arg(path_arg(&srt))
                            .arg("--tesseractlanguage")
                            .arg(self.ocr_languages.tesseract_language(&track.language)),
                    );
                    outputs.push(srt);
                }
                _ => {
                    let target = naming.ready(track.track_number, extension);
                    buckets
                        .subtitle_extract
                        .push(self.extract(source, track.track_number, &target));
                    outputs.push(target);
                }
            }
        }
    }

    fn plan_audio(
        &self,
        source: &Path,
        inventory: &ContainerTrackInventory,
        naming: &TrackNaming<'_>,
        buckets: &mut StageBuckets,
        outputs: &mut Vec<PathBuf>,
    ) {
        for track in inventory.audio() {
            let extension = StreamMapper::extension(&track.codec);
            match self.mapper.handling(TrackType::Audio, track) {
                TrackHandling::TranscodeFlac => {
                    let raw = naming.intermediate(track.track_number, extension);
                    let flac = naming.ready(track.track_number, "flac");
                    buckets
                        .audio_extract
                        .push(self.extract(source, track.track_number, &raw));

                    let mut transcode = ToolInvocation::new(self.ffmpeg.clone())
                        .arg("-y")
                        .arg("-analyzeduration")
                        .arg(self.analyze_duration.to_string());
                    if let Some(decoder) = StreamMapper::ffmpeg_decoder(&track.codec) {
                        transcode = transcode.arg("-acodec").arg(decoder);
                    }
                    buckets.audio_transcode.push(
                        transcode
                            .arg("-i")
                            .arg(path_arg(&raw))
                            .args(["-vn", "-sn", "-acodec", "flac"])
                            .arg(path_arg(&flac)),
                    );
                    outputs.push(flac);
                }
                _ => {
                    let target = naming.ready(track.track_number, extension);
                    buckets
                        .audio_extract
                        .push(self.extract(source, track.track_number, &target));
                    outputs.push(target);
                }
            }
        }
    }

    /// The first video track is split off with mkvmerge and remuxed to MP4
    /// without re-encoding
    fn plan_video(
        &self,
        source: &Path,
        inventory: &ContainerTrackInventory,
        naming: &TrackNaming<'_>,
        buckets: &mut StageBuckets,
        outputs: &mut Vec<PathBuf>,
    ) {
        let Some(video) = inventory.video().first() else {
            return;
        };

        let mkv = naming.intermediate(video.track_number, "mkv");
        let mp4 = naming.ready(video.track_number, "mp4");

        buckets.video_extract.push(
            ToolInvocation::new(self.mkvmerge.clone())
                .arg("-o")
                .arg(path_arg(&mkv))
                .arg("--video-tracks")
                .arg(video.track_number.to_string())
                .args(["--no-audio", "--no-subtitles"])
                .arg(path_arg(source))
                .warning_exit_code(MKVTOOLNIX_WARNING_EXIT),
        );
        buckets.video_remux.push(
            ToolInvocation::new(self.ffmpeg.clone())
                .arg("-y")
                .arg("-i")
                .arg(path_arg(&mkv))
                .args(["-c", "copy"])
                .arg(path_arg(&mp4)),
        );
        outputs.push(mp4);
    }

    fn extract(&self, source: &Path, track_number: u32, target: &Path) -> ToolInvocation {
        ToolInvocation::new(self.mkvextract.clone())
            .arg(path_arg(source))
            .arg("tracks")
            .arg(format!("{}:{}", track_number, target.to_string_lossy()))
            .warning_exit_code(MKVTOOLNIX_WARNING_EXIT)
    }
}

/// Output file naming shared by every stage of one episode
struct TrackNaming<'a> {
    stem: &'a str,
    intermediate_dir: &'a Path,
    ready_dir: &'a Path,
}

impl TrackNaming<'_> {
    fn file_name(&self, track_number: u32, extension: &str) -> String {
        format!("{}_Track_{}.{}", self.stem, track_number, extension)
    }

    fn intermediate(&self, track_number: u32, extension: &str) -> PathBuf {
        self.intermediate_dir.join(self.file_name(track_number, extension))
    }

    fn ready(&self, track_number: u32, extension: &str) -> PathBuf {
        self.ready_dir.join(self.file_name(track_number, extension))
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
