//! Plain-text summaries

use std::fmt::Write;

use crate::app::process_interactor::EpisodeStatus;
use crate::app::{InspectResponse, OrganizeResponse, ProcessReport};
use crate::domain::model::{ContainerTrackInventory, EpisodePlan, TrackType};
use crate::output::Render;

impl Render for InspectResponse {
    fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.source.display());
        write_inventory(&mut out, &self.inventory);
        out
    }
}

impl Render for ProcessReport {
    fn render_text(&self) -> String {
        let mut out = String::new();
        for episode in &self.episodes {
            let status = match episode.status {
                EpisodeStatus::Planned => "planned",
                EpisodeStatus::Completed => "done",
                EpisodeStatus::Failed => "FAILED",
            };
            let _ = writeln!(
                out,
                "[{}] {} ({:.1}s)",
                status,
                episode.source.display(),
                episode.elapsed_seconds
            );
            if let Some(inventory) = &episode.inventory {
                write_inventory(&mut out, inventory);
            }
            if let Some(plan) = &episode.plan {
                if self.dry_run {
                    write_plan(&mut out, plan);
                }
            }
            if let Some(error) = &episode.error {
                let _ = writeln!(out, "  error: {}", error);
            }
        }
        let _ = writeln!(
            out,
            "{} containers, {} failed ({} to {})",
            self.episodes.len(),
            self.failed(),
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.finished_at.format("%H:%M:%S")
        );
        out
    }
}

impl Render for OrganizeResponse {
    fn render_text(&self) -> String {
        let mut out = String::new();
        for disc in &self.discs {
            let _ = writeln!(out, "{}: {} titles", disc.disc.display(), disc.selected.len());
        }
        for assignment in &self.assignments {
            let _ = writeln!(
                out,
                "{:>4}  {}  ->  {}",
                assignment.episode,
                assignment.source.display(),
                assignment.queue_entry.display()
            );
        }
        if self.dry_run {
            out.push_str("dry run: no files were copied or moved\n");
        }
        out
    }
}

fn write_inventory(out: &mut String, inventory: &ContainerTrackInventory) {
    for track_type in TrackType::ALL {
        for track in inventory.tracks(track_type) {
            let _ = writeln!(
                out,
                "  {:<8} #{:<3} {:<20} {}",
                track_type, track.track_number, track.codec, track.language
            );
        }
    }
}

fn write_plan(out: &mut String, plan: &EpisodePlan) {
    for stage in &plan.stages {
        let _ = writeln!(out, "  {}:", stage.kind);
        for invocation in &stage.invocations {
            let _ = writeln!(out, "    {}", invocation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TrackRecord;
    use std::path::PathBuf;

    #[test]
    fn test_inventory_text_lists_tracks_by_kind() {
        let response = InspectResponse {
            source: PathBuf::from("ep.mkv"),
            inventory: ContainerTrackInventory::from_tracks(vec![
                (TrackType::Subtitle, TrackRecord::new(3, "S_HDMV/PGS", "eng").unwrap()),
                (TrackType::Video, TrackRecord::new(0, "V_MPEG4/ISO/AVC", "und").unwrap()),
            ]),
        };

        let text = response.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ep.mkv");
        assert!(lines[1].contains("video") && lines[1].contains("V_MPEG4/ISO/AVC"));
        assert!(lines[2].contains("subtitle") && lines[2].contains("#3"));
    }
}
