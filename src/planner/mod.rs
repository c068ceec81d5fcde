//! Per-container pipeline planning
//!
//! Builds the ordered stages of tool invocations that split one container
//! into per-track files. Planning never touches the filesystem, so a plan can
//! be printed for a dry run or handed to an [`ExecutePort`](crate::ports::ExecutePort).

pub mod episode;

pub use episode::EpisodePlanner;
