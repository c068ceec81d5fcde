// Unit tests for title selection and naming rules

use std::path::{Path, PathBuf};

use super::*;

const MIB: u64 = 1024 * 1024;

fn window() -> SizeWindow {
    SizeWindow::from_megabytes(4608, 9216).unwrap()
}

fn entry(name: &str, size_mb: u64) -> FileEntry {
    FileEntry {
        path: PathBuf::from("/rips/Disc_1").join(name),
        size: size_mb * MIB,
    }
}

fn names(files: &[FileEntry]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_underscored() {
    assert_eq!(NamingRules::underscored("Black Clover Disc 1"), "Black_Clover_Disc_1");
    assert_eq!(NamingRules::underscored("plain"), "plain");
}

#[test]
fn test_processing_name() {
    assert_eq!(
        NamingRules::processing_name("Black Clover - S01E0001 - Asta and Yuno.mkv"),
        "Black_Clover-S01E0001-Asta_and_Yuno.mkv"
    );
}

#[test]
fn test_title_number() {
    assert_eq!(NamingRules::title_number(Path::new("/a/title_t07.mkv")), Some(7));
    assert_eq!(NamingRules::title_number(Path::new("B1_t12.mkv")), Some(12));
    assert_eq!(NamingRules::title_number(Path::new("extras.mkv")), None);
    assert_eq!(NamingRules::title_number(Path::new("7.mkv")), None);
}

#[test]
fn test_selects_consecutive_titles_in_window() {
    let files = vec![
        entry("title_t00.mkv", 30_000),
        entry("title_t01.mkv", 5_000),
        entry("title_t02.mkv", 5_100),
        entry("title_t03.mkv", 200),
        entry("title_t04.mkv", 5_200),
    ];

    let selected = EpisodeSelector::select_consecutive(&files, window());
    assert_eq!(names(&selected), vec!["title_t01.mkv", "title_t02.mkv"]);
}

#[test]
fn test_first_break_stops_selection() {
    let files = vec![
        entry("title_t01.mkv", 5_000),
        entry("title_t03.mkv", 5_000),
        entry("title_t02.mkv", 5_000),
    ];

    let selected = EpisodeSelector::select_consecutive(&files, window());
    assert_eq!(names(&selected), vec!["title_t01.mkv"]);
}

#[test]
fn test_window_bounds_are_exclusive() {
    let files = vec![entry("title_t01.mkv", 4608), entry("title_t02.mkv", 9216)];
    assert!(EpisodeSelector::select_consecutive(&files, window()).is_empty());
}

#[test]
fn test_disc_count_validation() {
    let disc = Path::new("/rips/Disc_2");
    assert!(DiscCountValidator::validate(disc, 1, 4, &[6, 4]).is_ok());
    assert!(DiscCountValidator::validate(disc, 5, 9, &[]).is_ok());
    assert!(matches!(
        DiscCountValidator::validate(disc, 1, 3, &[6, 4]),
        Err(DomainError::ValidationFailed(_))
    ));
    assert!(matches!(
        DiscCountValidator::validate(disc, 2, 3, &[6, 4]),
        Err(DomainError::ValidationFailed(_))
    ));
}

#[test]
fn test_assignment_uses_catalog_titles() {
    let catalog = EpisodeCatalog::from_entries(&[
        EpisodeEntry {
            number: 1,
            title: "Show - S01E0001 - Pilot.mkv".to_string(),
        },
        EpisodeEntry {
            number: 2,
            title: "Show - S01E0002 - Second.mkv".to_string(),
        },
    ])
    .unwrap();
    let selected = vec![entry("title_t01.mkv", 5_000), entry("title_t02.mkv", 5_000)];

    let assignments = EpisodeAssigner::assign(
        &selected,
        &catalog,
        Path::new("/library/Show"),
        Path::new("/work/1_ToBeProcessed"),
    )
    .unwrap();

    assert_eq!(assignments[1].episode, 2);
    assert_eq!(
        assignments[1].library_copy,
        PathBuf::from("/library/Show/Show - S01E0002 - Second.mkv")
    );
    assert_eq!(
        assignments[1].queue_entry,
        PathBuf::from("/work/1_ToBeProcessed/Show-S01E0002-Second.mkv")
    );
}

#[test]
fn test_assignment_fails_without_title() {
    let catalog = EpisodeCatalog::default();
    let result = EpisodeAssigner::assign(
        &[entry("title_t01.mkv", 5_000)],
        &catalog,
        Path::new("/library"),
        Path::new("/queue"),
    );
    assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
}
