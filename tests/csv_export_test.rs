//! CSV export integration tests

use gbfetch::report::{export_summary, write_csv};
use gbfetch::SequenceSummary;
use std::fs;
use tempfile::tempdir;

fn row(accession: &str, length: u64, description: &str) -> SequenceSummary {
    SequenceSummary {
        accession: accession.to_string(),
        length,
        description: description.to_string(),
    }
}

#[test]
fn csv_round_trip_preserves_rows_and_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output.csv");

    let rows = vec![
        row("AB000001.1", 1200, "Homo sapiens mRNA for example protein"),
        row("AB000002.1", 800, "Homo sapiens partial cds, clone 2"),
        row("AB000003.1", 950, "Description, with a comma"),
    ];
    write_csv(&rows, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let read_back: Vec<SequenceSummary> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(read_back, rows);
}

#[test]
fn csv_header_matches_the_three_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output.csv");

    write_csv(&[row("X.1", 10, "x")], &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, "Accession,Length,Description");
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn csv_row_count_equals_filtered_record_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output.csv");

    let rows: Vec<_> = (0..7)
        .map(|idx| row(&format!("N{}.1", idx), 100 + idx, "fixture"))
        .collect();
    write_csv(&rows, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), rows.len() + 1);
}

#[test]
fn existing_file_is_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output.csv");

    write_csv(&[row("OLD.1", 1, "old"), row("OLD.2", 2, "old")], &path).unwrap();
    write_csv(&[row("NEW.1", 3, "new")], &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("NEW.1"));
    assert!(!text.contains("OLD.1"));
}

#[test]
fn empty_filtered_set_produces_no_files() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("output.csv");
    let plot_path = dir.path().join("plot.png");

    let written = export_summary(&[], &csv_path, &plot_path).unwrap();

    assert!(!written);
    assert!(!csv_path.exists());
    assert!(!plot_path.exists());
}
