//! Length-filter invariants over parsed GenBank batches

use gbfetch::formats::genbank::GenBankRecord;
use gbfetch::summary::{filter_by_length, sort_for_plot};
use gbfetch::Result;
use proptest::prelude::*;

fn record(accession: &str, length: usize) -> Result<GenBankRecord> {
    Ok(GenBankRecord {
        locus: accession.to_string(),
        definition: format!("{} integration fixture", accession),
        accession: accession.to_string(),
        version: format!("{}.1", accession),
        sequence: "acgt".repeat(length / 4) + &"a".repeat(length % 4),
    })
}

#[test]
fn boundary_lengths_are_retained() {
    let records = vec![
        record("EDGE_LOW", 600),
        record("BELOW", 599),
        record("EDGE_HIGH", 1300),
        record("ABOVE", 1301),
    ];
    let filtered = filter_by_length(records, 600, 1300).unwrap();
    let ids: Vec<&str> = filtered.iter().map(|r| r.accession.as_str()).collect();
    assert_eq!(ids, vec!["EDGE_LOW.1", "EDGE_HIGH.1"]);
}

#[test]
fn filtered_set_is_subset_in_retrieval_order() {
    let lengths = [500usize, 1200, 800, 50, 950];
    let records: Vec<_> = lengths
        .iter()
        .enumerate()
        .map(|(idx, len)| record(&format!("R{}", idx), *len))
        .collect();

    let filtered = filter_by_length(records, 600, 1300).unwrap();
    let ids: Vec<&str> = filtered.iter().map(|r| r.accession.as_str()).collect();
    assert_eq!(ids, vec!["R1.1", "R2.1", "R4.1"]);
    assert_eq!(
        filtered.iter().map(|r| r.length).collect::<Vec<_>>(),
        vec![1200, 800, 950]
    );
}

#[test]
fn plot_order_is_independent_of_csv_order() {
    let records = vec![record("P0", 800), record("P1", 1200), record("P2", 950)];
    let filtered = filter_by_length(records, 0, 10_000).unwrap();

    let plot_rows = sort_for_plot(&filtered);
    assert_eq!(
        plot_rows.iter().map(|r| r.length).collect::<Vec<_>>(),
        vec![1200, 950, 800]
    );
    // CSV order is still retrieval order
    assert_eq!(
        filtered.iter().map(|r| r.length).collect::<Vec<_>>(),
        vec![800, 1200, 950]
    );
}

proptest! {
    #[test]
    fn every_kept_row_satisfies_inclusive_bounds(
        lengths in prop::collection::vec(0usize..2000, 0..40),
        min_len in 0u64..1500,
        width in 0u64..800,
    ) {
        let max_len = min_len + width;
        let records: Vec<_> = lengths
            .iter()
            .enumerate()
            .map(|(idx, len)| record(&format!("Q{}", idx), *len))
            .collect();

        let filtered = filter_by_length(records, min_len, max_len).unwrap();

        for row in &filtered {
            prop_assert!(row.length >= min_len && row.length <= max_len);
        }

        // Same rows, same order, as a direct scan of the input lengths
        let expected: Vec<u64> = lengths
            .iter()
            .map(|l| *l as u64)
            .filter(|l| *l >= min_len && *l <= max_len)
            .collect();
        let actual: Vec<u64> = filtered.iter().map(|r| r.length).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn plot_sort_is_a_stable_permutation(
        lengths in prop::collection::vec(0u64..50, 1..30),
    ) {
        let rows: Vec<_> = lengths
            .iter()
            .enumerate()
            .map(|(idx, len)| gbfetch::SequenceSummary {
                accession: format!("S{}", idx),
                length: *len,
                description: String::new(),
            })
            .collect();

        let sorted = sort_for_plot(&rows);
        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].length >= pair[1].length);
            // Ties keep original relative order
            if pair[0].length == pair[1].length {
                let a: usize = pair[0].accession[1..].parse().unwrap();
                let b: usize = pair[1].accession[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}
