//! Snapshot selection
//!
//! A Monefy backup snapshot is named `monefy-<YYYY-MM-DD_HH-MM-SS>.csv`.
//! Every snapshot contains the full transaction history at its point in
//! time, so among many candidates only the one with the greatest embedded
//! timestamp is authoritative.
//!
//! Selection is a pure function of the candidate names: no file is opened
//! here, and a name that does not follow the pattern is excluded from
//! consideration rather than aborting the whole selection.

use crate::types::AggregationError;
use chrono::NaiveDateTime;
use tracing::warn;

/// File-name prefix shared by all backup snapshots
pub const SNAPSHOT_PREFIX: &str = "monefy-";

/// File-name extension shared by all backup snapshots
pub const SNAPSHOT_EXTENSION: &str = ".csv";

/// Timestamp layout embedded in snapshot file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Parse the timestamp embedded in a snapshot file name
///
/// Returns `None` when the name does not follow
/// `monefy-<YYYY-MM-DD_HH-MM-SS>.csv`.
pub fn snapshot_timestamp(name: &str) -> Option<NaiveDateTime> {
    let stem = name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_EXTENSION)?;
    NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).ok()
}

/// Select the candidate name with the greatest embedded timestamp
///
/// Malformed names are skipped (with a warning) so a stray file cannot
/// abort the selection. Ties resolve to the first candidate in input
/// order, keeping the result deterministic.
///
/// # Errors
///
/// Returns `NoSnapshot` when the candidate set is empty or no candidate
/// carries a parseable timestamp.
pub fn select_latest<'a, I>(candidates: I) -> Result<&'a str, AggregationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut latest: Option<(NaiveDateTime, &str)> = None;
    for name in candidates {
        match snapshot_timestamp(name) {
            Some(timestamp) => {
                // Strictly-greater comparison keeps the first candidate on ties.
                if latest.map_or(true, |(best, _)| timestamp > best) {
                    latest = Some((timestamp, name));
                }
            }
            None => warn!(name, "skipping file without a snapshot timestamp"),
        }
    }
    latest
        .map(|(_, name)| name)
        .ok_or(AggregationError::NoSnapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::two_candidates(
        vec!["monefy-2022-01-01_01-01-01.csv", "monefy-2022-06-01_00-00-00.csv"],
        "monefy-2022-06-01_00-00-00.csv"
    )]
    #[case::unsorted_input(
        vec![
            "monefy-2023-03-15_08-30-00.csv",
            "monefy-2021-11-02_23-59-59.csv",
            "monefy-2022-06-01_00-00-00.csv",
        ],
        "monefy-2023-03-15_08-30-00.csv"
    )]
    #[case::single_candidate(vec!["monefy-2022-01-01_01-01-01.csv"], "monefy-2022-01-01_01-01-01.csv")]
    #[case::malformed_names_excluded(
        vec!["notes.csv", "monefy-2022-01-01_01-01-01.csv", "monefy-latest.csv"],
        "monefy-2022-01-01_01-01-01.csv"
    )]
    fn test_select_latest(#[case] candidates: Vec<&str>, #[case] expected: &str) {
        assert_eq!(select_latest(candidates).unwrap(), expected);
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::no_parseable_timestamp(vec!["backup.csv", "monefy-.csv", "monefy-2022-13-01_00-00-00.csv"])]
    fn test_select_latest_not_found(#[case] candidates: Vec<&str>) {
        let error = select_latest(candidates).unwrap_err();
        assert!(matches!(error, AggregationError::NoSnapshot));
    }

    #[test]
    fn test_tie_breaks_on_first_candidate() {
        // Same embedded timestamp; first in input order wins.
        let first = select_latest(vec![
            "monefy-2022-01-01_01-01-01.csv",
            "monefy-2022-01-01_01-01-01.csv",
        ])
        .unwrap();
        assert_eq!(first, "monefy-2022-01-01_01-01-01.csv");
    }

    #[rstest]
    #[case::well_formed("monefy-2022-06-01_00-00-00.csv", true)]
    #[case::wrong_prefix("backup-2022-06-01_00-00-00.csv", false)]
    #[case::wrong_extension("monefy-2022-06-01_00-00-00.json", false)]
    #[case::impossible_date("monefy-2022-02-30_00-00-00.csv", false)]
    #[case::missing_time("monefy-2022-06-01.csv", false)]
    fn test_snapshot_timestamp(#[case] name: &str, #[case] parses: bool) {
        assert_eq!(snapshot_timestamp(name).is_some(), parses);
    }
}
