use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::models::{AuthorMonthStats, MonthlyStats};

pub const MONTHLY_STATS_HEADER: [&str; 4] = [
    "Month",
    "Pull Requests",
    "New Contributors",
    "Total Contributors",
];

pub const AUTHOR_STATS_HEADER: [&str; 3] = ["Month", "Author", "Pull Requests"];

pub fn write_monthly_stats(path: &Path, rows: &[MonthlyStats]) -> Result<()> {
    write_table(path, &MONTHLY_STATS_HEADER, rows)
}

pub fn write_author_stats(path: &Path, rows: &[AuthorMonthStats]) -> Result<()> {
    write_table(path, &AUTHOR_STATS_HEADER, rows)
}

/// Header row first, even when there are no rows; rows serialize in field order.
fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_stats_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monthly.csv");
        let rows = vec![
            MonthlyStats {
                month: "2021-01".into(),
                pull_requests: 4,
                new_contributors: 2,
                total_contributors: 2,
            },
            MonthlyStats {
                month: "2021-02".into(),
                pull_requests: 1,
                new_contributors: 0,
                total_contributors: 2,
            },
        ];

        write_monthly_stats(&path, &rows).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Month,Pull Requests,New Contributors,Total Contributors\n\
             2021-01,4,2,2\n\
             2021-02,1,0,2\n"
        );
    }

    #[test]
    fn test_author_stats_csv_quotes_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.csv");
        let rows = vec![AuthorMonthStats {
            month: "2021-01".into(),
            author: "odd,login".into(),
            pull_requests: 3,
        }];

        write_author_stats(&path, &rows).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Month,Author,Pull Requests\n2021-01,\"odd,login\",3\n"
        );
    }

    #[test]
    fn test_header_written_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_author_stats(&path, &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Month,Author,Pull Requests\n"
        );
    }
}
