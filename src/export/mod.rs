pub mod csv;
pub mod json;
pub mod text;

use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

use crate::models::RepoSlug;

pub use self::csv::{write_author_stats, write_monthly_stats, AUTHOR_STATS_HEADER, MONTHLY_STATS_HEADER};
pub use self::json::write_json;
pub use self::text::format_contributor_report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pull request objects as the API returns them
    Raw,
    /// Reshaped records with author, merge flag and merge month
    Summary,
}

pub fn backfill_file_name(repo: &RepoSlug, format: ExportFormat) -> String {
    let kind = match format {
        ExportFormat::Raw => "EXPORT",
        ExportFormat::Summary => "SUMMARY",
    };
    format!("BACKFILL.{}.{}.json", repo.name, kind)
}

/// Monthly and per-author CSV names, sharing one `YYYYmmdd_HHMM` stamp.
pub fn stats_file_names<Tz: TimeZone>(repo: &RepoSlug, at: &DateTime<Tz>) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format("%Y%m%d_%H%M");
    (
        format!("{}.github_monthly_stats.{}.csv", repo.name, stamp),
        format!("{}.github_author_stats.{}.csv", repo.name, stamp),
    )
}

/// Joins `file_name` onto `dir`, made absolute against the working directory.
pub fn output_path(dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(file_name);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_backfill_file_names() {
        let repo: RepoSlug = "octo/widgets".parse().unwrap();
        assert_eq!(
            backfill_file_name(&repo, ExportFormat::Raw),
            "BACKFILL.widgets.EXPORT.json"
        );
        assert_eq!(
            backfill_file_name(&repo, ExportFormat::Summary),
            "BACKFILL.widgets.SUMMARY.json"
        );
    }

    #[test]
    fn test_format_values() {
        assert_eq!(ExportFormat::from_str("summary", true), Ok(ExportFormat::Summary));
        assert_eq!(ExportFormat::from_str("RAW", true), Ok(ExportFormat::Raw));
        assert!(ExportFormat::from_str("sumary", true).is_err());
    }

    #[test]
    fn test_stats_file_names_share_stamp() {
        let repo: RepoSlug = "octo/widgets".parse().unwrap();
        let at = Utc.with_ymd_and_hms(2021, 4, 3, 13, 5, 59).unwrap();
        let (monthly, authors) = stats_file_names(&repo, &at);
        assert_eq!(monthly, "widgets.github_monthly_stats.20210403_1305.csv");
        assert_eq!(authors, "widgets.github_author_stats.20210403_1305.csv");
    }

    #[test]
    fn test_output_path_is_absolute() {
        let path = output_path(Path::new("out"), "x.csv").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("out/x.csv"));
    }
}
