use crate::models::MonthlyReport;

/// New contributors per month with the running total, one login per line.
pub fn format_contributor_report(report: &MonthlyReport) -> String {
    let mut output = String::new();
    let mut total = 0;

    for (month, authors) in &report.new_contributors {
        total += authors.len();
        output.push_str(&format!("\n---{}--- ({}/{})\n", month, authors.len(), total));
        for author in authors {
            output.push_str(author);
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_report_layout() {
        let mut new_contributors = BTreeMap::new();
        new_contributors.insert("2021-02".to_string(), vec!["carol".to_string()]);
        new_contributors.insert(
            "2021-01".to_string(),
            vec!["alice".to_string(), "bob".to_string()],
        );
        let report = MonthlyReport {
            new_contributors,
            ..Default::default()
        };

        assert_eq!(
            format_contributor_report(&report),
            "\n---2021-01--- (2/2)\nalice\nbob\n\n---2021-02--- (1/3)\ncarol\n"
        );
    }
}
