//! Testing utilities for the cadtrail workspace
//!
//! Shared audit-trail fixtures.

#![allow(missing_docs)]

pub const HEADER: [&str; 6] = ["Index", "Event Time", "Document", "Tab", "User", "Description"];

pub const EVENT_TIME: &str = "2021-08-21 19:12:19";

pub fn header() -> Vec<String> {
    HEADER.iter().map(|s| s.to_string()).collect()
}

pub fn row_at(index: usize, user: &str, description: &str) -> Vec<String> {
    vec![
        index.to_string(),
        EVENT_TIME.to_string(),
        "Doc".to_string(),
        "N/A".to_string(),
        user.to_string(),
        description.to_string(),
    ]
}

/// Header followed by one row per `(user, description)` pair
pub fn audit_trail(entries: &[(&str, &str)]) -> Vec<Vec<String>> {
    std::iter::once(header())
        .chain(
            entries
                .iter()
                .enumerate()
                .map(|(i, (user, description))| row_at(i + 1, user, description)),
        )
        .collect()
}

/// Audit trail rendered as CSV text
pub fn audit_trail_csv(entries: &[(&str, &str)]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in audit_trail(entries) {
        writer.write_record(&row).expect("write fixture row");
    }
    let bytes = writer.into_inner().expect("flush fixture");
    String::from_utf8(bytes).expect("fixture is UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_fixture_quotes_special_fields() {
        let text = audit_trail_csv(&[("x@x.com", "Tab \"Main\", renamed")]);
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("Index,Event Time,Document,Tab,User,Description"));
        assert_eq!(
            lines.next(),
            Some("1,2021-08-21 19:12:19,Doc,N/A,x@x.com,\"Tab \"\"Main\"\", renamed\"")
        );
        assert_eq!(lines.next(), None);
    }
}
