//! Parsing of the captured `git log --numstat` stream.
//!
//! Every commit starts with a line beginning with [`COMMIT_MARKER`], followed
//! on the same line by five NUL-separated fields (hash, author name, author
//! email, ISO-8601 author date, subject). Numstat lines follow until the next
//! marker. Malformed headers drop their whole block; malformed change lines
//! are skipped on their own. Neither is reported as an error.

use crate::model::{CommitRecord, FileChange};
use chrono::DateTime;
use tracing::debug;

pub const COMMIT_MARKER: &str = ">>>GW:";

pub const FIELD_SEPARATOR: char = '\0';

/// The `--format` argument that produces the header lines this parser expects.
pub fn log_format() -> String {
    format!("--format={COMMIT_MARKER}%H%x00%an%x00%ae%x00%aI%x00%s")
}

/// Parse a captured log into commits, in input order.
pub fn parse_log(raw: &str) -> Vec<CommitRecord> {
    let mut commits = Vec::new();
    let mut current: Option<CommitRecord> = None;

    for line in raw.lines() {
        if let Some(payload) = line.strip_prefix(COMMIT_MARKER) {
            if let Some(done) = current.take() {
                commits.push(done);
            }
            current = parse_header(payload);
            continue;
        }

        // Change lines before the first header, or after a dropped one, belong to nobody.
        let Some(commit) = current.as_mut() else {
            continue;
        };
        if !line.contains('\t') {
            continue;
        }
        match parse_change(line) {
            Some(change) => commit.file_changes.push(change),
            None => debug!(commit = %commit.id, line, "ignoring malformed change line"),
        }
    }

    if let Some(done) = current {
        commits.push(done);
    }
    commits
}

fn parse_header(payload: &str) -> Option<CommitRecord> {
    let fields: Vec<&str> = payload.splitn(5, FIELD_SEPARATOR).collect();
    let &[id, author_name, author_email, date, message] = fields.as_slice() else {
        debug!(fields = fields.len(), "dropping commit header with missing fields");
        return None;
    };

    if author_name.is_empty() || author_email.is_empty() {
        debug!(commit = id, "dropping commit header without author identity");
        return None;
    }

    let timestamp = match DateTime::parse_from_rfc3339(date) {
        Ok(ts) => ts,
        Err(e) => {
            debug!(commit = id, date, error = %e, "dropping commit header with bad timestamp");
            return None;
        }
    };

    Some(CommitRecord {
        id: id.to_string(),
        author_name: author_name.to_string(),
        author_email: author_email.to_string(),
        timestamp,
        message: message.to_string(),
        file_changes: Vec::new(),
    })
}

/// `insertions<TAB>deletions<TAB>path`; git writes `-` for both counts on binary files.
fn parse_change(line: &str) -> Option<FileChange> {
    let mut parts = line.splitn(3, '\t');
    let insertions = parse_count(parts.next()?)?;
    let deletions = parse_count(parts.next()?)?;
    let path = parts.next()?;
    Some(FileChange::new(insertions, deletions, path))
}

fn parse_count(field: &str) -> Option<u64> {
    if field == "-" {
        return Some(0);
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    fn header(id: &str, name: &str, date: &str, message: &str) -> String {
        format!("{COMMIT_MARKER}{id}\0{name}\0{name}@example.com\0{date}\0{message}")
    }

    #[test]
    fn parses_headers_and_numstat() {
        let raw = [
            header("aaa", "Ada", "2024-03-02T09:15:00+01:00", "add parser"),
            String::new(),
            "10\t2\tsrc/parse.rs".to_string(),
            "3\t0\tREADME.md".to_string(),
            header("bbb", "Linus", "2024-03-01T23:05:00-08:00", "initial"),
            String::new(),
            "1\t0\tsrc/lib.rs".to_string(),
        ]
        .join("\n");

        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 2);

        let first = &commits[0];
        assert_eq!(first.id, "aaa");
        assert_eq!(first.author_name, "Ada");
        assert_eq!(first.author_email, "Ada@example.com");
        assert_eq!(first.message, "add parser");
        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            first.timestamp,
            offset.with_ymd_and_hms(2024, 3, 2, 9, 15, 0).unwrap()
        );
        assert_eq!(
            first.file_changes,
            vec![
                FileChange::new(10, 2, "src/parse.rs"),
                FileChange::new(3, 0, "README.md"),
            ]
        );

        assert_eq!(commits[1].id, "bbb");
        assert_eq!(commits[1].file_changes, vec![FileChange::new(1, 0, "src/lib.rs")]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n\n").is_empty());
    }

    #[test]
    fn parsing_is_repeatable() {
        let raw = format!(
            "{}\n\n5\t1\ta.rs\n{}\n",
            header("a1", "Ada", "2024-01-01T00:00:00Z", "one"),
            header("b2", "Ada", "2024-01-02T00:00:00Z", "two"),
        );
        assert_eq!(parse_log(&raw), parse_log(&raw));
    }

    #[test]
    fn binary_changes_count_as_zero() {
        let raw = format!(
            "{}\n-\t-\tassets/logo.png\n",
            header("a1", "Ada", "2024-01-01T12:00:00Z", "logo")
        );
        let commits = parse_log(&raw);
        assert_eq!(
            commits[0].file_changes,
            vec![FileChange::new(0, 0, "assets/logo.png")]
        );
    }

    #[test]
    fn malformed_block_is_dropped_and_parsing_resumes() {
        let raw = [
            header("good1", "Ada", "2024-01-03T10:00:00Z", "first"),
            "1\t1\ta.rs".to_string(),
            format!("{COMMIT_MARKER}broken\0only-two-fields"),
            "7\t7\tphantom.rs".to_string(),
            header("good2", "Ada", "2024-01-01T10:00:00Z", "second"),
            "2\t2\tb.rs".to_string(),
        ]
        .join("\n");

        let commits = parse_log(&raw);
        let ids: Vec<_> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["good1", "good2"]);
        assert_eq!(commits[0].file_changes, vec![FileChange::new(1, 1, "a.rs")]);
        assert_eq!(commits[1].file_changes, vec![FileChange::new(2, 2, "b.rs")]);
    }

    #[test]
    fn bad_timestamp_drops_block() {
        let raw = [
            header("bad", "Ada", "yesterday-ish", "oops"),
            "1\t1\ta.rs".to_string(),
            header("ok", "Ada", "2024-05-05T05:05:05+05:00", "fine"),
        ]
        .join("\n");
        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, "ok");
        assert!(commits[0].file_changes.is_empty());
    }

    #[test]
    fn empty_author_drops_block() {
        let raw = format!("{COMMIT_MARKER}abc\0\0x@example.com\02024-01-01T00:00:00Z\0msg");
        assert!(parse_log(&raw).is_empty());
    }

    #[test]
    fn change_lines_before_any_header_are_ignored() {
        let raw = format!(
            "4\t4\torphan.rs\n{}\n1\t0\treal.rs\n",
            header("a1", "Ada", "2024-01-01T00:00:00Z", "msg")
        );
        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].file_changes, vec![FileChange::new(1, 0, "real.rs")]);
    }

    #[test]
    fn odd_change_lines_are_skipped_not_fatal() {
        let raw = [
            header("a1", "Ada", "2024-01-01T00:00:00Z", "msg"),
            "x\t1\tnot-a-number.rs".to_string(),
            "1\tonly-two".to_string(),
            "-5\t1\tnegative.rs".to_string(),
            "no tabs here".to_string(),
            "2\t3\tkept.rs".to_string(),
            String::new(),
            String::new(),
        ]
        .join("\n");
        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].file_changes, vec![FileChange::new(2, 3, "kept.rs")]);
    }

    #[test]
    fn paths_keep_embedded_tabs() {
        let raw = format!(
            "{}\n1\t2\tweird\tname.txt\n",
            header("a1", "Ada", "2024-01-01T00:00:00Z", "msg")
        );
        let commits = parse_log(&raw);
        assert_eq!(
            commits[0].file_changes,
            vec![FileChange::new(1, 2, "weird\tname.txt")]
        );
    }

    #[test]
    fn message_content_cannot_shift_fields() {
        let message = format!("fix\tthe {COMMIT_MARKER} thing\t3\t4\tfake.rs");
        let raw = format!(
            "{}\n1\t1\treal.rs\n",
            header("a1", "Ada", "2024-01-01T00:00:00Z", &message)
        );
        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, message);
        assert_eq!(commits[0].author_email, "Ada@example.com");
        assert_eq!(commits[0].file_changes, vec![FileChange::new(1, 1, "real.rs")]);
    }

    #[test]
    fn empty_subject_is_allowed() {
        let raw = header("a1", "Ada", "2024-01-01T00:00:00Z", "");
        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "");
    }

    #[test]
    fn format_string_uses_marker() {
        assert_eq!(
            log_format(),
            "--format=>>>GW:%H%x00%an%x00%ae%x00%aI%x00%s"
        );
    }
}
