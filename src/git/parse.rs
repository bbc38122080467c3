use crate::types::{Commit, Tag};
use chrono::DateTime;
use tracing::debug;

/// `git log` pretty format: hash, author name, author email, ISO-8601 author
/// date and subject, NUL-separated.
pub const LOG_FORMAT: &str = "--format=%H%x00%an%x00%ae%x00%aI%x00%s";

/// `git for-each-ref` format: name, object type, dereferenced commit date, tag date.
pub const TAG_FORMAT: &str =
    "--format=%(refname:short)|%(objecttype)|%(*authordate:iso)|%(authordate:iso)";

const TAG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Commits parsed from log output along with the number of lines rejected.
#[derive(Debug, Default)]
pub struct ParsedLog {
    pub commits: Vec<Commit>,
    pub skipped: usize,
}

/// Parses `git log` output produced with [`LOG_FORMAT`].
///
/// Malformed lines and unparseable dates are skipped. The result is sorted by
/// commit instant, oldest first; equal instants keep log order.
pub fn parse_log_output(output: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.splitn(5, '\0').collect();
        if parts.len() < 5 {
            debug!(line = %line.replace('\0', "\\0"), "Skipping malformed line");
            parsed.skipped += 1;
            continue;
        }

        let date = match DateTime::parse_from_rfc3339(parts[3]) {
            Ok(date) => date,
            Err(e) => {
                debug!(date = parts[3], error = %e, "Failed to parse date, skipping commit");
                parsed.skipped += 1;
                continue;
            }
        };

        parsed.commits.push(Commit {
            hash: parts[0].to_string(),
            author: parts[1].to_string(),
            email: parts[2].to_string(),
            date,
            subject: parts[4].to_string(),
        });
    }

    parsed.commits.sort_by(|a, b| a.date.cmp(&b.date));
    parsed
}

/// Parses `git for-each-ref` output produced with [`TAG_FORMAT`].
///
/// The tag's own date is preferred; the tagged commit's date is the fallback.
pub fn parse_tag_output(output: &str) -> Vec<Tag> {
    let mut tags = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 4 {
            continue;
        }

        let name = parts[0];
        let commit_date = parts[2].trim();
        let tag_date = parts[3].trim();

        let date_str = if !tag_date.is_empty() {
            tag_date
        } else if !commit_date.is_empty() {
            commit_date
        } else {
            continue;
        };

        match DateTime::parse_from_str(date_str, TAG_DATE_FORMAT) {
            Ok(date) => tags.push(Tag {
                name: name.to_string(),
                date,
            }),
            Err(e) => {
                debug!(date = date_str, error = %e, "Failed to parse tag date, skipping");
            }
        }
    }

    tags.sort_by(|a, b| a.date.cmp(&b.date));
    tags
}
