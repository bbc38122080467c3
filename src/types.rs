use crate::constants::DAY_FORMAT;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single commit as read from `git log`.
///
/// `date` keeps the author's UTC offset so the commit lands on the author's
/// local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: DateTime<FixedOffset>,
    pub subject: String,
}

impl Commit {
    /// `YYYY-MM-DD` in the author's offset.
    pub fn day_key(&self) -> String {
        self.date.format(DAY_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub date: DateTime<FixedOffset>,
}

impl Tag {
    pub fn day_key(&self) -> String {
        self.date.format(DAY_FORMAT).to_string()
    }
}

/// One contributor's standing on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRank {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub cumulative_commits: u64,
    #[serde(default)]
    pub commits_today: u64,
    #[serde(default)]
    pub rank: usize,
}

/// One NDJSON record: the ranking as of the end of `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<ContributorRank>,
}

/// Everything the ranking needs from a repository.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub commits: Vec<Commit>,
    pub tags: Vec<Tag>,
    pub origin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_uses_author_offset() {
        let commit = Commit {
            hash: "abc".to_string(),
            author: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            date: DateTime::parse_from_rfc3339("2024-03-01T23:30:00-05:00").unwrap(),
            subject: "late night".to_string(),
        };
        // 04:30 UTC on March 2nd, but still March 1st for the author
        assert_eq!(commit.day_key(), "2024-03-01");
    }

    #[test]
    fn viewer_accepts_reduced_records() {
        let line = r#"{"date":"2024-01-02","contributors":[{"login":"ann","email":"a@x","cumulative_commits":3,"commits_today":1,"rank":1}]}"#;
        let day: DailyStats = serde_json::from_str(line).unwrap();
        assert_eq!(day.origin, "");
        assert!(day.tags.is_empty());
        assert_eq!(day.contributors[0].email.as_deref(), Some("a@x"));

        let line = r#"{"date":"2024-01-01","contributors":[{"login":"ann","cumulative_commits":3},{"login":"bo"}]}"#;
        let day: DailyStats = serde_json::from_str(line).unwrap();
        let ann = &day.contributors[0];
        assert_eq!((ann.cumulative_commits, ann.commits_today, ann.rank), (3, 0, 0));
        let bo = &day.contributors[1];
        assert_eq!((bo.cumulative_commits, bo.commits_today, bo.rank), (0, 0, 0));
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let day = DailyStats {
            date: "2024-01-02".to_string(),
            origin: "git@example.com:o/r.git".to_string(),
            tags: vec![],
            contributors: vec![ContributorRank {
                login: "ann".to_string(),
                email: None,
                cumulative_commits: 2,
                commits_today: 0,
                rank: 1,
            }],
        };
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-01-02","origin":"git@example.com:o/r.git","tags":[],"contributors":[{"login":"ann","cumulative_commits":2,"commits_today":0,"rank":1}]}"#
        );
    }
}
