//! Cumulative per-day contributor ranking.

use crate::identity::{IdentityResolver, PersonId};
use crate::types::{Commit, ContributorRank, DailyStats, Tag};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

struct Standing<'a> {
    person: PersonId,
    login: &'a str,
    total: u64,
    today: u64,
}

/// Index after the last entry to keep: `top_n` entries extended through ties
/// with the cutoff entry. `top_n == 0` keeps everything.
fn cutoff_with_ties(totals: &[u64], top_n: usize) -> usize {
    if top_n == 0 || totals.len() <= top_n {
        return totals.len();
    }
    let boundary = totals[top_n - 1];
    let mut cutoff = top_n;
    while cutoff < totals.len() && totals[cutoff] == boundary {
        cutoff += 1;
    }
    cutoff
}

/// Builds one ranking record per day that has at least one commit.
///
/// `commits` should be sorted by date (as `parse_log_output` returns them); the
/// order decides which name a merged person is shown under.
pub fn compute_daily_rankings(
    commits: &[Commit],
    origin: &str,
    tags: &[Tag],
    top_n: usize,
) -> Vec<DailyStats> {
    if commits.is_empty() {
        return Vec::new();
    }

    let mut tags_by_day: HashMap<String, Vec<String>> = HashMap::new();
    for tag in tags {
        tags_by_day.entry(tag.day_key()).or_default().push(tag.name.clone());
    }

    let identities = IdentityResolver::resolve(commits);

    // day -> person -> commits that day; BTreeMap keeps days ascending
    let mut daily: BTreeMap<String, HashMap<PersonId, u64>> = BTreeMap::new();
    for (commit, person) in commits.iter().zip(&identities.commit_people) {
        *daily.entry(commit.day_key()).or_default().entry(*person).or_default() += 1;
    }

    debug!(
        "ranking {} commits over {} days for {} people",
        commits.len(),
        daily.len(),
        identities.people().count()
    );

    let mut running: HashMap<PersonId, u64> = HashMap::new();
    let mut results = Vec::with_capacity(daily.len());

    for (day, today) in daily {
        for (person, count) in &today {
            *running.entry(*person).or_default() += count;
        }

        let mut standings: Vec<Standing> = running
            .iter()
            .map(|(person, total)| Standing {
                person: *person,
                login: identities.display_name(*person),
                total: *total,
                today: today.get(person).copied().unwrap_or(0),
            })
            .collect();

        standings.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.login.cmp(b.login))
                .then_with(|| a.person.cmp(&b.person))
        });

        let totals: Vec<u64> = standings.iter().map(|s| s.total).collect();
        let cutoff = cutoff_with_ties(&totals, top_n);

        let contributors = standings
            .into_iter()
            .take(cutoff)
            .enumerate()
            .map(|(i, s)| ContributorRank {
                login: s.login.to_string(),
                email: None,
                cumulative_commits: s.total,
                commits_today: s.today,
                rank: i + 1,
            })
            .collect();

        let tags = tags_by_day.remove(&day).unwrap_or_default();

        results.push(DailyStats {
            date: day,
            origin: origin.to_string(),
            tags,
            contributors,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn commit(author: &str, email: &str, date: &str) -> Commit {
        Commit {
            hash: format!("{author}-{date}"),
            author: author.to_string(),
            email: email.to_string(),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
            subject: String::new(),
        }
    }

    fn tag(name: &str, date: &str) -> Tag {
        Tag {
            name: name.to_string(),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
        }
    }

    fn logins(day: &DailyStats) -> Vec<&str> {
        day.contributors.iter().map(|c| c.login.as_str()).collect()
    }

    #[test]
    fn empty_history_yields_nothing() {
        assert!(compute_daily_rankings(&[], "origin", &[], 10).is_empty());
    }

    #[test]
    fn running_totals_accumulate_across_days() {
        let commits = vec![
            commit("ann", "ann@x", "2024-01-01T09:00:00Z"),
            commit("bob", "bob@x", "2024-01-01T10:00:00Z"),
            commit("bob", "bob@x", "2024-01-01T11:00:00Z"),
            commit("ann", "ann@x", "2024-01-03T09:00:00Z"),
            commit("ann", "ann@x", "2024-01-03T10:00:00Z"),
        ];
        let days = compute_daily_rankings(&commits, "o", &[], 0);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].date, "2024-01-01");
        assert_eq!(logins(&days[0]), vec!["bob", "ann"]);
        assert_eq!(days[0].contributors[0].commits_today, 2);

        assert_eq!(days[1].date, "2024-01-03");
        assert_eq!(logins(&days[1]), vec!["ann", "bob"]);
        let ann = &days[1].contributors[0];
        assert_eq!((ann.cumulative_commits, ann.commits_today, ann.rank), (3, 2, 1));
        let bob = &days[1].contributors[1];
        assert_eq!((bob.cumulative_commits, bob.commits_today, bob.rank), (2, 0, 2));
        assert!(days.iter().all(|d| d.origin == "o"));
    }

    #[test]
    fn ties_break_by_login() {
        let commits = vec![
            commit("zed", "z@x", "2024-01-01T09:00:00Z"),
            commit("amy", "a@x", "2024-01-01T10:00:00Z"),
        ];
        let days = compute_daily_rankings(&commits, "", &[], 0);
        assert_eq!(logins(&days[0]), vec!["amy", "zed"]);
        assert_eq!(days[0].contributors[1].rank, 2);
    }

    #[test]
    fn top_n_extends_through_ties() {
        let commits = vec![
            commit("a", "a@x", "2024-01-01T01:00:00Z"),
            commit("a", "a@x", "2024-01-01T02:00:00Z"),
            commit("b", "b@x", "2024-01-01T03:00:00Z"),
            commit("c", "c@x", "2024-01-01T04:00:00Z"),
            commit("d", "d@x", "2024-01-01T05:00:00Z"),
        ];
        let days = compute_daily_rankings(&commits, "", &[], 2);
        assert_eq!(logins(&days[0]), vec!["a", "b", "c", "d"]);

        let days = compute_daily_rankings(&commits, "", &[], 1);
        assert_eq!(logins(&days[0]), vec!["a"]);
    }

    #[test]
    fn cutoff_helper() {
        assert_eq!(cutoff_with_ties(&[5, 4, 4, 4, 1], 2), 4);
        assert_eq!(cutoff_with_ties(&[5, 4, 3], 5), 3);
        assert_eq!(cutoff_with_ties(&[5, 4, 3], 0), 3);
        assert_eq!(cutoff_with_ties(&[5, 4, 3], 2), 2);
    }

    #[test]
    fn merged_identities_rank_as_one_person() {
        let commits = vec![
            commit("Ann", "ann@x", "2024-01-01T09:00:00Z"),
            commit("ann-work", "ANN@x", "2024-01-01T10:00:00Z"),
            commit("bob", "bob@x", "2024-01-01T11:00:00Z"),
        ];
        let days = compute_daily_rankings(&commits, "", &[], 0);
        assert_eq!(days[0].contributors.len(), 2);
        assert_eq!(days[0].contributors[0].login, "ann-work");
        assert_eq!(days[0].contributors[0].cumulative_commits, 2);
    }

    #[test]
    fn tags_attach_to_commit_days_only() {
        let commits = vec![
            commit("ann", "ann@x", "2024-01-01T09:00:00Z"),
            commit("ann", "ann@x", "2024-01-05T09:00:00Z"),
        ];
        let tags = vec![
            tag("v0.1", "2024-01-01T12:00:00Z"),
            tag("v0.1.1", "2024-01-01T13:00:00Z"),
            tag("orphan", "2024-01-03T12:00:00Z"),
        ];
        let days = compute_daily_rankings(&commits, "", &tags, 0);
        assert_eq!(days[0].tags, vec!["v0.1", "v0.1.1"]);
        assert!(days[1].tags.is_empty());
    }
}
