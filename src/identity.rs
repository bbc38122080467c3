//! Merging author names and emails into people.
//!
//! Every distinct author name and every distinct (lower-cased) email is a node;
//! each commit links its name to its email. People are the connected components.

use crate::types::Commit;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure(&mut self, x: usize) {
        while self.parent.len() <= x {
            let id = self.parent.len();
            self.parent.push(id);
            self.rank.push(0);
        }
    }

    /// Representative of `x`'s set. Unseen ids become singletons.
    pub fn find(&mut self, x: usize) -> usize {
        self.ensure(x);
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }
}

/// A merged contributor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub usize);

/// Result of resolving a commit list: which person authored each commit and
/// the name to show for each person.
#[derive(Debug)]
pub struct Identities {
    /// Parallel to the input commits.
    pub commit_people: Vec<PersonId>,
    display_names: HashMap<PersonId, String>,
}

impl Identities {
    /// Name from the person's most recent commit.
    pub fn display_name(&self, person: PersonId) -> &str {
        self.display_names
            .get(&person)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn people(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.display_names.keys().copied()
    }
}

#[derive(Debug, Default)]
pub struct IdentityResolver {
    uf: UnionFind,
    name_ids: HashMap<String, usize>,
    email_ids: HashMap<String, usize>,
    next_id: usize,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(ids: &mut HashMap<String, usize>, next_id: &mut usize, key: &str) -> usize {
        if let Some(id) = ids.get(key) {
            return *id;
        }
        let id = *next_id;
        ids.insert(key.to_string(), id);
        *next_id += 1;
        id
    }

    /// Links the commit's author name with its email.
    pub fn observe(&mut self, commit: &Commit) {
        let name_id = Self::intern(&mut self.name_ids, &mut self.next_id, &commit.author);
        let email_id = Self::intern(
            &mut self.email_ids,
            &mut self.next_id,
            &commit.email.to_lowercase(),
        );
        self.uf.union(name_id, email_id);
    }

    fn person_of(&mut self, commit: &Commit) -> PersonId {
        let name_id = self.name_ids[&commit.author];
        PersonId(self.uf.find(name_id))
    }

    /// Resolves every commit to a person. Commits must be in ascending date order
    /// for the display name tie-break (earliest-seen wins on equal timestamps).
    pub fn resolve(commits: &[Commit]) -> Identities {
        let mut resolver = Self::new();
        for commit in commits {
            resolver.observe(commit);
        }

        let commit_people: Vec<PersonId> = commits.iter().map(|c| resolver.person_of(c)).collect();

        let mut latest: HashMap<PersonId, (DateTime<FixedOffset>, String)> = HashMap::new();
        for (commit, person) in commits.iter().zip(&commit_people) {
            match latest.get(person) {
                Some((date, _)) if commit.date <= *date => {}
                _ => {
                    latest.insert(*person, (commit.date, commit.author.clone()));
                }
            }
        }

        Identities {
            commit_people,
            display_names: latest.into_iter().map(|(p, (_, name))| (p, name)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(author: &str, email: &str, date: &str) -> Commit {
        Commit {
            hash: format!("{author}-{date}"),
            author: author.to_string(),
            email: email.to_string(),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
            subject: String::new(),
        }
    }

    #[test]
    fn union_find_merges_transitively() {
        let mut uf = UnionFind::new();
        uf.union(0, 1);
        uf.union(2, 3);
        assert_ne!(uf.find(0), uf.find(3));
        uf.union(1, 3);
        assert_eq!(uf.find(0), uf.find(2));
        assert_eq!(uf.find(7), 7);
    }

    #[test]
    fn shared_email_merges_names() {
        let commits = vec![
            commit("Ann Smith", "ann@example.com", "2024-01-01T10:00:00Z"),
            commit("asmith", "ANN@example.com", "2024-01-02T10:00:00Z"),
            commit("Bob", "bob@example.com", "2024-01-02T11:00:00Z"),
        ];
        let ids = IdentityResolver::resolve(&commits);
        assert_eq!(ids.commit_people[0], ids.commit_people[1]);
        assert_ne!(ids.commit_people[0], ids.commit_people[2]);
        assert_eq!(ids.display_name(ids.commit_people[0]), "asmith");
        assert_eq!(ids.people().count(), 2);
    }

    #[test]
    fn shared_name_bridges_emails() {
        let commits = vec![
            commit("Ann", "work@example.com", "2024-01-01T10:00:00Z"),
            commit("Ann", "home@example.com", "2024-01-02T10:00:00Z"),
            commit("Ann Smith", "home@example.com", "2024-01-03T10:00:00Z"),
        ];
        let ids = IdentityResolver::resolve(&commits);
        assert_eq!(ids.commit_people[0], ids.commit_people[2]);
        assert_eq!(ids.display_name(ids.commit_people[0]), "Ann Smith");
    }

    #[test]
    fn names_are_case_sensitive() {
        let commits = vec![
            commit("ann", "one@example.com", "2024-01-01T10:00:00Z"),
            commit("Ann", "two@example.com", "2024-01-01T11:00:00Z"),
        ];
        let ids = IdentityResolver::resolve(&commits);
        assert_ne!(ids.commit_people[0], ids.commit_people[1]);
    }

    #[test]
    fn equal_timestamps_keep_first_seen_name() {
        let commits = vec![
            commit("first", "x@example.com", "2024-01-01T10:00:00Z"),
            commit("second", "x@example.com", "2024-01-01T10:00:00Z"),
        ];
        let ids = IdentityResolver::resolve(&commits);
        assert_eq!(ids.display_name(ids.commit_people[1]), "first");
    }
}
