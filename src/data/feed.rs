//! Commit feed loading and large-repository sampling
//!
//! The feed is produced by an external git parser as a JSON document:
//! an ordered commit list plus repository metadata. Massive histories
//! are downsampled to a bounded count before the simulation starts so
//! per-frame cost stays flat regardless of repository size.

use serde::Deserialize;
use thiserror::Error;

use super::commit::CommitRecord;

/// Sampled feeds keep at most this many commits.
const MAX_SAMPLED_COMMITS: usize = 10_000;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("commit data parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("commit feed is empty")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct FeedInput {
    commits: Vec<CommitRecord>,
    #[serde(default)]
    metadata: FeedMetadata,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedMetadata {
    #[serde(default)]
    pub total_commits: usize,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub is_massive_repo: bool,
}

/// Parsed, validated, possibly downsampled commit history
#[derive(Debug, Clone)]
pub struct CommitFeed {
    commits: Vec<CommitRecord>,
    /// Commit count before sampling
    total_commits: usize,
    massive: bool,
}

impl CommitFeed {
    /// Parse the feed from its JSON document.
    ///
    /// An empty or malformed feed is fatal: the caller must not start
    /// the animation loop without commits to ingest.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        let input: FeedInput = serde_json::from_str(json)?;
        Self::from_parts(input.commits, input.metadata.is_massive_repo)
    }

    pub fn from_parts(commits: Vec<CommitRecord>, massive: bool) -> Result<Self, FeedError> {
        if commits.is_empty() {
            return Err(FeedError::Empty);
        }

        let total_commits = commits.len();
        let commits = if massive {
            sample(commits, MAX_SAMPLED_COMMITS)
        } else {
            commits
        };

        Ok(Self {
            commits,
            total_commits,
            massive,
        })
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn get(&self, index: usize) -> Option<&CommitRecord> {
        self.commits.get(index)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Commit count before sampling
    pub fn total_commits(&self) -> usize {
        self.total_commits
    }

    /// Whether the feed flagged itself as a massive repository
    pub fn is_massive(&self) -> bool {
        self.massive
    }

    /// Distinct authors in first-appearance order
    pub fn authors_in_order(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut authors = Vec::new();
        for commit in &self.commits {
            if seen.insert(commit.author.as_str()) {
                authors.push(commit.author.as_str());
            }
        }
        authors
    }
}

/// Keep every Nth commit so the result fits within `max`.
fn sample(commits: Vec<CommitRecord>, max: usize) -> Vec<CommitRecord> {
    let step = commits.len().div_ceil(max);
    if step <= 1 {
        return commits;
    }
    commits.into_iter().step_by(step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str, author: &str) -> CommitRecord {
        CommitRecord {
            hash: hash.to_string(),
            author: author.to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
            message: format!("commit {}", hash),
            files_changed: 1,
            insertions: 0,
            deletions: 0,
            files: vec!["src/main.rs".to_string()],
        }
    }

    const SAMPLE_JSON: &str = r#"{
        "commits": [
            {
                "hash": "a1",
                "author": "alice",
                "date": "2024-01-01T10:00:00Z",
                "message": "first",
                "filesChanged": 2,
                "insertions": 10,
                "deletions": 0,
                "files": ["src/lib.rs", "src/main.rs"]
            },
            {
                "hash": "b2",
                "author": "bob",
                "date": "2024-01-02T10:00:00Z",
                "message": "second",
                "files": ["README.md"]
            }
        ],
        "metadata": {
            "totalCommits": 2,
            "authors": ["alice", "bob"],
            "isMassiveRepo": false
        }
    }"#;

    #[test]
    fn test_parse_feed() {
        let feed = CommitFeed::from_json(SAMPLE_JSON).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.get(0).unwrap().author, "alice");
        assert_eq!(feed.get(0).unwrap().files.len(), 2);
        assert!(!feed.is_massive());
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let json = r#"{"commits": [{"hash": "x", "author": "a", "date": "", "message": "m"}]}"#;
        let feed = CommitFeed::from_json(json).unwrap();
        assert_eq!(feed.len(), 1);
        assert!(!feed.is_massive());
    }

    #[test]
    fn test_empty_feed_is_fatal() {
        let json = r#"{"commits": [], "metadata": {}}"#;
        let err = CommitFeed::from_json(json).unwrap_err();
        assert!(matches!(err, FeedError::Empty));
    }

    #[test]
    fn test_malformed_feed_is_fatal() {
        assert!(CommitFeed::from_json("not json").is_err());
        assert!(CommitFeed::from_json(r#"{"commits": 7}"#).is_err());
    }

    #[test]
    fn test_massive_feed_sampling() {
        let commits: Vec<_> = (0..25_000)
            .map(|i| commit(&format!("h{}", i), "alice"))
            .collect();
        let feed = CommitFeed::from_parts(commits, true).unwrap();

        // step = ceil(25000 / 10000) = 3
        assert_eq!(feed.len(), 8334);
        assert_eq!(feed.total_commits(), 25_000);
        assert!(feed.is_massive());
        assert_eq!(feed.get(0).unwrap().hash, "h0");
        assert_eq!(feed.get(1).unwrap().hash, "h3");
    }

    #[test]
    fn test_small_massive_feed_not_sampled() {
        let commits: Vec<_> = (0..100)
            .map(|i| commit(&format!("h{}", i), "alice"))
            .collect();
        let feed = CommitFeed::from_parts(commits, true).unwrap();
        assert_eq!(feed.len(), 100);
    }

    #[test]
    fn test_authors_in_order() {
        let commits = vec![
            commit("1", "carol"),
            commit("2", "alice"),
            commit("3", "carol"),
            commit("4", "bob"),
        ];
        let feed = CommitFeed::from_parts(commits, false).unwrap();
        assert_eq!(feed.authors_in_order(), vec!["carol", "alice", "bob"]);
    }
}
