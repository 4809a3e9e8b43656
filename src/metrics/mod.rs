//! Running statistics over the ingested commit stream
//!
//! Two accumulations feed the overlay charts: per-author contribution
//! percentages snapshotted at every commit index, and the distribution
//! of distinct file paths across extension buckets. Both are
//! session-scoped and reset only on restart.

use std::collections::{HashMap, HashSet};

use crate::data::CommitRecord;

/// Bucket label for files without an extension
pub const NO_EXTENSION: &str = "(no extension)";

/// Immutable per-commit-index snapshots of author contribution percentages
#[derive(Debug, Clone, Default)]
pub struct ContributionHistory {
    snapshots: HashMap<usize, HashMap<String, f32>>,
}

impl ContributionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the contribution snapshot for `commit_index`.
    ///
    /// The tally is recomputed from scratch over commits 0..=index.
    /// That is O(n) per call, deliberately: the tick rate bounds call
    /// frequency, and recomputing keeps every snapshot independent of
    /// its predecessors.
    pub fn record(&mut self, commits: &[CommitRecord], commit_index: usize) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;

        for commit in commits.iter().take(commit_index + 1) {
            *counts.entry(commit.author.as_str()).or_insert(0) += 1;
            total += 1;
        }

        let percentages = counts
            .into_iter()
            .map(|(author, count)| (author.to_string(), count as f32 / total as f32 * 100.0))
            .collect();

        self.snapshots.insert(commit_index, percentages);
    }

    /// Snapshot at a commit index, if one was recorded
    pub fn at(&self, commit_index: usize) -> Option<&HashMap<String, f32>> {
        self.snapshots.get(&commit_index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

/// Distinct file paths seen so far, grouped by extension bucket
#[derive(Debug, Clone, Default)]
pub struct LanguageDistribution {
    buckets: HashMap<String, HashSet<String>>,
}

impl LanguageDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every changed file of a commit to its extension bucket.
    /// Paths de-duplicate via set membership; buckets only grow.
    pub fn record(&mut self, commit: &CommitRecord) {
        for file in &commit.files {
            let bucket = Self::bucket_for(file);
            self.buckets.entry(bucket).or_default().insert(file.clone());
        }
    }

    fn bucket_for(path: &str) -> String {
        match path.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
            _ => NO_EXTENSION.to_string(),
        }
    }

    /// Total distinct files seen (each path lands in exactly one bucket)
    pub fn total_files(&self) -> usize {
        self.buckets.values().map(HashSet::len).sum()
    }

    /// Buckets as (extension, percentage-of-total, file count),
    /// sorted by percentage descending
    pub fn percentages(&self) -> Vec<(String, f32, usize)> {
        let total = self.total_files();
        if total == 0 {
            return Vec::new();
        }

        let mut rows: Vec<_> = self
            .buckets
            .iter()
            .map(|(ext, files)| {
                (
                    ext.clone(),
                    files.len() as f32 / total as f32 * 100.0,
                    files.len(),
                )
            })
            .collect();
        rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
