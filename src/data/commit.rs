use serde::Deserialize;

/// One commit from the repository history feed
///
/// Produced once by the external git parser and never mutated; the
/// commit hash is the identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    /// Commit timestamp as emitted by the feed (RFC 3339 string)
    pub date: String,
    pub message: String,
    #[serde(default)]
    pub files_changed: u32,
    #[serde(default)]
    pub insertions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub files: Vec<String>,
}

impl CommitRecord {
    /// Last path component of a changed file, for labels
    pub fn short_name(path: &str) -> &str {
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Directory prefix of a changed file, with "/" as the root sentinel
    pub fn directory(path: &str) -> &str {
        match path.rfind('/') {
            Some(idx) if idx > 0 => &path[..idx],
            _ => "/",
        }
    }

    /// Message truncated for the stats panel
    pub fn short_message(&self) -> String {
        if self.message.chars().count() > 50 {
            let head: String = self.message.chars().take(50).collect();
            format!("{}...", head)
        } else {
            self.message.clone()
        }
    }
}
