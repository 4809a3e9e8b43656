//! Deterministic color assignment
//!
//! Authors draw from a small categorical palette in first-seen order;
//! filenames and extensions hash into a larger palette so the same path
//! lights up identically within and across runs.

use std::collections::HashMap;

/// Categorical palette cycled over authors in first-seen order
pub const AUTHOR_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Palette indexed by filename/extension hash
pub const FILE_PALETTE: [&str; 20] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7",
    "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
    "#F8C471", "#82E0AA", "#F1948A", "#85C1E9", "#D7BDE2",
    "#A3E4D7", "#FAD7A0", "#D5A6BD", "#AED6F1", "#A9DFBF",
];

/// Fallback for unknown or missing authors
pub const FALLBACK_WHITE: &str = "#ffffff";

/// Fixed color for the "(no extension)" bucket
pub const NO_EXTENSION_GRAY: &str = "#7f7f7f";

/// 32-bit wrapping string hash (`h = c + (h << 5) - h` over UTF-16 units)
pub fn name_hash(name: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = (unit as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }
    hash
}

/// Stable palette color for a filename
pub fn file_color(filename: &str) -> &'static str {
    let index = name_hash(filename).unsigned_abs() as usize % FILE_PALETTE.len();
    FILE_PALETTE[index]
}

/// Stable palette color for a file extension bucket.
///
/// The no-extension sentinel bypasses the hash and always maps to gray.
pub fn extension_color(ext: &str) -> &'static str {
    if ext == crate::metrics::NO_EXTENSION {
        return NO_EXTENSION_GRAY;
    }
    let index = name_hash(ext).unsigned_abs() as usize % FILE_PALETTE.len();
    FILE_PALETTE[index]
}

/// Session-stable author → color assignment
///
/// Computed once up front from the distinct authors of the full feed,
/// so the mapping never shifts as commits stream in.
#[derive(Debug, Clone, Default)]
pub struct AuthorColors {
    colors: HashMap<String, &'static str>,
}

impl AuthorColors {
    pub fn assign(authors: &[&str]) -> Self {
        let mut colors = HashMap::new();
        for (i, author) in authors.iter().enumerate() {
            colors.insert(
                author.to_string(),
                AUTHOR_PALETTE[i % AUTHOR_PALETTE.len()],
            );
        }
        Self { colors }
    }

    /// Color for an author, white when unknown or empty
    pub fn get(&self, author: &str) -> &'static str {
        if author.is_empty() {
            return FALLBACK_WHITE;
        }
        self.colors.get(author).copied().unwrap_or(FALLBACK_WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hash_is_pure() {
        for name in ["src/lib.rs", "README.md", "a", ""] {
            assert_eq!(name_hash(name), name_hash(name));
        }
        assert_eq!(name_hash(""), 0);
    }

    #[test]
    fn test_known_hash_values() {
        // h("a") = 97, h("ab") = 97 * 31 + 98 = 3105
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 3105);
    }

    #[test]
    fn test_file_color_table() {
        assert_eq!(file_color("a"), FILE_PALETTE[97 % 20]);
        assert_eq!(file_color("ab"), FILE_PALETTE[3105 % 20]);
        // Same filename always yields the same color
        assert_eq!(file_color("src/render/mod.rs"), file_color("src/render/mod.rs"));
    }

    #[test]
    fn test_extension_color_sentinel() {
        assert_eq!(extension_color(crate::metrics::NO_EXTENSION), NO_EXTENSION_GRAY);
        assert_ne!(extension_color(".rs"), NO_EXTENSION_GRAY);
        assert_eq!(extension_color(".rs"), extension_color(".rs"));
    }

    #[test]
    fn test_author_assignment_order() {
        let colors = AuthorColors::assign(&["alice", "bob", "carol"]);
        assert_eq!(colors.get("alice"), AUTHOR_PALETTE[0]);
        assert_eq!(colors.get("bob"), AUTHOR_PALETTE[1]);
        assert_eq!(colors.get("carol"), AUTHOR_PALETTE[2]);
    }

    #[test]
    fn test_author_palette_wraps() {
        let names: Vec<String> = (0..12).map(|i| format!("author{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let colors = AuthorColors::assign(&refs);
        assert_eq!(colors.get("author10"), AUTHOR_PALETTE[0]);
        assert_eq!(colors.get("author11"), AUTHOR_PALETTE[1]);
    }

    #[test]
    fn test_unknown_author_falls_back_to_white() {
        let colors = AuthorColors::assign(&["alice"]);
        assert_eq!(colors.get("mallory"), FALLBACK_WHITE);
        assert_eq!(colors.get(""), FALLBACK_WHITE);
    }

    #[test]
    fn test_assignment_stable_across_calls() {
        let colors = AuthorColors::assign(&["alice", "bob"]);
        for _ in 0..5 {
            assert_eq!(colors.get("bob"), AUTHOR_PALETTE[1]);
        }
    }
}
