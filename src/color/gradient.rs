//! Memoized radial gradient handles
//!
//! Particles are filled with a radial blend of the file color (center)
//! and the author color (edge). The host registers each gradient
//! definition once; repeated (file, author) pairs must resolve to the
//! same handle without re-registering the resource.

use serde::Serialize;
use std::collections::HashSet;

/// A registered radial gradient resource
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradientDef {
    pub id: String,
    /// Gradient focus, as fractions of the bounding box
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub center_color: String,
    pub center_opacity: f32,
    pub edge_color: String,
    pub edge_opacity: f32,
}

/// Idempotent cache of gradient definitions, keyed by canonical id
#[derive(Debug, Clone, Default)]
pub struct GradientCache {
    ids: HashSet<String>,
    defs: Vec<GradientDef>,
}

impl GradientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the paint handle for a (file color, author color) pair,
    /// registering the gradient definition on first use.
    pub fn intern(&mut self, file_color: &str, author_color: &str) -> String {
        let id = Self::canonical_id(file_color, author_color);

        if self.ids.insert(id.clone()) {
            self.defs.push(GradientDef {
                id: id.clone(),
                cx: 0.3,
                cy: 0.3,
                r: 0.7,
                center_color: file_color.to_string(),
                center_opacity: 0.95,
                edge_color: author_color.to_string(),
                edge_opacity: 0.85,
            });
        }

        format!("url(#{})", id)
    }

    fn canonical_id(file_color: &str, author_color: &str) -> String {
        format!(
            "gradient-{}-{}",
            file_color.replace(['#', '.'], ""),
            author_color.replace(['#', '.'], "")
        )
    }

    /// Definitions registered so far, in first-use order
    pub fn defs(&self) -> &[GradientDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Drop every registered gradient (session restart)
    pub fn clear(&mut self) {
        self.ids.clear();
        self.defs.clear();
    }
}
