//! Per-frame scene assembly
//!
//! Both modes rebuild the dynamic shape list from scratch in a fixed
//! layer order, so later layers paint over earlier ones:
//! trails/outlines, connective edges/branches, decorative effects,
//! primary entities back-to-front, labels, then the overlay charts.

pub mod overlay;
pub mod project;
pub mod scene;

pub use project::Viewport;
pub use scene::{Scene, Shape};

use std::collections::{HashMap, HashSet};

use crate::color::AuthorColors;
use crate::growth::TreeSystem;
use crate::metrics::{ContributionHistory, LanguageDistribution};
use crate::particles::{Particle, ParticleSystem};
use project::Projected;

/// Apparent scale above which a standard-mode particle gets a label
const LABEL_SCALE_THRESHOLD: f32 = 0.8;
/// Elaborate-mode labels fade out over this many ticks
const LABEL_FRESH_AGE: u32 = 200;

/// Assemble the standard-mode frame.
pub fn render_standard(
    system: &ParticleSystem,
    colors: &AuthorColors,
    contributions: &ContributionHistory,
    languages: &LanguageDistribution,
    cursor: usize,
    viewport: &Viewport,
) -> Vec<Shape> {
    let mut shapes = Vec::new();

    // Frozen trails from previous cap flushes
    for outline in system.outlines() {
        shapes.push(Shape::ring(outline.x, outline.y, outline.r, &outline.color, 1.0, outline.opacity));
    }

    // Project once, cull, and index by id for edge resolution
    let projected: Vec<(&Particle, Projected)> = system
        .particles()
        .iter()
        .map(|p| (p, viewport.project(p.position)))
        .filter(|(_, proj)| !viewport.is_culled(proj))
        .collect();
    let by_id: HashMap<&str, &(&Particle, Projected)> =
        projected.iter().map(|entry| (entry.0.id.as_str(), entry)).collect();

    // Edges whose endpoints were flushed or culled drop silently
    for edge in system.edges() {
        let (Some((_, source)), Some((_, target))) = (
            by_id.get(edge.source_id.as_str()),
            by_id.get(edge.target_id.as_str()),
        ) else {
            continue;
        };
        shapes.push(Shape::Line {
            x1: source.x,
            y1: source.y,
            x2: target.x,
            y2: target.y,
            stroke: "#444444".to_string(),
            width: 1.0,
            opacity: 0.4,
        });
    }

    // Primary entities, back to front
    let mut ordered: Vec<&(&Particle, Projected)> = projected.iter().collect();
    ordered.sort_by(|a, b| {
        b.0.position
            .z
            .partial_cmp(&a.0.position.z)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (particle, proj) in ordered.iter().map(|entry| (entry.0, entry.1)) {
        shapes.push(Shape::filled_circle(proj.x, proj.y, particle.size * proj.scale, &particle.fill, 0.9));
    }

    // Labels only for entities that appear close enough
    for (particle, proj) in ordered.iter().map(|entry| (entry.0, entry.1)) {
        if proj.scale <= LABEL_SCALE_THRESHOLD {
            continue;
        }
        let offset = (particle.size + 2.0) * proj.scale;
        shapes.push(Shape::label(
            proj.x + offset,
            proj.y - offset,
            &particle.filename,
            particle.file_color,
            (10.0 * proj.scale).max(8.0),
            0.72,
        ));
    }

    let active = active_authors(system.particles().iter().map(|p| p.author.as_str()));
    push_overlays(&mut shapes, &active, colors, contributions, languages, cursor, viewport);
    shapes
}

/// Assemble the elaborate-mode frame. Nodes have no depth axis, so
/// they draw in insertion order.
pub fn render_elaborate(
    tree: &TreeSystem,
    colors: &AuthorColors,
    contributions: &ContributionHistory,
    languages: &LanguageDistribution,
    cursor: usize,
    viewport: &Viewport,
) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let nodes = tree.nodes();

    for branch in tree.branches() {
        let (from, to) = (&nodes[branch.from], &nodes[branch.to]);
        let opacity = 1.0 - branch.age as f32 / branch.max_age as f32;
        shapes.push(Shape::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke: branch.color.to_string(),
            width: branch.width,
            opacity: opacity * 0.7,
        });
    }

    for spiral in tree.spirals() {
        if spiral.points.len() < 2 {
            continue;
        }
        let opacity = 1.0 - spiral.age as f32 / spiral.max_age as f32;
        shapes.push(Shape::Path {
            points: spiral.points.iter().map(|&(x, y)| [x, y]).collect(),
            stroke: spiral.color.to_string(),
            width: 2.0,
            opacity: opacity * 0.8,
        });
    }

    for pulse in tree.pulses() {
        let opacity = (1.0 - pulse.age as f32 / pulse.max_age as f32) * 0.5;
        shapes.push(Shape::ring(pulse.x, pulse.y, pulse.radius, pulse.color, 2.0, opacity));
    }

    for bloom in tree.blooms() {
        let progress = bloom.age as f32 / bloom.max_age as f32;
        let opacity = (progress * std::f32::consts::PI).sin() * 0.8;
        let petal_length = bloom.size * progress;

        for i in 0..bloom.petals {
            let angle = i as f32 / bloom.petals as f32 * std::f32::consts::TAU + bloom.rotation;
            let tip_x = bloom.x + angle.cos() * petal_length;
            let tip_y = bloom.y + angle.sin() * petal_length;

            shapes.push(Shape::Line {
                x1: bloom.x,
                y1: bloom.y,
                x2: tip_x,
                y2: tip_y,
                stroke: bloom.color.to_string(),
                width: 2.0,
                opacity,
            });
            shapes.push(Shape::filled_circle(tip_x, tip_y, 4.0 + progress * 3.0, bloom.file_color, opacity));
        }
    }

    for node in nodes {
        let opacity = if node.is_root { 1.0 } else { 0.9 };
        shapes.push(match node.author_color {
            Some(author_color) if !node.is_root => Shape::Circle {
                x: node.x,
                y: node.y,
                r: node.size,
                fill: Some(node.color.to_string()),
                stroke: Some(author_color.to_string()),
                stroke_width: Some(2.0),
                opacity,
            },
            _ => Shape::filled_circle(node.x, node.y, node.size, node.color, opacity),
        });
    }

    for node in nodes {
        let Some(filename) = &node.filename else {
            continue;
        };
        if node.is_root || node.age >= LABEL_FRESH_AGE {
            continue;
        }
        shapes.push(Shape::label(
            node.x + node.size + 5.0,
            node.y + 3.0,
            filename,
            node.color,
            10.0,
            (1.0 - node.age as f32 / LABEL_FRESH_AGE as f32).max(0.0),
        ));
    }

    let active = active_authors(nodes.iter().filter_map(|n| n.author.as_deref()));
    push_overlays(&mut shapes, &active, colors, contributions, languages, cursor, viewport);
    shapes
}

/// Distinct authors among live entities, in first-appearance order
fn active_authors<'a>(authors: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut active = Vec::new();
    for author in authors {
        if seen.insert(author) {
            active.push(author);
        }
    }
    active
}

fn push_overlays(
    shapes: &mut Vec<Shape>,
    active: &[&str],
    colors: &AuthorColors,
    contributions: &ContributionHistory,
    languages: &LanguageDistribution,
    cursor: usize,
    viewport: &Viewport,
) {
    shapes.extend(overlay::author_legend(active, colors, viewport));

    let snapshot = cursor.checked_sub(1).and_then(|index| contributions.at(index));
    shapes.extend(overlay::contribution_bars(snapshot, colors));
    shapes.extend(overlay::language_bars(languages, viewport));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GradientCache;
    use crate::data::CommitRecord;

    fn commit(hash: &str, author: &str, files: &[&str]) -> CommitRecord {
        CommitRecord {
            hash: hash.to_string(),
            author: author.to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
            message: "test".to_string(),
            files_changed: files.len() as u32,
            insertions: 0,
            deletions: 0,
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_standard_frame_contains_particles_and_edges() {
        let viewport = Viewport::default();
        let colors = AuthorColors::assign(&["alice"]);
        let mut gradients = GradientCache::new();
        let mut system = ParticleSystem::new(false, 1);
        system.spawn_commit(&commit("c1", "alice", &["src/a.rs", "src/b.rs"]), &colors, &mut gradients, &viewport);

        let shapes = render_standard(
            &system,
            &colors,
            &ContributionHistory::new(),
            &LanguageDistribution::new(),
            0,
            &viewport,
        );

        let circles = shapes.iter().filter(|s| matches!(s, Shape::Circle { fill: Some(_), .. })).count();
        let lines = shapes.iter().filter(|s| matches!(s, Shape::Line { .. })).count();
        // 2 particles plus the legend dot; 1 directory edge
        assert_eq!(circles, 3);
        assert_eq!(lines, 1);
    }

    #[test]
    fn test_particles_emitted_back_to_front() {
        let viewport = Viewport::default();
        let colors = AuthorColors::assign(&["alice"]);
        let mut gradients = GradientCache::new();
        let mut system = ParticleSystem::new(false, 1);
        system.spawn_commit(&commit("c1", "alice", &["a.rs", "b.rs", "c.rs"]), &colors, &mut gradients, &viewport);
        for _ in 0..10 {
            system.update(&viewport);
        }

        let shapes = render_standard(
            &system,
            &colors,
            &ContributionHistory::new(),
            &LanguageDistribution::new(),
            0,
            &viewport,
        );

        // Depth-sorted circles shrink no faster than paint order: the
        // first emitted primary circle is the farthest one
        let radii: Vec<f32> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Circle { r, fill: Some(fill), .. } if fill.starts_with("url(") => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 3);
    }

    #[test]
    fn test_edge_with_flushed_endpoint_is_dropped() {
        let viewport = Viewport::default();
        let colors = AuthorColors::assign(&["alice"]);
        let mut gradients = GradientCache::new();
        let mut system = ParticleSystem::new(false, 1);
        system.spawn_commit(&commit("c1", "alice", &["src/a.rs", "src/b.rs"]), &colors, &mut gradients, &viewport);

        // Fill to the cap so the next spawn flushes everything
        for i in 0..100 {
            system.spawn_commit(&commit(&format!("x{}", i), "alice", &["lone.rs"]), &colors, &mut gradients, &viewport);
        }

        let shapes = render_standard(
            &system,
            &colors,
            &ContributionHistory::new(),
            &LanguageDistribution::new(),
            0,
            &viewport,
        );
        assert!(!shapes.iter().any(|s| matches!(s, Shape::Line { .. })));
    }

    #[test]
    fn test_elaborate_frame_layers() {
        let viewport = Viewport::default();
        let colors = AuthorColors::assign(&["alice"]);
        let mut tree = TreeSystem::new(false, 1);
        tree.seed_root(&viewport);
        tree.spawn_commit(&commit("c1", "alice", &["a.rs", "b.rs"]), &colors, &viewport);

        let shapes = render_elaborate(
            &tree,
            &colors,
            &ContributionHistory::new(),
            &LanguageDistribution::new(),
            0,
            &viewport,
        );

        // Branch lines come before node circles
        let first_line = shapes.iter().position(|s| matches!(s, Shape::Line { .. })).unwrap();
        let first_node = shapes
            .iter()
            .position(|s| matches!(s, Shape::Circle { fill: Some(_), .. }))
            .unwrap();
        assert!(first_line < first_node);
    }

    #[test]
    fn test_fresh_nodes_get_labels() {
        let viewport = Viewport::default();
        let colors = AuthorColors::assign(&["alice"]);
        let mut tree = TreeSystem::new(false, 1);
        tree.seed_root(&viewport);
        tree.spawn_commit(&commit("c1", "alice", &["widget.rs"]), &colors, &viewport);

        let shapes = render_elaborate(
            &tree,
            &colors,
            &ContributionHistory::new(),
            &LanguageDistribution::new(),
            0,
            &viewport,
        );
        assert!(shapes.iter().any(|s| matches!(
            s,
            Shape::Text { content, .. } if content == "widget.rs"
        )));
    }

    #[test]
    fn test_active_authors_deduplicated_in_order() {
        let authors = ["bob", "alice", "bob", "carol"];
        assert_eq!(active_authors(authors.into_iter()), vec!["bob", "alice", "carol"]);
    }
}
