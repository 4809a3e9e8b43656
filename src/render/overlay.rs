//! Overlay charts: author legend, contribution bars, language bars
//!
//! All three use the same horizontal bar layout and draw in fixed
//! screen corners, independent of the simulation's projection.

use std::collections::HashMap;

use crate::color::{extension_color, AuthorColors};
use crate::metrics::LanguageDistribution;

use super::project::Viewport;
use super::scene::Shape;

const BAR_WIDTH: f32 = 150.0;
const BAR_HEIGHT: f32 = 15.0;
const BAR_SPACING: f32 = 5.0;
/// At most this many bars per chart; the rest collapse into a note
const MAX_BARS: usize = 15;
/// At most this many authors in the legend
const MAX_LEGEND_AUTHORS: usize = 10;
const NAME_TRUNCATE: usize = 20;

fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_TRUNCATE {
        let head: String = name.chars().take(NAME_TRUNCATE).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Colored dot + name for each author active among live entities
pub fn author_legend(active: &[&str], colors: &AuthorColors, viewport: &Viewport) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let x = viewport.width - 200.0;
    let mut y = 50.0;

    shapes.push(Shape::title(x, y, "Active Authors:"));
    y += 20.0;

    for author in active.iter().take(MAX_LEGEND_AUTHORS) {
        let color = colors.get(author);
        shapes.push(Shape::filled_circle(x, y, 4.0, color, 1.0));
        shapes.push(Shape::label(x + 10.0, y + 4.0, &truncate_name(author), color, 11.0, 1.0));
        y += 18.0;
    }

    shapes
}

/// Horizontal bars of author contribution percentages, largest first
pub fn contribution_bars(
    snapshot: Option<&HashMap<String, f32>>,
    colors: &AuthorColors,
) -> Vec<Shape> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };
    if snapshot.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<(&str, f32)> = snapshot
        .iter()
        .map(|(author, pct)| (author.as_str(), *pct))
        .collect();
    sorted.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let start_x = 20.0;
    let start_y = 50.0;
    let mut shapes = vec![Shape::title(start_x, start_y - 10.0, "Contribution Percentages:")];

    for (index, (author, percentage)) in sorted.iter().take(MAX_BARS).enumerate() {
        let bar_y = start_y + index as f32 * (BAR_HEIGHT + BAR_SPACING);
        let color = colors.get(author);

        shapes.push(bar_background(start_x, bar_y));
        shapes.push(bar_fill(start_x, bar_y, *percentage, color));
        shapes.push(Shape::label(
            start_x + BAR_WIDTH + 5.0,
            bar_y + BAR_HEIGHT - 3.0,
            &format!("{}: {:.1}%", author, percentage),
            color,
            11.0,
            1.0,
        ));
    }

    if sorted.len() > MAX_BARS {
        shapes.push(more_note(
            start_x,
            start_y,
            &format!("... and {} more authors", sorted.len() - MAX_BARS),
        ));
    }

    shapes
}

/// Horizontal bars of the extension distribution, largest first
pub fn language_bars(languages: &LanguageDistribution, viewport: &Viewport) -> Vec<Shape> {
    let rows = languages.percentages();
    if rows.is_empty() {
        return Vec::new();
    }

    let start_x = 20.0;
    let start_y = viewport.height - 300.0;
    let mut shapes = vec![Shape::title(start_x, start_y - 10.0, "Language Distribution:")];

    for (index, (ext, percentage, count)) in rows.iter().take(MAX_BARS).enumerate() {
        let bar_y = start_y + index as f32 * (BAR_HEIGHT + BAR_SPACING);
        let color = extension_color(ext);

        shapes.push(bar_background(start_x, bar_y));
        shapes.push(bar_fill(start_x, bar_y, *percentage, color));
        shapes.push(Shape::label(
            start_x + BAR_WIDTH + 5.0,
            bar_y + BAR_HEIGHT - 3.0,
            &format!("{}: {:.1}% ({} files)", ext, percentage, count),
            color,
            11.0,
            1.0,
        ));
    }

    if rows.len() > MAX_BARS {
        shapes.push(more_note(
            start_x,
            start_y,
            &format!("... and {} more languages", rows.len() - MAX_BARS),
        ));
    }

    shapes
}

fn bar_background(x: f32, y: f32) -> Shape {
    Shape::Rect {
        x,
        y,
        width: BAR_WIDTH,
        height: BAR_HEIGHT,
        fill: "#333333".to_string(),
        rx: 3.0,
        opacity: 1.0,
    }
}

fn bar_fill(x: f32, y: f32, percentage: f32, color: &str) -> Shape {
    Shape::Rect {
        x,
        y,
        width: percentage / 100.0 * BAR_WIDTH,
        height: BAR_HEIGHT,
        fill: color.to_string(),
        rx: 3.0,
        opacity: 1.0,
    }
}

fn more_note(x: f32, start_y: f32, content: &str) -> Shape {
    Shape::label(
        x,
        start_y + MAX_BARS as f32 * (BAR_HEIGHT + BAR_SPACING) + 10.0,
        content,
        "#aaaaaa",
        10.0,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CommitRecord;

    #[test]
    fn test_legend_caps_at_ten_authors() {
        let names: Vec<String> = (0..14).map(|i| format!("author{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let colors = AuthorColors::assign(&refs);

        let shapes = author_legend(&refs, &colors, &Viewport::default());
        // Title + (dot + label) per author
        assert_eq!(shapes.len(), 1 + MAX_LEGEND_AUTHORS * 2);
    }

    #[test]
    fn test_legend_truncates_long_names() {
        let long = "a-very-long-author-name-indeed";
        let colors = AuthorColors::assign(&[long]);
        let shapes = author_legend(&[long], &colors, &Viewport::default());

        let Shape::Text { content, .. } = &shapes[2] else {
            panic!("expected label");
        };
        assert_eq!(content, "a-very-long-author-n...");
    }

    #[test]
    fn test_contribution_bars_sorted_descending() {
        let colors = AuthorColors::assign(&["alice", "bob"]);
        let mut snapshot = HashMap::new();
        snapshot.insert("alice".to_string(), 25.0);
        snapshot.insert("bob".to_string(), 75.0);

        let shapes = contribution_bars(Some(&snapshot), &colors);
        let labels: Vec<&String> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { content, bold: false, .. } => Some(content),
                _ => None,
            })
            .collect();

        assert_eq!(labels[0], "bob: 75.0%");
        assert_eq!(labels[1], "alice: 25.0%");
    }

    #[test]
    fn test_contribution_bars_truncate_with_note() {
        let names: Vec<String> = (0..20).map(|i| format!("author{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let colors = AuthorColors::assign(&refs);
        let snapshot: HashMap<String, f32> =
            names.iter().map(|n| (n.clone(), 5.0)).collect();

        let shapes = contribution_bars(Some(&snapshot), &colors);
        let note = shapes.iter().rev().find_map(|s| match s {
            Shape::Text { content, .. } => Some(content.clone()),
            _ => None,
        });
        assert_eq!(note.unwrap(), "... and 5 more authors");
    }

    #[test]
    fn test_no_bars_without_snapshot() {
        let colors = AuthorColors::default();
        assert!(contribution_bars(None, &colors).is_empty());
        assert!(contribution_bars(Some(&HashMap::new()), &colors).is_empty());
    }

    #[test]
    fn test_language_bars_label_format() {
        let mut languages = LanguageDistribution::new();
        languages.record(&CommitRecord {
            hash: "c1".to_string(),
            author: "alice".to_string(),
            date: String::new(),
            message: String::new(),
            files_changed: 2,
            insertions: 0,
            deletions: 0,
            files: vec!["a.rs".to_string(), "b.rs".to_string()],
        });

        let shapes = language_bars(&languages, &Viewport::default());
        let label = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Text { content, bold: false, .. } => Some(content.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(label, ".rs: 100.0% (2 files)");
    }

    #[test]
    fn test_bar_fill_width_tracks_percentage() {
        let shape = bar_fill(0.0, 0.0, 50.0, "#fff");
        let Shape::Rect { width, .. } = shape else {
            panic!("expected rect");
        };
        assert!((width - 75.0).abs() < 0.001);
    }
}
