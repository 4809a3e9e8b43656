//! Frame output: a flat scene description of vector shapes
//!
//! The host draws these over its own persistent background layer; the
//! dynamic shape list is rebuilt from scratch every frame, so emission
//! order is paint order.

use serde::Serialize;

use crate::color::GradientDef;

/// One renderable frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub mode: &'static str,
    /// Gradient resources referenced by shape fills, in first-use order
    pub defs: Vec<GradientDef>,
    /// Shapes in paint order (later shapes draw over earlier ones)
    pub shapes: Vec<Shape>,
}

/// A vector shape in viewport coordinates
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    #[serde(rename_all = "camelCase")]
    Circle {
        x: f32,
        y: f32,
        r: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke_width: Option<f32>,
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: String,
        width: f32,
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    Path {
        points: Vec<[f32; 2]>,
        stroke: String,
        width: f32,
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
        rx: f32,
        opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        x: f32,
        y: f32,
        content: String,
        fill: String,
        size: f32,
        opacity: f32,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        bold: bool,
    },
}

impl Shape {
    pub fn filled_circle(x: f32, y: f32, r: f32, fill: &str, opacity: f32) -> Self {
        Shape::Circle {
            x,
            y,
            r,
            fill: Some(fill.to_string()),
            stroke: None,
            stroke_width: None,
            opacity,
        }
    }

    pub fn ring(x: f32, y: f32, r: f32, stroke: &str, stroke_width: f32, opacity: f32) -> Self {
        Shape::Circle {
            x,
            y,
            r,
            fill: None,
            stroke: Some(stroke.to_string()),
            stroke_width: Some(stroke_width),
            opacity,
        }
    }

    pub fn label(x: f32, y: f32, content: &str, fill: &str, size: f32, opacity: f32) -> Self {
        Shape::Text {
            x,
            y,
            content: content.to_string(),
            fill: fill.to_string(),
            size,
            opacity,
            bold: false,
        }
    }

    pub fn title(x: f32, y: f32, content: &str) -> Self {
        Shape::Text {
            x,
            y,
            content: content.to_string(),
            fill: "#ffffff".to_string(),
            size: 12.0,
            opacity: 1.0,
            bold: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_serialization() {
        let shape = Shape::filled_circle(10.0, 20.0, 5.0, "#FF6B6B", 0.9);
        let json = serde_json::to_value(&shape).unwrap();

        assert_eq!(json["type"], "circle");
        assert_eq!(json["x"], 10.0);
        assert_eq!(json["fill"], "#FF6B6B");
        assert!(json.get("stroke").is_none());
    }

    #[test]
    fn test_ring_has_no_fill() {
        let shape = Shape::ring(0.0, 0.0, 8.0, "#444444", 1.0, 0.6);
        let json = serde_json::to_value(&shape).unwrap();

        assert!(json.get("fill").is_none());
        assert_eq!(json["stroke"], "#444444");
        assert_eq!(json["strokeWidth"], 1.0);
    }

    #[test]
    fn test_text_bold_flag_omitted_when_false() {
        let plain = serde_json::to_value(Shape::label(0.0, 0.0, "hi", "#fff", 11.0, 1.0)).unwrap();
        assert!(plain.get("bold").is_none());

        let bold = serde_json::to_value(Shape::title(0.0, 0.0, "Legend:")).unwrap();
        assert_eq!(bold["bold"], true);
    }

    #[test]
    fn test_scene_serialization() {
        let scene = Scene {
            mode: "standard",
            defs: Vec::new(),
            shapes: vec![Shape::filled_circle(1.0, 2.0, 3.0, "#fff", 1.0)],
        };
        let json = serde_json::to_value(&scene).unwrap();

        assert_eq!(json["mode"], "standard");
        assert_eq!(json["shapes"].as_array().unwrap().len(), 1);
    }
}
