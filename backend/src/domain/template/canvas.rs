//! Canvas object documents stored inside templates.
//!
//! The editor writes a loose union of object shapes and several aliases for
//! the same concept (`x`/`left`, `fill`/`color`, `stroke`/`borderColor`).
//! Known fields are typed; everything else lands in [`CanvasObject::extra`]
//! so documents round-trip without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanvasObjectKind {
    /// Static text.
    Text,
    /// Editable text.
    IText,
    /// Raster image.
    Image,
    /// Rectangle.
    Rect,
    /// Rectangle alias used by older documents.
    Rectangle,
    /// Circle.
    Circle,
    /// Triangle.
    Triangle,
    /// Polygon from `points`.
    Polygon,
    /// SVG path from `path`.
    Path,
    /// Rectangle with rounded corners.
    RoundedRectangle,
    /// Straight line.
    Line,
    /// Image drop target.
    Placeholder,
    /// Generic shape named by `shape`.
    Shape,
}

/// One element on a template canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject {
    /// Identifier unique within the template.
    pub id: String,
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: CanvasObjectKind,
    /// Horizontal position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Alias of `x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Alias of `y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Width in canvas pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in canvas pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Circle radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Short font name used by simple layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font weight such as `bold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Text alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    /// Alias of `fill` used by simple layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Fill colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Alias of `stroke`, also the selection border colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Stroke width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Image source, usually a data URL or `/uploads/...` path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Corner radius on the x axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    /// Corner radius on the y axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    /// Polygon vertices as a flat coordinate list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    /// SVG path data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the editor lets users select the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
    /// Marks full-bleed background layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_background: Option<bool>,
    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanvasObject {
    /// Blank object of `kind`; callers fill in the fields they need.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: CanvasObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
            x: None,
            y: None,
            left: None,
            top: None,
            width: None,
            height: None,
            radius: None,
            text: None,
            font_size: None,
            font: None,
            font_family: None,
            font_weight: None,
            text_align: None,
            color: None,
            fill: None,
            stroke: None,
            border_color: None,
            stroke_width: None,
            src: None,
            rx: None,
            ry: None,
            points: None,
            path: None,
            selectable: None,
            is_background: None,
            extra: Map::new(),
        }
    }

    /// Set position and size.
    #[must_use]
    pub fn placed(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
