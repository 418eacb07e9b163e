//! Element definitions for the whiteboard.

mod connector;
mod content_box;
mod emoji;
mod image;
mod path;
mod shape;
mod text;

pub use connector::{AttachmentRef, ConnectorElement, LineStyle};
pub use content_box::{
    ContentBoxElement, ContentKind, DEFAULT_CONTENT_BOX_FONT_SIZE, DEFAULT_CONTENT_BOX_HEIGHT,
    DEFAULT_CONTENT_BOX_WIDTH, DEFAULT_TEXT_BOX_HEIGHT, DEFAULT_TEXT_BOX_WIDTH,
    MIN_CONTENT_BOX_SIZE,
};
pub use emoji::{DEFAULT_EMOJI_SIZE, EmojiElement, MIN_EMOJI_SIZE};
pub use image::{ImageElement, MIN_IMAGE_SIZE};
pub use path::PathElement;
pub use shape::{
    DEFAULT_SHAPE_HEIGHT, DEFAULT_SHAPE_WIDTH, MIN_SHAPE_SIZE, ShapeElement, ShapeKind,
};
pub use text::{FontSpec, TextElement};

use kurbo::{Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default stroke width for paths and connectors (virtual units).
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;
/// Default font size for text elements (virtual units).
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Default font family for text elements.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a `#RGB` or `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let (r, g, b) = match digits.len() {
            3 => {
                let mut it = digits.chars();
                let mut channel = || -> Option<u8> {
                    let c = it.next()?.to_digit(16)? as u8;
                    Some(c * 16 + c)
                };
                (channel()?, channel()?, channel()?)
            }
            6 => (
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            ),
            _ => return None,
        };
        Some(Self::new(r, g, b, 255))
    }

    /// Format as a `#RRGGBB` hex string (alpha is dropped).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance on a 0-255 scale.
    fn luminance(self) -> f64 {
        0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
    }

    /// Black or white, whichever reads better against this color as a
    /// background. A missing (transparent) background defaults to black text.
    pub fn contrasting_text_color(background: Option<SerializableColor>) -> SerializableColor {
        match background {
            Some(bg) if bg.luminance() <= 128.0 => SerializableColor::white(),
            _ => SerializableColor::black(),
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// AI-summary state carried by every element kind except connectors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SummaryState {
    /// No summary requested or available.
    #[default]
    None,
    /// A summary request is in flight.
    Loading,
    /// A summary arrived; `visible` controls whether the UI shows it.
    Ready { text: String, visible: bool },
}

impl SummaryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SummaryState::Loading)
    }

    /// The summary text, if one has arrived.
    pub fn text(&self) -> Option<&str> {
        match self {
            SummaryState::Ready { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Whether a usable (non-error) summary is present. Collaborator
    /// failures arrive as `Error:`-prefixed strings and do not count.
    pub fn is_usable(&self) -> bool {
        self.text().is_some_and(|t| !t.starts_with("Error:"))
    }

    pub fn toggle_visible(&mut self) {
        if let SummaryState::Ready { visible, .. } = self {
            *visible = !*visible;
        }
    }
}

/// Enum wrapper for all element types (tagged union, serialized by variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Path(PathElement),
    Text(TextElement),
    Shape(ShapeElement),
    Connector(ConnectorElement),
    Image(ImageElement),
    Emoji(EmojiElement),
    ContentBox(ContentBoxElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Path(e) => e.id,
            Element::Text(e) => e.id,
            Element::Shape(e) => e.id,
            Element::Connector(e) => e.id,
            Element::Image(e) => e.id,
            Element::Emoji(e) => e.id,
            Element::ContentBox(e) => e.id,
        }
    }

    /// Short kind label, used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Path(_) => "path",
            Element::Text(_) => "text",
            Element::Shape(_) => "flowchart-shape",
            Element::Connector(_) => "connector",
            Element::Image(_) => "image",
            Element::Emoji(_) => "emoji",
            Element::ContentBox(_) => "content-box",
        }
    }

    /// Whether this element stores an explicit rect (shape, image,
    /// content box). Rect-like elements are the only ones connectors
    /// can attach to.
    pub fn is_rect_like(&self) -> bool {
        matches!(
            self,
            Element::Shape(_) | Element::Image(_) | Element::ContentBox(_)
        )
    }

    /// The stored rect of a rect-like element.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Element::Shape(e) => Some(e.rect),
            Element::Image(e) => Some(e.rect),
            Element::ContentBox(e) => Some(e.rect),
            _ => None,
        }
    }

    /// Overwrite the stored rect of a rect-like element. No-op for others.
    pub fn set_rect(&mut self, rect: Rect) {
        match self {
            Element::Shape(e) => e.rect = rect,
            Element::Image(e) => e.rect = rect,
            Element::ContentBox(e) => e.rect = rect,
            _ => {}
        }
    }

    /// Move the element by a virtual-space delta.
    ///
    /// Translating a connector this way does NOT clear its soft references;
    /// detachment on manual reposition is an interaction-level rule.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Path(e) => {
                for p in &mut e.points {
                    *p += delta;
                }
            }
            Element::Text(e) => e.origin += delta,
            Element::Shape(e) => e.rect = e.rect + delta,
            Element::Connector(e) => {
                e.start += delta;
                e.end += delta;
            }
            Element::Image(e) => e.rect = e.rect + delta,
            Element::Emoji(e) => e.origin += delta,
            Element::ContentBox(e) => e.rect = e.rect + delta,
        }
    }

    /// Summary state, if this element kind carries one (connectors do not).
    pub fn summary(&self) -> Option<&SummaryState> {
        match self {
            Element::Path(e) => Some(&e.summary),
            Element::Text(e) => Some(&e.summary),
            Element::Shape(e) => Some(&e.summary),
            Element::Connector(_) => None,
            Element::Image(e) => Some(&e.summary),
            Element::Emoji(e) => Some(&e.summary),
            Element::ContentBox(e) => Some(&e.summary),
        }
    }

    pub fn summary_mut(&mut self) -> Option<&mut SummaryState> {
        match self {
            Element::Path(e) => Some(&mut e.summary),
            Element::Text(e) => Some(&mut e.summary),
            Element::Shape(e) => Some(&mut e.summary),
            Element::Connector(_) => None,
            Element::Image(e) => Some(&mut e.summary),
            Element::Emoji(e) => Some(&mut e.summary),
            Element::ContentBox(e) => Some(&mut e.summary),
        }
    }

    pub fn as_connector(&self) -> Option<&ConnectorElement> {
        match self {
            Element::Connector(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_connector_mut(&mut self) -> Option<&mut ConnectorElement> {
        match self {
            Element::Connector(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeElement> {
        match self {
            Element::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(i) => Some(i),
            _ => None,
        }
    }
}
