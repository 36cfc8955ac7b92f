//! Presentational attributes attached to every block

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default text color for new blocks
pub const DEFAULT_TEXT_COLOR: &str = "#1f2937";

/// Font weight of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
    Bold,
}

impl FontWeight {
    /// Whether output formats with only a bold/regular distinction should use bold
    pub fn is_bold(&self) -> bool {
        matches!(self, FontWeight::Bold | FontWeight::Semibold)
    }

    /// CSS `font-weight` value
    pub fn css_value(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Semibold => "600",
            FontWeight::Bold => "bold",
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Style record of a content block.
///
/// Sizes and margins are CSS pixels; `line_height` is a unitless multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub line_height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Left,
            color: DEFAULT_TEXT_COLOR.to_string(),
            background_color: None,
            margin_top: 16.0,
            margin_bottom: 16.0,
            line_height: 1.5,
            font_family: None,
            italic: None,
            underline: None,
            strikethrough: None,
        }
    }
}

impl BlockStyle {
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }

    pub fn is_underline(&self) -> bool {
        self.underline.unwrap_or(false)
    }

    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough.unwrap_or(false)
    }

    /// Height of one rendered line of this block's text, in pixels
    pub fn line_pixels(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Text color as RGB components, if it is a valid hex color
    pub fn color_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Partial style update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStylePatch {
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub text_align: Option<TextAlign>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub margin_top: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub line_height: Option<f32>,
    pub font_family: Option<String>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
}

impl BlockStylePatch {
    /// Shallow-merge this patch into a style
    pub fn apply(&self, style: &mut BlockStyle) {
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = self.font_weight {
            style.font_weight = v;
        }
        if let Some(v) = self.text_align {
            style.text_align = v;
        }
        if let Some(v) = &self.color {
            style.color = v.clone();
        }
        if let Some(v) = &self.background_color {
            style.background_color = Some(v.clone());
        }
        if let Some(v) = self.margin_top {
            style.margin_top = v;
        }
        if let Some(v) = self.margin_bottom {
            style.margin_bottom = v;
        }
        if let Some(v) = self.line_height {
            style.line_height = v;
        }
        if let Some(v) = &self.font_family {
            style.font_family = Some(v.clone());
        }
        if self.italic.is_some() {
            style.italic = self.italic;
        }
        if self.underline.is_some() {
            style.underline = self.underline;
        }
        if self.strikethrough.is_some() {
            style.strikethrough = self.strikethrough;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn hex_color_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#?([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").ok())
        .as_ref()
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional)
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let caps = hex_color_regex()?.captures(value.trim())?;
    let hex = caps.get(1)?.as_str();
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = BlockStyle::default();
        assert_eq!(style.color, "#1f2937");
        assert_eq!(style.margin_top, 16.0);
        assert_eq!(style.line_height, 1.5);
        assert_eq!(style.text_align, TextAlign::Left);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1f2937"), Some((0x1f, 0x29, 0x37)));
        assert_eq!(parse_hex_color("fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut style = BlockStyle::default();
        let patch = BlockStylePatch {
            font_size: Some(20.0),
            italic: Some(true),
            ..Default::default()
        };
        patch.apply(&mut style);

        assert_eq!(style.font_size, 20.0);
        assert!(style.is_italic());
        assert_eq!(style.color, DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn test_style_json_is_camel_case() {
        let json = serde_json::to_value(BlockStyle::default()).unwrap();
        assert!(json.get("fontSize").is_some());
        assert!(json.get("fontWeight").is_some());
        assert!(json.get("backgroundColor").is_none());
    }

    #[test]
    fn test_missing_style_fields_use_defaults() {
        let style: BlockStyle = serde_json::from_str(r#"{"fontSize": 24}"#).unwrap();
        assert_eq!(style.font_size, 24.0);
        assert_eq!(style.line_height, 1.5);
    }
}
