//! PDF Font Handling
//!
//! Only the standard Type1 fonts are used, so nothing is embedded. Font
//! families are matched to Times, Helvetica or Courier by name.

use super::objects::{PdfDictionary, PdfObject};
use std::collections::BTreeMap;

/// Standard PDF fonts available in every viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// BaseFont name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Pick a standard font for a family name; unknown families get Helvetica
    pub fn from_name(name: &str, bold: bool, italic: bool) -> Self {
        let name = name.to_lowercase();
        let serif = name.contains("times")
            || name.contains("georgia")
            || name.contains("garamond")
            || (name.contains("serif") && !name.contains("sans"));
        let mono = name.contains("courier") || name.contains("mono");

        match (serif, mono, bold, italic) {
            (true, _, false, false) => StandardFont::TimesRoman,
            (true, _, true, false) => StandardFont::TimesBold,
            (true, _, false, true) => StandardFont::TimesItalic,
            (true, _, true, true) => StandardFont::TimesBoldItalic,
            (false, true, false, false) => StandardFont::Courier,
            (false, true, true, false) => StandardFont::CourierBold,
            (false, true, false, true) => StandardFont::CourierOblique,
            (false, true, true, true) => StandardFont::CourierBoldOblique,
            (false, false, false, false) => StandardFont::Helvetica,
            (false, false, true, false) => StandardFont::HelveticaBold,
            (false, false, false, true) => StandardFont::HelveticaOblique,
            (false, false, true, true) => StandardFont::HelveticaBoldOblique,
        }
    }

    /// Average glyph advance as a fraction of the font size
    fn average_width(&self) -> f64 {
        match self {
            StandardFont::Courier
            | StandardFont::CourierBold
            | StandardFont::CourierOblique
            | StandardFont::CourierBoldOblique => 0.6,
            StandardFont::Helvetica | StandardFont::HelveticaOblique => 0.5,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => 0.54,
            StandardFont::TimesRoman | StandardFont::TimesItalic => 0.45,
            StandardFont::TimesBold | StandardFont::TimesBoldItalic => 0.48,
        }
    }
}

/// Estimate the width of a string in a standard font
pub fn estimate_text_width(text: &str, font: StandardFont, font_size: f64) -> f64 {
    text.chars().count() as f64 * font.average_width() * font_size
}

/// Resource names of the fonts used by a document
#[derive(Debug, Default)]
pub struct FontManager {
    fonts: BTreeMap<StandardFont, String>,
}

impl FontManager {
    /// Resource name for `font`, registering it on first use
    pub fn resource_name(&mut self, font: StandardFont) -> String {
        let next = self.fonts.len() + 1;
        self.fonts
            .entry(font)
            .or_insert_with(|| format!("F{next}"))
            .clone()
    }

    /// Registered fonts with their resource names
    pub fn fonts(&self) -> impl Iterator<Item = (StandardFont, &str)> {
        self.fonts.iter().map(|(font, name)| (*font, name.as_str()))
    }
}

/// Font dictionary for a standard font
pub fn create_standard_font_dict(font: StandardFont) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(font.pdf_name()));
    dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
    dict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_matching() {
        assert_eq!(StandardFont::from_name("Arial", false, false), StandardFont::Helvetica);
        assert_eq!(
            StandardFont::from_name("Times New Roman", true, false),
            StandardFont::TimesBold
        );
        assert_eq!(
            StandardFont::from_name("Courier New", false, true),
            StandardFont::CourierOblique
        );
        assert_eq!(
            StandardFont::from_name("Open Sans", false, false),
            StandardFont::Helvetica
        );
        assert_eq!(
            StandardFont::from_name("Inter", true, true),
            StandardFont::HelveticaBoldOblique
        );
    }

    #[test]
    fn test_resource_names_are_stable() {
        let mut manager = FontManager::default();
        assert_eq!(manager.resource_name(StandardFont::Helvetica), "F1");
        assert_eq!(manager.resource_name(StandardFont::TimesBold), "F2");
        assert_eq!(manager.resource_name(StandardFont::Helvetica), "F1");
        assert_eq!(manager.fonts().count(), 2);
    }

    #[test]
    fn test_font_dict() {
        let dict = create_standard_font_dict(StandardFont::Helvetica);
        assert!(matches!(dict.get("BaseFont"), Some(PdfObject::Name(n)) if n == "Helvetica"));
        assert!(dict.get("Encoding").is_some());
    }

    #[test]
    fn test_width_estimate() {
        assert_eq!(estimate_text_width("abcd", StandardFont::Courier, 10.0), 24.0);
    }
}
