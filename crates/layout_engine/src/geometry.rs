//! Page geometry derived from document settings

use doc_model::DocumentSettings;

/// Page box and content box of a document page, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// Margins are clamped so the content box keeps at least a quarter of each side
    pub fn from_settings(settings: &DocumentSettings) -> Self {
        let (width, height) = settings.page_dimensions();
        let max_margin = width.min(height) * 0.375;
        let margin = if settings.page_margins.is_finite() {
            settings.page_margins.clamp(0.0, max_margin)
        } else {
            0.0
        };
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Left edge of the content box
    pub fn content_left(&self) -> f32 {
        self.margin
    }

    /// Top edge of the content box, measured from the top of the page
    pub fn content_top(&self) -> f32 {
        self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Orientation, PageSize};

    #[test]
    fn test_letter_one_inch_margins() {
        let settings = DocumentSettings {
            page_size: PageSize::Letter,
            ..Default::default()
        };
        let geometry = PageGeometry::from_settings(&settings);
        assert_eq!(geometry.content_width(), 468.0);
        assert_eq!(geometry.content_height(), 648.0);
    }

    #[test]
    fn test_landscape() {
        let settings = DocumentSettings {
            page_size: PageSize::Legal,
            page_orientation: Orientation::Landscape,
            page_margins: 0.0,
            ..Default::default()
        };
        let geometry = PageGeometry::from_settings(&settings);
        assert_eq!((geometry.width, geometry.height), (1008.0, 612.0));
    }

    #[test]
    fn test_absurd_margins_are_clamped() {
        let settings = DocumentSettings {
            page_size: PageSize::Letter,
            page_margins: 10_000.0,
            ..Default::default()
        };
        let geometry = PageGeometry::from_settings(&settings);
        assert!(geometry.content_width() > 0.0);
        assert!(geometry.content_height() > 0.0);
    }
}
