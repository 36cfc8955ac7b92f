//! PDF Content Stream Generation
//!
//! Builder for the operators that draw a page. Coordinates are PDF user
//! space: origin at the bottom-left, y growing upwards.

use super::objects::{encode_win_ansi, format_number, literal_string};
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// q
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self
    }

    /// Q
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q");
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.write_fmt(format_args!("{} w\n", format_number(width)));
        self
    }

    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} rg\n",
            format_number(r),
            format_number(g),
            format_number(b)
        ));
        self
    }

    pub fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} RG\n",
            format_number(r),
            format_number(g),
            format_number(b)
        ));
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} m\n", format_number(x), format_number(y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} l\n", format_number(x), format_number(y)));
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} {} re\n",
            format_number(x),
            format_number(y),
            format_number(width),
            format_number(height)
        ));
        self
    }

    /// S
    pub fn stroke(&mut self) -> &mut Self {
        self.write_line("S");
        self
    }

    /// f
    pub fn fill(&mut self) -> &mut Self {
        self.write_line("f");
        self
    }

    /// n
    pub fn end_path(&mut self) -> &mut Self {
        self.write_line("n");
        self
    }

    /// B
    pub fn fill_and_stroke(&mut self) -> &mut Self {
        self.write_line("B");
        self
    }

    /// BT
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// ET
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Tf
    pub fn set_font(&mut self, font_name: &str, size: f64) -> &mut Self {
        self.write_fmt(format_args!("/{} {} Tf\n", font_name, format_number(size)));
        self
    }

    /// Tm with a pure translation
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "1 0 0 1 {} {} Tm\n",
            format_number(x),
            format_number(y)
        ));
        self
    }

    /// Tj; text is encoded as WinAnsi
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        let literal = literal_string(&encode_win_ansi(text));
        self.data.extend_from_slice(&literal);
        self.write_line(" Tj");
        self
    }

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.data.write_fmt(args);
    }
}
