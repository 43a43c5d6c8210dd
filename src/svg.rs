// SVG-based DrawContext implementation
// Renders a label to SVG markup, used by the CLI and by snapshot tests

use crate::draw_context::{DrawContext, Font};
use std::fmt::Write;

/// SVG-based drawing context that generates SVG markup
pub struct SvgDrawContext {
    svg_content: String,
    current_color: u32,
    current_font: Font,
    current_size: u8,
    clip_stack: Vec<(i32, i32, i32, i32)>,
}

impl SvgDrawContext {
    /// Create a new SVG drawing context with a white background
    pub fn new(width: i32, height: i32) -> Self {
        let mut svg_content = String::new();
        writeln!(
            svg_content,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )
        .unwrap();
        writeln!(
            svg_content,
            r##"  <rect width="{width}" height="{height}" fill="#ffffff"/>"##
        )
        .unwrap();

        SvgDrawContext {
            svg_content,
            current_color: 0x000000FF,
            current_font: Font::Plain,
            current_size: 14,
            clip_stack: Vec::new(),
        }
    }

    /// Get the generated SVG content
    pub fn finish(mut self) -> String {
        self.svg_content.push_str("</svg>\n");
        self.svg_content
    }

    /// Convert RGBA color to SVG color string
    fn color_to_svg(color: u32) -> String {
        let r = (color >> 24) & 0xFF;
        let g = (color >> 16) & 0xFF;
        let b = (color >> 8) & 0xFF;
        let a = color & 0xFF;

        if a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {:.2})", r, g, b, a as f32 / 255.0)
        }
    }

    fn font_family(font: Font) -> &'static str {
        match font {
            Font::Code => "Courier, 'Courier New', monospace",
            _ => "Helvetica, Arial, sans-serif",
        }
    }

    fn escape_xml(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }

    fn clip_attr(&self) -> String {
        match self.clip_stack.last() {
            Some(&(cx, cy, cw, ch)) => format!(r#" clip-path="url(#clip-{cx}-{cy}-{cw}-{ch})""#),
            None => String::new(),
        }
    }
}

impl DrawContext for SvgDrawContext {
    fn set_color(&mut self, color: u32) {
        self.current_color = color;
    }

    fn set_font(&mut self, font: Font, size: u8) {
        self.current_font = font;
        self.current_size = size;
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        if text.is_empty() {
            return;
        }

        let color = Self::color_to_svg(self.current_color);
        let family = Self::font_family(self.current_font);
        let weight = if self.current_font.is_bold() { "bold" } else { "normal" };
        let style = if self.current_font.is_italic() { "italic" } else { "normal" };
        let clip = self.clip_attr();
        writeln!(
            self.svg_content,
            r#"  <text x="{}" y="{}" fill="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}"{}>{}</text>"#,
            x,
            y,
            color,
            family,
            self.current_size,
            weight,
            style,
            clip,
            Self::escape_xml(text)
        )
        .unwrap();
    }

    fn draw_rect_filled(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let color = Self::color_to_svg(self.current_color);
        let clip = self.clip_attr();
        writeln!(
            self.svg_content,
            r#"  <rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{color}"{clip}/>"#
        )
        .unwrap();
    }

    fn draw_rounded_rect_filled(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32) {
        let color = Self::color_to_svg(self.current_color);
        let clip = self.clip_attr();
        writeln!(
            self.svg_content,
            r#"  <rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{radius}" fill="{color}"{clip}/>"#
        )
        .unwrap();
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let color = Self::color_to_svg(self.current_color);
        writeln!(
            self.svg_content,
            r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{color}" stroke-width="1"/>"#
        )
        .unwrap();
    }

    fn push_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let clip_id = format!("clip-{x}-{y}-{w}-{h}");

        // Only add the clip definition if it doesn't exist yet
        if !self.svg_content.contains(&clip_id) {
            writeln!(
                self.svg_content,
                r#"  <defs><clipPath id="{clip_id}"><rect x="{x}" y="{y}" width="{w}" height="{h}"/></clipPath></defs>"#
            )
            .unwrap();
        }

        self.clip_stack.push((x, y, w, h));
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}
