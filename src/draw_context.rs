// Drawing backend trait - abstracts over the host toolkit's drawing primitives

/// Font faces a label can draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
    Code,
}

impl Font {
    pub fn is_bold(self) -> bool {
        matches!(self, Font::Bold | Font::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Font::Italic | Font::BoldItalic)
    }
}

/// Colors are RGBA packed as 0xRRGGBBAA
pub trait DrawContext {
    fn set_color(&mut self, color: u32);
    fn set_font(&mut self, font: Font, size: u8);
    /// Draw `text` with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
    fn draw_rect_filled(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn draw_rounded_rect_filled(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
    fn push_clip(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn pop_clip(&mut self);
}
