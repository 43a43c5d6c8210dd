// Highlight rectangles for a pressed link

use crate::geometry::Rect;
use crate::layout::{GlyphRange, TextLayout};
use serde::{Deserialize, Serialize};

/// How the highlight behind a pressed link is painted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// RGBA, 0xRRGGBBAA
    pub color: u32,
    pub corner_radius: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        HighlightStyle {
            color: 0x00000033, // Black at 20%
            corner_radius: 2.0,
        }
    }
}

/// One rectangle per line fragment `range` touches, top to bottom.
///
/// Each rectangle bounds only the glyphs of `range` on that line.
pub fn highlight_rects<L: TextLayout + ?Sized>(range: GlyphRange, layout: &L) -> Vec<Rect> {
    layout
        .line_fragments_for_glyph_range(range)
        .iter()
        .filter_map(|fragment| fragment.glyph_range.intersection(&range))
        .map(|part| layout.bounding_rect_for_glyph_range(part))
        .filter(|rect| !rect.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FixedAdvance, GlyphLayout, TextContainer};
    use crate::styled_text::StyledText;

    fn laid_out(text: &str, width: f64) -> GlyphLayout {
        let mut layout = GlyphLayout::new(FixedAdvance::new(10.0, 20.0), 14);
        layout.set_text(&StyledText::plain(text));
        layout.set_container(TextContainer::with_width(width));
        layout.ensure_layout_for_container();
        layout
    }

    #[test]
    fn test_single_line() {
        let layout = laid_out("see the docs here", 1000.0);
        let range = layout.glyph_range_for_char_range(8..12);
        assert_eq!(
            highlight_rects(range, &layout),
            vec![Rect::new(80.0, 0.0, 40.0, 20.0)]
        );
    }

    #[test]
    fn test_wrapped_link_yields_rect_per_line() {
        // Lines: "read the " / "manual page " / "now"
        let layout = laid_out("read the manual page now", 120.0);
        let range = layout.glyph_range_for_char_range(5..15);
        assert_eq!(
            highlight_rects(range, &layout),
            vec![
                Rect::new(50.0, 0.0, 40.0, 20.0),
                Rect::new(0.0, 20.0, 60.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_truncated_part_is_skipped() {
        let mut layout = GlyphLayout::new(FixedAdvance::new(10.0, 20.0), 14);
        layout.set_text(&StyledText::plain("aaaa bbbb"));
        layout.set_container(TextContainer {
            max_lines: 1,
            ..TextContainer::with_width(50.0)
        });
        layout.ensure_layout_for_container();
        let range = layout.glyph_range_for_char_range(0..9);
        assert_eq!(
            highlight_rects(range, &layout),
            vec![Rect::new(0.0, 0.0, 50.0, 20.0)]
        );
    }

    #[test]
    fn test_default_style() {
        let style = HighlightStyle::default();
        assert_eq!(style.color, 0x00000033);
        assert_eq!(style.corner_radius, 2.0);
    }
}
