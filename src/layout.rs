// Text Layout
// Turns styled text into glyphs positioned in line fragments inside a
// container of fixed width. The label only talks to the `TextLayout` trait;
// `GlyphLayout` is the engine shipped with the crate.

use crate::draw_context::Font;
use crate::geometry::{Point, Rect};
use crate::styled_text::StyledText;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Half-open range `[location, location + length)` over glyph indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphRange {
    pub location: usize,
    pub length: usize,
}

impl GlyphRange {
    pub fn new(location: usize, length: usize) -> Self {
        GlyphRange { location, length }
    }

    pub fn from_bounds(start: usize, end: usize) -> Self {
        GlyphRange {
            location: start,
            length: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.location + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.location <= index && index < self.end()
    }

    /// Overlapping part of both ranges, `None` if they do not overlap
    pub fn intersection(&self, other: &GlyphRange) -> Option<GlyphRange> {
        let start = self.location.max(other.location);
        let end = self.end().min(other.end());
        (start < end).then(|| GlyphRange::from_bounds(start, end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreakMode {
    /// Break between words, falling back to glyphs for words wider than a line
    #[default]
    WordWrap,
    /// Break between any two glyphs
    CharWrap,
    /// Only break at newlines; long lines run past the container edge
    Clip,
}

/// The area text is laid out into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextContainer {
    pub width: f64,
    /// `f64::INFINITY` for no vertical limit
    pub height: f64,
    /// 0 means unlimited
    pub max_lines: usize,
    pub line_break_mode: LineBreakMode,
}

impl TextContainer {
    pub fn with_width(width: f64) -> Self {
        TextContainer {
            width,
            ..Default::default()
        }
    }
}

impl Default for TextContainer {
    fn default() -> Self {
        TextContainer {
            width: f64::INFINITY,
            height: f64::INFINITY,
            max_lines: 0,
            line_break_mode: LineBreakMode::WordWrap,
        }
    }
}

/// One visual line as produced by layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFragment {
    /// Full line box, container width wide
    pub rect: Rect,
    /// Part of the line box covered by glyphs
    pub used_rect: Rect,
    /// Baseline y position
    pub baseline: f64,
    pub glyph_range: GlyphRange,
}

/// Black-box text layout as seen by the label.
///
/// Queries only report glyphs that have been laid out; callers force layout
/// with `ensure_layout_for_char_range` or `ensure_layout_for_container` first.
pub trait TextLayout {
    /// Replace the backing text and attributes
    fn set_text(&mut self, text: &StyledText);
    fn set_container(&mut self, container: TextContainer);
    fn container(&self) -> &TextContainer;

    fn ensure_layout_for_char_range(&mut self, range: Range<usize>);
    fn ensure_layout_for_container(&mut self);

    fn glyph_count(&self) -> usize;
    fn glyph_range_for_char_range(&self, range: Range<usize>) -> GlyphRange;
    fn char_range_for_glyph_range(&self, range: GlyphRange) -> Range<usize>;

    /// Bounds of the laid-out glyphs in `range`, empty if none are laid out
    fn bounding_rect_for_glyph_range(&self, range: GlyphRange) -> Rect;
    /// Index of the laid-out glyph nearest to `point`
    fn glyph_index_for_point(&self, point: Point) -> Option<usize>;
    /// Line fragments intersecting `range`, top to bottom
    fn line_fragments_for_glyph_range(&self, range: GlyphRange) -> Vec<LineFragment>;
}

/// Glyph metrics source
pub trait TextMeasure {
    fn advance(&self, cluster: &str, font: Font, size: u8) -> f64;
    fn line_height(&self, size: u8) -> f64;
    /// Distance from the top of a line to its baseline
    fn ascent(&self, size: u8) -> f64;
}

/// Every glyph has the same advance, like a monospace font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f64,
    pub line_height: f64,
}

impl FixedAdvance {
    pub fn new(advance: f64, line_height: f64) -> Self {
        FixedAdvance {
            advance,
            line_height,
        }
    }

    /// Approximate metrics for a font size: 0.6em advance, 1.2em lines
    pub fn for_font_size(size: u8) -> Self {
        FixedAdvance {
            advance: size as f64 * 0.6,
            line_height: size as f64 * 1.2,
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn advance(&self, _cluster: &str, _font: Font, _size: u8) -> f64 {
        self.advance
    }

    fn line_height(&self, _size: u8) -> f64 {
        self.line_height
    }

    fn ascent(&self, _size: u8) -> f64 {
        self.line_height * 0.8
    }
}

#[derive(Debug, Clone)]
struct Glyph {
    chars: Range<usize>,
    advance: f64,
    whitespace: bool,
    newline: bool,
    /// Set once laid out
    x: f64,
}

#[derive(Debug, Clone)]
struct Line {
    y: f64,
    height: f64,
    glyphs: GlyphRange,
    used_width: f64,
}

/// Layout engine with one glyph per extended grapheme cluster.
///
/// Segmentation happens eagerly when the text is set; line breaking is lazy
/// and only runs as far as the last forced range.
pub struct GlyphLayout {
    measure: Box<dyn TextMeasure>,
    font_size: u8,
    source: StyledText,
    container: TextContainer,
    glyphs: Vec<Glyph>,
    lines: Vec<Line>,
    // First glyph not yet placed on a line
    next_glyph: usize,
}

impl GlyphLayout {
    pub fn new(measure: impl TextMeasure + 'static, font_size: u8) -> Self {
        GlyphLayout {
            measure: Box::new(measure),
            font_size,
            source: StyledText::new(),
            container: TextContainer::default(),
            glyphs: Vec::new(),
            lines: Vec::new(),
            next_glyph: 0,
        }
    }

    /// Number of glyphs placed on lines so far
    pub fn laid_out_glyph_count(&self) -> usize {
        self.next_glyph
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn invalidate(&mut self) {
        self.lines.clear();
        self.next_glyph = 0;
    }

    fn lay_out_until(&mut self, glyph_end: usize) {
        while self.next_glyph < glyph_end.min(self.glyphs.len()) && self.lay_out_next_line() {}
    }

    /// Place the next line of glyphs. Returns false when nothing more fits.
    fn lay_out_next_line(&mut self) -> bool {
        let start = self.next_glyph;
        if start >= self.glyphs.len() {
            return false;
        }
        if self.container.max_lines > 0 && self.lines.len() >= self.container.max_lines {
            return false;
        }
        let y = self.lines.last().map_or(0.0, |l| l.y + l.height);
        let height = self.measure.line_height(self.font_size);
        if y + height > self.container.height {
            return false;
        }

        let end = match self.container.line_break_mode {
            LineBreakMode::WordWrap => self.word_wrap_end(start),
            LineBreakMode::CharWrap => self.char_wrap_end(start),
            LineBreakMode::Clip => self.clip_end(start),
        };

        let mut x = 0.0;
        let mut used_width: f64 = 0.0;
        for glyph in &mut self.glyphs[start..end] {
            glyph.x = x;
            x += glyph.advance;
            if !glyph.whitespace {
                used_width = x;
            }
        }

        self.lines.push(Line {
            y,
            height,
            glyphs: GlyphRange::from_bounds(start, end),
            used_width,
        });
        self.next_glyph = end;
        true
    }

    fn word_wrap_end(&self, start: usize) -> usize {
        let width = self.container.width;
        let mut x = 0.0;
        let mut i = start;
        while i < self.glyphs.len() {
            let glyph = &self.glyphs[i];
            if glyph.newline {
                return i + 1;
            }
            if glyph.whitespace {
                // Trailing whitespace hangs past the edge instead of wrapping
                x += glyph.advance;
                i += 1;
                continue;
            }

            let mut word_end = i;
            let mut word_width = 0.0;
            while word_end < self.glyphs.len()
                && !self.glyphs[word_end].whitespace
                && !self.glyphs[word_end].newline
            {
                word_width += self.glyphs[word_end].advance;
                word_end += 1;
            }

            if x + word_width <= width {
                x += word_width;
                i = word_end;
                continue;
            }
            if i > start {
                return i;
            }
            // A word wider than the whole line is broken between glyphs
            return self.char_wrap_end(start);
        }
        i
    }

    fn char_wrap_end(&self, start: usize) -> usize {
        let width = self.container.width;
        let mut x = 0.0;
        let mut i = start;
        while i < self.glyphs.len() {
            let glyph = &self.glyphs[i];
            if glyph.newline {
                return i + 1;
            }
            if i > start && !glyph.whitespace && x + glyph.advance > width {
                return i;
            }
            x += glyph.advance;
            i += 1;
        }
        i
    }

    fn clip_end(&self, start: usize) -> usize {
        self.glyphs[start..]
            .iter()
            .position(|g| g.newline)
            .map_or(self.glyphs.len(), |p| start + p + 1)
    }

    fn glyph_rect(&self, line: &Line, index: usize) -> Rect {
        let glyph = &self.glyphs[index];
        Rect::new(glyph.x, line.y, glyph.advance, line.height)
    }

    fn fragment(&self, line: &Line) -> LineFragment {
        let width = if self.container.width.is_finite() {
            self.container.width.max(line.used_width)
        } else {
            line.used_width
        };
        LineFragment {
            rect: Rect::new(0.0, line.y, width, line.height),
            used_rect: Rect::new(0.0, line.y, line.used_width, line.height),
            baseline: line.y + self.measure.ascent(self.font_size),
            glyph_range: line.glyphs,
        }
    }
}

impl TextLayout for GlyphLayout {
    fn set_text(&mut self, text: &StyledText) {
        if *text == self.source {
            return;
        }
        self.glyphs = text
            .text()
            .grapheme_indices(true)
            .map(|(offset, cluster)| {
                let newline = matches!(cluster, "\n" | "\r\n" | "\r");
                let advance = if newline {
                    0.0
                } else {
                    self.measure
                        .advance(cluster, text.font_at(offset), self.font_size)
                };
                Glyph {
                    chars: offset..offset + cluster.len(),
                    advance,
                    whitespace: cluster.chars().all(char::is_whitespace),
                    newline,
                    x: 0.0,
                }
            })
            .collect();
        self.source = text.clone();
        self.invalidate();
    }

    fn set_container(&mut self, container: TextContainer) {
        if container != self.container {
            self.container = container;
            self.invalidate();
        }
    }

    fn container(&self) -> &TextContainer {
        &self.container
    }

    fn ensure_layout_for_char_range(&mut self, range: Range<usize>) {
        let glyphs = self.glyph_range_for_char_range(range);
        self.lay_out_until(glyphs.end().max(glyphs.location + 1));
    }

    fn ensure_layout_for_container(&mut self) {
        self.lay_out_until(self.glyphs.len());
    }

    fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn glyph_range_for_char_range(&self, range: Range<usize>) -> GlyphRange {
        let start = self.glyphs.partition_point(|g| g.chars.end <= range.start);
        if range.is_empty() {
            return GlyphRange::new(start, 0);
        }
        let end = self.glyphs.partition_point(|g| g.chars.start < range.end);
        GlyphRange::from_bounds(start, end)
    }

    fn char_range_for_glyph_range(&self, range: GlyphRange) -> Range<usize> {
        let start = self
            .glyphs
            .get(range.location)
            .map_or(self.source.len(), |g| g.chars.start);
        if range.is_empty() {
            return start..start;
        }
        let end = self
            .glyphs
            .get(range.end().min(self.glyphs.len()).saturating_sub(1))
            .map_or(self.source.len(), |g| g.chars.end);
        start..end.max(start)
    }

    fn bounding_rect_for_glyph_range(&self, range: GlyphRange) -> Rect {
        let mut bounds = Rect::default();
        for line in &self.lines {
            let Some(part) = line.glyphs.intersection(&range) else {
                continue;
            };
            for index in part.location..part.end() {
                bounds = bounds.union(&self.glyph_rect(line, index));
            }
        }
        bounds
    }

    fn glyph_index_for_point(&self, point: Point) -> Option<usize> {
        let line = self
            .lines
            .iter()
            .find(|l| point.y < l.y + l.height)
            .or(self.lines.last())?;

        let range = line.glyphs;
        (range.location..range.end())
            .find(|&i| {
                let g = &self.glyphs[i];
                point.x < g.x + g.advance
            })
            .or_else(|| range.end().checked_sub(1))
    }

    fn line_fragments_for_glyph_range(&self, range: GlyphRange) -> Vec<LineFragment> {
        self.lines
            .iter()
            .filter(|line| line.glyphs.intersection(&range).is_some())
            .map(|line| self.fragment(line))
            .collect()
    }
}
