// Link Label
// A read-only text widget that finds links in its styled text, resolves
// touches to links, and highlights the link under an active touch.

use crate::config::LabelConfig;
use crate::draw_context::{DrawContext, Font};
use crate::geometry::{Point, Rect};
use crate::highlight::{HighlightStyle, highlight_rects};
use crate::hit_test::hit_test;
use crate::interaction::{Dispatch, Interaction};
use crate::layout::{
    GlyphLayout, GlyphRange, LineBreakMode, LineFragment, TextContainer, TextLayout,
};
use crate::links::{LinkEntry, extract_links, sync_layout};
use crate::styled_text::StyledText;
use url::Url;

/// Callback receiving the target of an activated link
pub type LinkHandler = Box<dyn FnMut(&Url) + 'static>;

/// A stretch of glyphs on one line drawn with the same font and color
struct GlyphRun {
    glyphs: GlyphRange,
    font: Font,
    link: bool,
}

pub struct LinkLabel<L: TextLayout = GlyphLayout> {
    layout: L,

    // Content
    text: StyledText,
    links: Vec<LinkEntry>,

    // Container
    width: f64,
    max_lines: usize,
    line_break_mode: LineBreakMode,

    // Styling
    font_size: u8,
    text_color: u32,
    link_color: u32,
    highlight: HighlightStyle,

    // Touch handling
    interaction: Interaction,
    tap_handler: Option<LinkHandler>,
    long_press_handler: Option<LinkHandler>,
    default_action: LinkHandler,

    redraw_requested: bool,
}

impl LinkLabel<GlyphLayout> {
    /// Label using the built-in layout engine with metrics from `config`
    pub fn from_config(
        config: &LabelConfig,
        width: f64,
        default_action: impl FnMut(&Url) + 'static,
    ) -> Self {
        let layout = GlyphLayout::new(config.measure(), config.font_size);
        let mut label = LinkLabel::new(layout, width, default_action);
        label.font_size = config.font_size;
        label.text_color = config.text_color;
        label.link_color = config.link_color;
        label.highlight = config.highlight;
        label.max_lines = config.max_lines;
        label.line_break_mode = config.line_break_mode;
        label
    }
}

impl<L: TextLayout> LinkLabel<L> {
    /// `default_action` runs for taps when no tap handler is set
    pub fn new(layout: L, width: f64, default_action: impl FnMut(&Url) + 'static) -> Self {
        let defaults = LabelConfig::default();
        LinkLabel {
            layout,
            text: StyledText::new(),
            links: Vec::new(),
            width,
            max_lines: defaults.max_lines,
            line_break_mode: defaults.line_break_mode,
            font_size: defaults.font_size,
            text_color: defaults.text_color,
            link_color: defaults.link_color,
            highlight: defaults.highlight,
            interaction: Interaction::Idle,
            tap_handler: None,
            long_press_handler: None,
            default_action: Box::new(default_action),
            redraw_requested: false,
        }
    }

    pub fn text(&self) -> &StyledText {
        &self.text
    }

    /// Replace the text and recompute the links it contains
    pub fn set_text(&mut self, text: StyledText) {
        self.text = text;
        self.refresh_links();
    }

    /// Links found in the current text, left to right
    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        if self.width != width {
            self.width = width;
            self.refresh_links();
        }
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// 0 means unlimited
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.max_lines = max_lines;
        self.refresh_links();
    }

    pub fn line_break_mode(&self) -> LineBreakMode {
        self.line_break_mode
    }

    pub fn set_line_break_mode(&mut self, mode: LineBreakMode) {
        self.line_break_mode = mode;
        self.refresh_links();
    }

    pub fn highlight_style(&self) -> HighlightStyle {
        self.highlight
    }

    pub fn set_highlight_color(&mut self, color: u32) {
        self.highlight.color = color;
        self.redraw_requested = true;
    }

    pub fn set_highlight_corner_radius(&mut self, radius: f64) {
        self.highlight.corner_radius = radius;
        self.redraw_requested = true;
    }

    pub fn set_tap_handler(&mut self, handler: Option<LinkHandler>) {
        self.tap_handler = handler;
    }

    pub fn set_long_press_handler(&mut self, handler: Option<LinkHandler>) {
        self.long_press_handler = handler;
    }

    /// The link under the active touch, if any
    pub fn pressed_link(&self) -> Option<&LinkEntry> {
        self.interaction.pressed()
    }

    /// Whether the label needs repainting. Clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn container(&self) -> TextContainer {
        TextContainer {
            width: self.width,
            height: f64::INFINITY,
            max_lines: self.max_lines,
            line_break_mode: self.line_break_mode,
        }
    }

    fn refresh_links(&mut self) {
        let container = self.container();
        self.links = extract_links(&self.text, &mut self.layout, container);
        self.redraw_requested = true;
    }

    fn sync_and_lay_out(&mut self) {
        let container = self.container();
        sync_layout(&mut self.layout, &self.text, container);
        self.layout.ensure_layout_for_container();
    }

    /// Link drawn at `point`, in label coordinates
    pub fn link_at(&mut self, point: Point) -> Option<&LinkEntry> {
        let container = self.container();
        hit_test(point, &self.links, &self.text, &mut self.layout, container)
    }

    pub fn touch_began(&mut self, point: Point) {
        let hit = self.link_at(point).cloned();
        self.interaction.touch_began(hit);
        self.redraw_requested = true;
    }

    pub fn touch_ended(&mut self, _point: Point) {
        let dispatch = self.interaction.touch_ended();
        self.redraw_requested = true;
        if let Some(Dispatch::Tap(url)) = dispatch {
            tracing::debug!(%url, "link tapped");
            match &mut self.tap_handler {
                Some(handler) => handler(&url),
                None => (self.default_action)(&url),
            }
        }
    }

    pub fn touch_cancelled(&mut self, _point: Point) {
        self.interaction.touch_cancelled();
        self.redraw_requested = true;
    }

    /// The gesture system recognized a long press on the active touch
    pub fn long_press(&mut self) {
        if let Some(Dispatch::LongPress(url)) = self.interaction.long_press() {
            tracing::debug!(%url, "link long-pressed");
            if let Some(handler) = &mut self.long_press_handler {
                handler(&url);
            }
        }
    }

    /// Highlight rectangles for the pressed link, empty when nothing is pressed
    pub fn pressed_link_rects(&mut self) -> Vec<Rect> {
        let Some(range) = self.interaction.pressed().map(|l| l.glyph_range) else {
            return Vec::new();
        };
        self.sync_and_lay_out();
        highlight_rects(range, &self.layout)
    }

    /// Size of the laid-out text
    pub fn content_size(&mut self) -> (f64, f64) {
        self.sync_and_lay_out();
        let all = GlyphRange::new(0, self.layout.glyph_count());
        self.layout
            .line_fragments_for_glyph_range(all)
            .iter()
            .fold((0.0, 0.0), |(w, h), f: &LineFragment| {
                (f64::max(w, f.used_rect.max_x()), f64::max(h, f.rect.max_y()))
            })
    }

    /// Paint the pressed-link highlight, then the text on top of it
    pub fn draw(&mut self, ctx: &mut dyn DrawContext) {
        let highlights = self.pressed_link_rects();
        let (content_w, content_h) = self.content_size();
        let clip_w = if self.width.is_finite() {
            self.width
        } else {
            content_w
        };
        ctx.push_clip(0, 0, clip_w.ceil() as i32, content_h.ceil() as i32);

        if !highlights.is_empty() {
            let radius = self.highlight.corner_radius.round() as i32;
            ctx.set_color(self.highlight.color);
            for rect in &highlights {
                let (x, y) = (rect.x.round() as i32, rect.y.round() as i32);
                let (w, h) = (rect.width.round() as i32, rect.height.round() as i32);
                if radius > 0 {
                    ctx.draw_rounded_rect_filled(x, y, w, h, radius);
                } else {
                    ctx.draw_rect_filled(x, y, w, h);
                }
            }
        }

        let all = GlyphRange::new(0, self.layout.glyph_count());
        for fragment in self.layout.line_fragments_for_glyph_range(all) {
            for run in self.glyph_runs(fragment.glyph_range) {
                self.draw_run(ctx, &run, fragment.baseline);
            }
        }

        ctx.pop_clip();
    }

    fn glyph_key(&self, index: usize) -> (Font, bool, bool) {
        let chars = self
            .layout
            .char_range_for_glyph_range(GlyphRange::new(index, 1));
        let whitespace = self.text.text()[chars.clone()].trim().is_empty();
        (
            self.text.font_at(chars.start),
            self.text.is_link_at(chars.start),
            whitespace,
        )
    }

    /// Split a line into runs of equal font and link state
    fn glyph_runs(&self, line: GlyphRange) -> Vec<GlyphRun> {
        let mut runs: Vec<GlyphRun> = Vec::new();
        for index in line.location..line.end() {
            let (font, link, whitespace) = self.glyph_key(index);
            let extends = runs
                .last()
                .is_some_and(|run| whitespace || (run.font == font && run.link == link));
            if extends {
                if let Some(run) = runs.last_mut() {
                    run.glyphs.length += 1;
                }
            } else if !whitespace {
                runs.push(GlyphRun {
                    glyphs: GlyphRange::new(index, 1),
                    font,
                    link,
                });
            }
        }
        runs
    }

    fn draw_run(&self, ctx: &mut dyn DrawContext, run: &GlyphRun, baseline: f64) {
        // Runs start on a visible glyph; trailing whitespace is not drawn
        let visible_end = (run.glyphs.location..run.glyphs.end())
            .rev()
            .find(|&i| !self.glyph_key(i).2)
            .map_or(run.glyphs.location, |i| i + 1);
        let glyphs = GlyphRange::from_bounds(run.glyphs.location, visible_end);
        if glyphs.is_empty() {
            return;
        }

        let chars = self.layout.char_range_for_glyph_range(glyphs);
        let bounds = self.layout.bounding_rect_for_glyph_range(glyphs);
        let x = bounds.x.round() as i32;
        let y = baseline.round() as i32;

        ctx.set_font(run.font, self.font_size);
        ctx.set_color(if run.link {
            self.link_color
        } else {
            self.text_color
        });
        ctx.draw_text(&self.text.text()[chars], x, y);

        if run.link {
            ctx.draw_line(x, y + 2, bounds.max_x().round() as i32, y + 2);
        }
    }
}
