// Styled Text
// Plain text plus attribute spans. One attribute kind marks a link and
// carries its target, everything else only affects how glyphs are drawn.

use crate::draw_context::Font;
use crate::error::{Error, Result};
use std::ops::Range;
use url::Url;

/// Payload of a link attribute, as given by whoever built the text
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Text(String),
    Url(Url),
}

impl LinkTarget {
    /// Normalize the payload to a URL. Strings that do not parse yield `None`.
    pub fn resolve(&self) -> Option<Url> {
        match self {
            LinkTarget::Url(url) => Some(url.clone()),
            LinkTarget::Text(s) => Url::parse(s).ok(),
        }
    }
}

impl From<&str> for LinkTarget {
    fn from(s: &str) -> Self {
        LinkTarget::Text(s.to_string())
    }
}

impl From<String> for LinkTarget {
    fn from(s: String) -> Self {
        LinkTarget::Text(s)
    }
}

impl From<Url> for LinkTarget {
    fn from(url: Url) -> Self {
        LinkTarget::Url(url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Bold,
    Italic,
    Code,
    Link(LinkTarget),
}

/// An attribute applied to a byte range of the text
#[derive(Debug, Clone, PartialEq)]
struct Span {
    range: Range<usize>,
    attribute: Attribute,
}

/// Remove link attributes from `range`, splitting spans that stick out
fn clear_links(spans: &mut Vec<Span>, range: &Range<usize>) {
    let mut kept = Vec::with_capacity(spans.len() + 1);
    for span in spans.drain(..) {
        let overlaps = span.range.start < range.end && range.start < span.range.end;
        if !overlaps || !matches!(span.attribute, Attribute::Link(_)) {
            kept.push(span);
            continue;
        }
        if span.range.start < range.start {
            kept.push(Span {
                range: span.range.start..range.start,
                attribute: span.attribute.clone(),
            });
        }
        if span.range.end > range.end {
            kept.push(Span {
                range: range.end..span.range.end,
                attribute: span.attribute,
            });
        }
    }
    *spans = kept;
}

/// Text with formatting and link attributes.
///
/// Ranges are UTF-8 byte offsets and always lie on char boundaries.
/// Link spans never overlap: setting a link over text that already carries
/// one replaces the old link on the overlapping part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    spans: Vec<Span>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        StyledText {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn builder() -> StyledTextBuilder {
        StyledTextBuilder::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply an attribute to `range`
    pub fn add_attribute(&mut self, range: Range<usize>, attribute: Attribute) -> Result<()> {
        if range.start > range.end || range.end > self.text.len() {
            return Err(Error::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            });
        }
        for offset in [range.start, range.end] {
            if !self.text.is_char_boundary(offset) {
                return Err(Error::NotCharBoundary(offset));
            }
        }
        if range.is_empty() {
            return Ok(());
        }

        if matches!(attribute, Attribute::Link(_)) {
            clear_links(&mut self.spans, &range);
        }
        self.spans.push(Span { range, attribute });
        Ok(())
    }

    /// Maximal ranges carrying a link, left to right.
    ///
    /// Neighbouring ranges with an equal target are reported as one.
    pub fn link_runs(&self) -> Vec<(Range<usize>, &LinkTarget)> {
        let mut links: Vec<(Range<usize>, &LinkTarget)> = self
            .spans
            .iter()
            .filter_map(|span| match &span.attribute {
                Attribute::Link(target) => Some((span.range.clone(), target)),
                _ => None,
            })
            .collect();
        links.sort_by_key(|(range, _)| range.start);

        let mut runs: Vec<(Range<usize>, &LinkTarget)> = Vec::with_capacity(links.len());
        for (range, target) in links {
            if let Some((last, last_target)) = runs.last_mut() {
                if last.end == range.start && *last_target == target {
                    last.end = range.end;
                    continue;
                }
            }
            runs.push((range, target));
        }
        runs
    }

    /// Whether the byte at `offset` belongs to a link
    pub fn is_link_at(&self, offset: usize) -> bool {
        self.spans
            .iter()
            .any(|s| matches!(s.attribute, Attribute::Link(_)) && s.range.contains(&offset))
    }

    /// Font used to draw the text at `offset`
    pub fn font_at(&self, offset: usize) -> Font {
        let (mut bold, mut italic) = (false, false);
        for span in self.spans.iter().filter(|s| s.range.contains(&offset)) {
            match span.attribute {
                Attribute::Code => return Font::Code,
                Attribute::Bold => bold = true,
                Attribute::Italic => italic = true,
                Attribute::Link(_) => {}
            }
        }
        match (bold, italic) {
            (true, true) => Font::BoldItalic,
            (true, false) => Font::Bold,
            (false, true) => Font::Italic,
            (false, false) => Font::Plain,
        }
    }
}

/// Appends text piece by piece, recording attributes as it goes
#[derive(Debug, Default)]
pub struct StyledTextBuilder {
    text: String,
    spans: Vec<Span>,
}

impl StyledTextBuilder {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    /// Append `text` carrying `attributes`.
    ///
    /// When several links are given the last one wins, so that the innermost
    /// of nested links owns the text.
    pub fn push_styled(mut self, text: &str, attributes: &[Attribute]) -> Self {
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();
        if start == end {
            return self;
        }

        let range = start..end;
        let link = attributes
            .iter()
            .rposition(|a| matches!(a, Attribute::Link(_)));
        for (i, attribute) in attributes.iter().enumerate() {
            if matches!(attribute, Attribute::Link(_)) {
                if Some(i) != link {
                    continue;
                }
                clear_links(&mut self.spans, &range);
            }
            self.spans.push(Span {
                range: range.clone(),
                attribute: attribute.clone(),
            });
        }
        self
    }

    pub fn push_link(self, text: &str, target: impl Into<LinkTarget>) -> Self {
        self.push_styled(text, &[Attribute::Link(target.into())])
    }

    pub fn build(self) -> StyledText {
        StyledText {
            text: self.text,
            spans: self.spans,
        }
    }
}
