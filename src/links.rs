// Link extraction
// Finds link attributes in styled text and maps them to glyph ranges

use crate::layout::{GlyphRange, TextContainer, TextLayout};
use crate::styled_text::StyledText;
use url::Url;

/// A link target together with the glyphs that render it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub resource: Url,
    pub glyph_range: GlyphRange,
}

/// Point the layout at `text` laid out inside `container`.
///
/// The container keeps an unbounded height, only `max_lines` limits
/// how much text is shown.
pub fn sync_layout<L: TextLayout + ?Sized>(
    layout: &mut L,
    text: &StyledText,
    container: TextContainer,
) {
    layout.set_text(text);
    layout.set_container(TextContainer {
        height: f64::INFINITY,
        ..container
    });
}

/// Collect every link in `text`, left to right.
///
/// Link payloads that do not resolve to a URL are dropped.
pub fn extract_links<L: TextLayout + ?Sized>(
    text: &StyledText,
    layout: &mut L,
    container: TextContainer,
) -> Vec<LinkEntry> {
    sync_layout(layout, text, container);

    let mut links = Vec::new();
    for (range, target) in text.link_runs() {
        let Some(resource) = target.resolve() else {
            tracing::debug!(?range, ?target, "dropping link with unparsable target");
            continue;
        };
        layout.ensure_layout_for_char_range(range.clone());
        let glyph_range = layout.glyph_range_for_char_range(range);
        links.push(LinkEntry {
            resource,
            glyph_range,
        });
    }

    tracing::trace!(count = links.len(), "extracted links");
    links
}
