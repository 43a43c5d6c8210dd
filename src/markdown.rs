// Markdown Converter
// Builds StyledText from Markdown so labels can be filled from notes.
// Only inline formatting and links survive; blocks become plain paragraphs.

use crate::styled_text::{Attribute, LinkTarget, StyledText};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};

/// URL scheme used for wiki-style `[[Page]]` links
pub const WIKI_SCHEME: &str = "wiki";

/// Characters escaped in wiki page names
const PAGE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `wiki:` URL for a page name
pub fn wiki_url(page: &str) -> String {
    format!("{}:{}", WIKI_SCHEME, utf8_percent_encode(page, PAGE_ENCODE_SET))
}

fn link_target(link_type: LinkType, dest_url: &str) -> LinkTarget {
    match link_type {
        LinkType::WikiLink { .. } => LinkTarget::Text(wiki_url(dest_url)),
        _ => LinkTarget::Text(dest_url.to_string()),
    }
}

/// Convert markdown text to StyledText
pub fn styled_text_from_markdown(markdown: &str) -> StyledText {
    let mut builder = StyledText::builder();
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut block_done = false;

    for event in Parser::new_ext(markdown, Options::ENABLE_WIKILINKS) {
        match event {
            Event::Start(tag @ (Tag::Paragraph | Tag::Heading { .. } | Tag::CodeBlock(_))) => {
                if block_done {
                    builder = builder.push("\n\n");
                    block_done = false;
                }
                attributes.extend(block_attribute(&tag));
            }
            Event::End(TagEnd::Paragraph) => block_done = true,
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::CodeBlock) => {
                attributes.pop();
                block_done = true;
            }
            Event::Start(Tag::Item) => {
                if !builder.is_empty() {
                    builder = builder.push("\n");
                }
                builder = builder.push("\u{2022} ");
                block_done = false;
            }
            Event::End(TagEnd::List(_)) => block_done = true,
            Event::Start(Tag::Emphasis) => attributes.push(Attribute::Italic),
            Event::Start(Tag::Strong) => attributes.push(Attribute::Bold),
            // A link nested in another one owns its text, the outer target
            // resumes after it
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            }) => attributes.push(Attribute::Link(link_target(link_type, &dest_url))),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link) => {
                attributes.pop();
            }
            Event::Text(text) => builder = builder.push_styled(&text, &attributes),
            Event::Code(code) => {
                attributes.push(Attribute::Code);
                builder = builder.push_styled(&code, &attributes);
                attributes.pop();
            }
            Event::SoftBreak => builder = builder.push_styled(" ", &attributes),
            Event::HardBreak => builder = builder.push("\n"),
            _ => {}
        }
    }

    builder.build()
}

fn block_attribute(tag: &Tag) -> Option<Attribute> {
    match tag {
        Tag::Heading { .. } => Some(Attribute::Bold),
        Tag::CodeBlock(_) => Some(Attribute::Code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_texts(text: &StyledText) -> Vec<(&str, LinkTarget)> {
        text.link_runs()
            .into_iter()
            .map(|(range, target)| (&text.text()[range], target.clone()))
            .collect()
    }

    #[test]
    fn test_markdown_links() {
        let text = styled_text_from_markdown("This is a [test link](https://example.com/a) here.");
        assert_eq!(text.text(), "This is a test link here.");
        assert_eq!(
            link_texts(&text),
            vec![("test link", LinkTarget::from("https://example.com/a"))]
        );
    }

    #[test]
    fn test_wiki_links() {
        let text = styled_text_from_markdown("See [[Front Page]] and [[Notes]].");
        assert_eq!(text.text(), "See Front Page and Notes.");
        let links = link_texts(&text);
        assert_eq!(links[0].0, "Front Page");
        assert_eq!(
            links[0].1.resolve().map(|u| u.to_string()),
            Some("wiki:Front%20Page".to_string())
        );
        assert_eq!(links[1].0, "Notes");
    }

    #[test]
    fn test_inline_styles() {
        let text = styled_text_from_markdown("a *b* **c** `d`");
        assert_eq!(text.text(), "a b c d");
        assert_eq!(text.font_at(2), crate::draw_context::Font::Italic);
        assert_eq!(text.font_at(4), crate::draw_context::Font::Bold);
        assert_eq!(text.font_at(6), crate::draw_context::Font::Code);
    }

    #[test]
    fn test_blocks_and_breaks() {
        let text = styled_text_from_markdown("# Title\n\nfirst\nline\n\nsecond");
        assert_eq!(text.text(), "Title\n\nfirst line\n\nsecond");
        assert_eq!(text.font_at(0), crate::draw_context::Font::Bold);
        assert_eq!(text.font_at(7), crate::draw_context::Font::Plain);
    }

    #[test]
    fn test_styled_link_text_is_one_run() {
        let text = styled_text_from_markdown("[**bold** link](https://example.com/)");
        assert_eq!(
            link_texts(&text),
            vec![("bold link", LinkTarget::from("https://example.com/"))]
        );
    }

    #[test]
    fn test_wiki_syntax_in_code_is_literal() {
        let text = styled_text_from_markdown("use `[[x]]` syntax");
        assert_eq!(text.text(), "use [[x]] syntax");
        assert!(text.link_runs().is_empty());
        assert_eq!(text.font_at(4), crate::draw_context::Font::Code);
    }

    #[test]
    fn test_wiki_page_with_parenthesis() {
        let text = styled_text_from_markdown("[[a)b]] end");
        assert_eq!(text.text(), "a)b end");
        let links = link_texts(&text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].0, "a)b");
        assert_eq!(
            links[0].1.resolve().map(|u| u.to_string()),
            Some("wiki:a)b".to_string())
        );
    }

    #[test]
    fn test_wiki_url_escapes_page_names() {
        assert_eq!(wiki_url("Front Page"), "wiki:Front%20Page");
        assert_eq!(wiki_url("100% #1?"), "wiki:100%25%20%231%3F");
        assert_eq!(wiki_url("Caf\u{e9}"), "wiki:Caf%C3%A9");
    }

    #[test]
    fn test_autolink_inside_link_text() {
        let text = styled_text_from_markdown("[see <https://x.example/>](https://y.example/)");
        assert_eq!(text.text(), "see https://x.example/");
        assert_eq!(
            link_texts(&text),
            vec![
                ("see ", LinkTarget::from("https://y.example/")),
                ("https://x.example/", LinkTarget::from("https://x.example/")),
            ]
        );
    }
}
