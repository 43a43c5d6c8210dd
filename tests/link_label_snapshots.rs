// Snapshot tests for LinkLabel using the SVG renderer

use linktext::config::LabelConfig;
use linktext::link_label::LinkLabel;
use linktext::markdown::styled_text_from_markdown;
use linktext::styled_text::StyledText;
use linktext::svg::SvgDrawContext;
use linktext::Point;

fn test_config() -> LabelConfig {
    LabelConfig {
        glyph_advance: Some(10.0),
        line_height: Some(20.0),
        ..Default::default()
    }
}

fn render(label: &mut LinkLabel) -> String {
    let (_, height) = label.content_size();
    let mut ctx = SvgDrawContext::new(label.width() as i32, height as i32);
    label.draw(&mut ctx);
    ctx.finish()
}

fn manual_text() -> StyledText {
    StyledText::builder()
        .push("see the ")
        .push_link("manual page", "https://example.com/manual")
        .push(" now")
        .build()
}

#[test]
fn test_pressed_wrapped_link() {
    let mut label = LinkLabel::from_config(&test_config(), 150.0, |_| {});
    label.set_text(manual_text());
    label.touch_began(Point::new(85.0, 10.0));

    let svg = render(&mut label);
    insta::assert_snapshot!(svg.trim_end(), @r##"
    <svg xmlns="http://www.w3.org/2000/svg" width="150" height="40" viewBox="0 0 150 40">
      <rect width="150" height="40" fill="#ffffff"/>
      <defs><clipPath id="clip-0-0-150-40"><rect x="0" y="0" width="150" height="40"/></clipPath></defs>
      <rect x="80" y="0" width="70" height="20" rx="2" fill="rgba(0, 0, 0, 0.20)" clip-path="url(#clip-0-0-150-40)"/>
      <rect x="0" y="20" width="40" height="20" rx="2" fill="rgba(0, 0, 0, 0.20)" clip-path="url(#clip-0-0-150-40)"/>
      <text x="0" y="16" fill="#000000" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="normal" font-style="normal" clip-path="url(#clip-0-0-150-40)">see the</text>
      <text x="80" y="16" fill="#0000ee" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="normal" font-style="normal" clip-path="url(#clip-0-0-150-40)">manual</text>
      <line x1="80" y1="18" x2="140" y2="18" stroke="#0000ee" stroke-width="1"/>
      <text x="0" y="36" fill="#0000ee" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="normal" font-style="normal" clip-path="url(#clip-0-0-150-40)">page</text>
      <line x1="0" y1="38" x2="40" y2="38" stroke="#0000ee" stroke-width="1"/>
      <text x="50" y="36" fill="#000000" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="normal" font-style="normal" clip-path="url(#clip-0-0-150-40)">now</text>
    </svg>
    "##);
}

#[test]
fn test_released_link_has_no_highlight() {
    let mut label = LinkLabel::from_config(&test_config(), 150.0, |_| {});
    label.set_text(manual_text());
    label.touch_began(Point::new(85.0, 10.0));
    label.touch_ended(Point::new(85.0, 10.0));

    let svg = render(&mut label);
    assert!(!svg.contains("rx="));
    assert!(svg.contains(">manual</text>"));
}

#[test]
fn test_zero_corner_radius_draws_square_highlight() {
    let mut label = LinkLabel::from_config(&test_config(), 150.0, |_| {});
    label.set_text(manual_text());
    label.set_highlight_corner_radius(0.0);
    label.touch_began(Point::new(85.0, 10.0));

    let svg = render(&mut label);
    assert!(!svg.contains("rx="));
    assert!(svg.contains(
        r#"<rect x="80" y="0" width="70" height="20" fill="rgba(0, 0, 0, 0.20)" clip-path="url(#clip-0-0-150-40)"/>"#
    ));
    assert!(svg.contains(
        r#"<rect x="0" y="20" width="40" height="20" fill="rgba(0, 0, 0, 0.20)" clip-path="url(#clip-0-0-150-40)"/>"#
    ));
}

#[test]
fn test_markdown_styles_render() {
    let mut label = LinkLabel::from_config(&test_config(), 300.0, |_| {});
    label.set_text(styled_text_from_markdown("**Bold** and [[Wiki Page]]"));
    label.touch_began(Point::new(145.0, 10.0));
    assert_eq!(
        label.pressed_link().map(|l| l.resource.as_str()),
        Some("wiki:Wiki%20Page")
    );

    let svg = render(&mut label);
    insta::assert_snapshot!(svg.trim_end(), @r##"
    <svg xmlns="http://www.w3.org/2000/svg" width="300" height="20" viewBox="0 0 300 20">
      <rect width="300" height="20" fill="#ffffff"/>
      <defs><clipPath id="clip-0-0-300-20"><rect x="0" y="0" width="300" height="20"/></clipPath></defs>
      <rect x="90" y="0" width="90" height="20" rx="2" fill="rgba(0, 0, 0, 0.20)" clip-path="url(#clip-0-0-300-20)"/>
      <text x="0" y="16" fill="#000000" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="bold" font-style="normal" clip-path="url(#clip-0-0-300-20)">Bold</text>
      <text x="50" y="16" fill="#000000" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="normal" font-style="normal" clip-path="url(#clip-0-0-300-20)">and</text>
      <text x="90" y="16" fill="#0000ee" font-family="Helvetica, Arial, sans-serif" font-size="14" font-weight="normal" font-style="normal" clip-path="url(#clip-0-0-300-20)">Wiki Page</text>
      <line x1="90" y1="18" x2="180" y2="18" stroke="#0000ee" stroke-width="1"/>
    </svg>
    "##);
}
