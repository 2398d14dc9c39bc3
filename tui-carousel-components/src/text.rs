//! Plain-text rendering of the small HTML fragments used for copy and descriptions

use ratatui::layout::Alignment;
use ratatui::widgets::{Paragraph, Wrap};
use scraper::{ElementRef, Html, Node};

/// Tags that end a visual line.
const BREAKING_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Strip markup from an HTML fragment.
///
/// Block-level elements and `<br>` become line breaks, entities are decoded
/// by the parser, runs of whitespace collapse and empty lines are dropped.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut text);

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(tag) => {
                let breaks = BREAKING_TAGS.contains(&tag.name());
                if breaks {
                    out.push('\n');
                }
                if let Some(nested) = ElementRef::wrap(child) {
                    collect_text(nested, out);
                }
                if breaks {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Centered, word-wrapped paragraph for section copy.
pub fn copy_paragraph(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

/// Rows [`copy_paragraph`] takes when rendered `width` columns wide.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 0;
    }
    u16::try_from(copy_paragraph(text).line_count(width)).unwrap_or(u16::MAX)
}
