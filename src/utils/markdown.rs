//! Markdown rendering utilities.
//!
//! Provides safe markdown-to-HTML conversion with XSS protection, and
//! collects the headings used by the table of contents.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::config::toc::LEVELS;
use crate::core::toc::heading_id;
use crate::models::{DocRoute, Heading};

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert markdown to sanitized HTML and collect TOC headings.
///
/// Supports extended markdown syntax including:
/// - Strikethrough (`~~text~~`)
/// - Tables
/// - Footnotes
/// - Task lists (`- [x] done`)
///
/// Level 2 and 3 headings, including ones written as a raw `<h2>`/`<h3>`
/// block, get an `id` derived from their text (see [`heading_id`]) and are
/// returned in document order. In-document anchors (`#id` links and
/// footnotes) are rewritten into routes of `doc_path`, so following one
/// scrolls within the document instead of navigating away. The output is
/// sanitized using `ammonia`; heading and footnote ids survive.
pub fn render_markdown(markdown: &str, doc_path: &str) -> (String, Vec<Heading>) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut events: Vec<Event> = Parser::new_ext(markdown, options).collect();
    let mut headings = Vec::new();
    let mut footnotes = Footnotes::default();

    let mut i = 0;
    while i < events.len() {
        match &mut events[i] {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = level_number(*level);
                let end = heading_end(&events, i);
                if LEVELS.contains(&level) {
                    let text = heading_text(&events[i + 1..end]);
                    let id = heading_id(&text);
                    if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
                        *slot = Some(CowStr::from(id.clone()));
                    }
                    headings.push(Heading {
                        id,
                        level,
                        text: text.trim().to_string(),
                    });
                }
                i = end;
            }
            Event::Html(raw) => {
                if let Some((level, inner, text)) = raw_heading(raw) {
                    let id = heading_id(&text);
                    *raw = CowStr::from(format!("<h{0} id=\"{1}\">{2}</h{0}>\n", level, id, inner));
                    headings.push(Heading {
                        id,
                        level,
                        text: text.trim().to_string(),
                    });
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(anchor) = dest_url.strip_prefix('#').filter(|a| !a.is_empty()) {
                    let route = DocRoute::with_heading(doc_path, anchor).to_hash();
                    *dest_url = CowStr::from(route);
                }
            }
            Event::FootnoteReference(label) => {
                let n = footnotes.number(label);
                let href = DocRoute::with_heading(doc_path, footnote_id(n)).to_hash();
                events[i] = Event::InlineHtml(CowStr::from(format!(
                    "<sup><a href=\"{}\">{}</a></sup>",
                    href, n
                )));
            }
            Event::Start(Tag::FootnoteDefinition(label)) => {
                let n = footnotes.number(label);
                events[i] = Event::Html(CowStr::from(format!(
                    "<div id=\"{}\"><sup>{}</sup>",
                    footnote_id(n),
                    n
                )));
            }
            Event::End(TagEnd::FootnoteDefinition) => {
                events[i] = Event::Html(CowStr::from("</div>\n"));
            }
            _ => {}
        }
        i += 1;
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    // Sanitize HTML to prevent XSS attacks
    let html = ammonia::Builder::default()
        .add_tag_attributes("h2", &["id"])
        .add_tag_attributes("h3", &["id"])
        .add_tag_attributes("div", &["id"])
        .add_tags(&["input"])
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        .clean(&html_output)
        .to_string();

    (html, headings)
}

/// Footnote numbers in order of first appearance (reference or definition).
#[derive(Default)]
struct Footnotes(HashMap<String, usize>);

impl Footnotes {
    fn number(&mut self, label: &str) -> usize {
        let next = self.0.len() + 1;
        *self.0.entry(label.to_string()).or_insert(next)
    }
}

fn footnote_id(n: usize) -> String {
    format!("fn-{}", n)
}

/// Index of the `End` event closing the heading opened at `start`.
fn heading_end(events: &[Event], start: usize) -> usize {
    events[start + 1..]
        .iter()
        .position(|e| matches!(e, Event::End(TagEnd::Heading(_))))
        .map_or(events.len() - 1, |offset| start + 1 + offset)
}

fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Recognize a raw HTML block that is a single `<h2>` or `<h3>` element.
///
/// Returns the level, the inner markup and its text with tags removed.
fn raw_heading(raw: &str) -> Option<(u8, &str, String)> {
    let trimmed = raw.trim();
    let rest = trimmed.strip_prefix("<h")?;
    let level = LEVELS
        .iter()
        .copied()
        .find(|l| rest.starts_with(char::from(b'0' + l)))?;
    let open_end = trimmed.find('>')?;
    let after_name = &rest[1..];
    if !(after_name.starts_with('>') || after_name.starts_with(char::is_whitespace)) {
        return None;
    }
    let close = format!("</h{}>", level);
    let inner = trimmed.strip_suffix(close.as_str())?.get(open_end + 1..)?;

    let mut text = String::new();
    let mut in_tag = false;
    for c in inner.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    Some((level, inner, text))
}
