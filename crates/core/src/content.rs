//! Tagged content-block model for rich-text skill bodies.
//!
//! Bodies are stored as an HTML string. Instead of duck-typed editor node
//! definitions, the body is modeled as a list of enumerated block kinds with
//! a serializer/deserializer pair to and from the stored string. The parser
//! accepts the constrained subset the serializer emits; unknown markup
//! degrades to a plain paragraph rather than erroring.

use serde::{Deserialize, Serialize};

/// One block of a rich-text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        text: String,
    },
    InfoBlock {
        title: Option<String>,
        body: String,
    },
    Image {
        src: String,
        alt: Option<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

const INFO_BLOCK_OPEN: &str = "<div class=\"info-block\">";

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Render blocks to the stored HTML string.
pub fn to_html(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            ContentBlock::Paragraph { text } => {
                out.push_str("<p>");
                out.push_str(&escape(text));
                out.push_str("</p>");
            }
            ContentBlock::InfoBlock { title, body } => {
                out.push_str(INFO_BLOCK_OPEN);
                if let Some(title) = title {
                    out.push_str("<h4>");
                    out.push_str(&escape(title));
                    out.push_str("</h4>");
                }
                out.push_str("<p>");
                out.push_str(&escape(body));
                out.push_str("</p></div>");
            }
            ContentBlock::Image { src, alt } => {
                out.push_str("<img src=\"");
                out.push_str(&escape(src));
                out.push('"');
                if let Some(alt) = alt {
                    out.push_str(" alt=\"");
                    out.push_str(&escape(alt));
                    out.push('"');
                }
                out.push('>');
            }
            ContentBlock::Table { headers, rows } => {
                out.push_str("<table><thead><tr>");
                for header in headers {
                    out.push_str("<th>");
                    out.push_str(&escape(header));
                    out.push_str("</th>");
                }
                out.push_str("</tr></thead><tbody>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        out.push_str("<td>");
                        out.push_str(&escape(cell));
                        out.push_str("</td>");
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</tbody></table>");
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Parse a stored HTML string back into blocks.
///
/// Recognises the subset emitted by [`to_html`]. Anything else is collected
/// as text (tags stripped) into a paragraph.
pub fn from_html(html: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut rest = html;

    while !rest.trim_start().is_empty() {
        rest = rest.trim_start();

        if let Some(inner) = strip_element(rest, "<p>", "</p>") {
            blocks.push(ContentBlock::Paragraph {
                text: unescape(inner.content),
            });
            rest = inner.remainder;
        } else if let Some(inner) = strip_element(rest, INFO_BLOCK_OPEN, "</div>") {
            blocks.push(parse_info_block(inner.content));
            rest = inner.remainder;
        } else if rest.starts_with("<img") {
            let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            let tag = &rest[..end];
            if let Some(src) = attr_value(tag, "src") {
                blocks.push(ContentBlock::Image {
                    src,
                    alt: attr_value(tag, "alt"),
                });
            }
            rest = &rest[end..];
        } else if let Some(inner) = strip_element(rest, "<table>", "</table>") {
            blocks.push(parse_table(inner.content));
            rest = inner.remainder;
        } else {
            // Unknown markup or bare text: take everything up to the next
            // recognised block and degrade it to a paragraph.
            let end = next_block_start(rest);
            let text = strip_tags(&rest[..end]);
            let text = unescape(text.trim());
            if !text.is_empty() {
                blocks.push(ContentBlock::Paragraph { text });
            }
            rest = &rest[end..];
        }
    }

    blocks
}

struct Element<'a> {
    content: &'a str,
    remainder: &'a str,
}

/// If `input` starts with `open`, split out the content up to the matching
/// `close` tag (non-nested scan) and the remainder after it.
fn strip_element<'a>(input: &'a str, open: &str, close: &str) -> Option<Element<'a>> {
    let body = input.strip_prefix(open)?;
    match body.find(close) {
        Some(end) => Some(Element {
            content: &body[..end],
            remainder: &body[end + close.len()..],
        }),
        // Unterminated element: consume to the end.
        None => Some(Element {
            content: body,
            remainder: "",
        }),
    }
}

fn parse_info_block(inner: &str) -> ContentBlock {
    let (title, rest) = match strip_element(inner.trim_start(), "<h4>", "</h4>") {
        Some(el) => (Some(unescape(el.content)), el.remainder),
        None => (None, inner),
    };
    let body = match strip_element(rest.trim_start(), "<p>", "</p>") {
        Some(el) => unescape(el.content),
        None => unescape(strip_tags(rest).trim()),
    };
    ContentBlock::InfoBlock { title, body }
}

fn parse_table(inner: &str) -> ContentBlock {
    let headers = collect_cells(inner, "<th>", "</th>");

    // Rows live in the tbody when present; otherwise every <tr> counts and
    // header-only rows come back empty and are dropped.
    let row_source = strip_element(
        inner[inner.find("<tbody>").unwrap_or(0)..].trim_start(),
        "<tbody>",
        "</tbody>",
    )
    .map(|el| el.content)
    .unwrap_or(inner);

    let mut rows = Vec::new();
    let mut rest = row_source;
    while let Some(start) = rest.find("<tr>") {
        let after = &rest[start + "<tr>".len()..];
        let end = after.find("</tr>").unwrap_or(after.len());
        let cells = collect_cells(&after[..end], "<td>", "</td>");
        if !cells.is_empty() {
            rows.push(cells);
        }
        rest = &after[end..];
    }

    ContentBlock::Table { headers, rows }
}

fn collect_cells(fragment: &str, open: &str, close: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut rest = fragment;
    while let Some(start) = rest.find(open) {
        let after = &rest[start + open.len()..];
        let end = after.find(close).unwrap_or(after.len());
        cells.push(unescape(&after[..end]));
        rest = &after[end..];
    }
    cells
}

/// Byte offset of the next recognised block opener, or end of input.
fn next_block_start(input: &str) -> usize {
    // Skip the first char so an unrecognised leading "<" cannot loop forever.
    let skip = input.chars().next().map_or(0, char::len_utf8);
    ["<p>", INFO_BLOCK_OPEN, "<img", "<table>"]
        .iter()
        .filter_map(|open| input[skip..].find(open).map(|i| i + skip))
        .min()
        .unwrap_or(input.len())
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

fn attr_value(tag: &str, name: &str) -> Option<String> {
    let marker = format!("{name}=\"");
    let start = tag.find(&marker)? + marker.len();
    let end = tag[start..].find('"')? + start;
    Some(unescape(&tag[start..end]))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
