//! @acp:module "Block Markup"
//! @acp:summary "HTML rendering of formatted blocks"
//! @acp:domain documents
//! @acp:layer output

use super::format::{Block, END_MARKER};

const HEADER_STYLE: &str =
    "font-weight: bold; text-decoration: underline; margin-top: 18px; margin-bottom: 10px;";
const QUESTION_STYLE: &str = "margin-top: 14px; margin-bottom: 14px;";
const BODY_STYLE: &str = "margin-top: 6px; margin-bottom: 6px;";
const SPACER_STYLE: &str = "margin: 0;";
const DIVIDER_STYLE: &str = "border: none; border-top: 1px solid #000; margin: 20px 0;";
const END_STYLE: &str = "text-align: center; font-weight: bold; margin-top: 30px;";

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one block as an HTML fragment
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Header { text, divider } => {
            let mut out = String::new();
            if *divider {
                out.push_str(&format!("<hr style=\"{}\" />\n", DIVIDER_STYLE));
            }
            out.push_str(&format!(
                "<p class=\"section-header\" style=\"{}\">{}</p>",
                HEADER_STYLE,
                escape_html(text)
            ));
            out
        }
        Block::Question { text } => format!(
            "<p class=\"question\" style=\"{}\">{}</p>",
            QUESTION_STYLE,
            escape_html(text)
        ),
        Block::Body { text } => format!(
            "<p class=\"body-text\" style=\"{}\">{}</p>",
            BODY_STYLE,
            escape_html(text)
        ),
        Block::Spacer => format!("<p class=\"spacer\" style=\"{}\">&nbsp;</p>", SPACER_STYLE),
        Block::EndMarker => format!(
            "<p class=\"end-marker\" style=\"{}\">{}</p>",
            END_STYLE, END_MARKER
        ),
    }
}

/// Render a block sequence, one fragment per line
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_spacer_is_nbsp() {
        assert!(render_block(&Block::Spacer).contains("&nbsp;"));
    }

    #[test]
    fn test_divider_precedes_header() {
        let html = render_block(&Block::Header {
            text: "SECTION B".into(),
            divider: true,
        });
        let hr = html.find("<hr").unwrap();
        let p = html.find("SECTION B").unwrap();
        assert!(hr < p);
    }

    #[test]
    fn test_first_header_has_no_divider() {
        let html = render_block(&Block::Header {
            text: "SECTION A".into(),
            divider: false,
        });
        assert!(!html.contains("<hr"));
        assert!(html.contains("text-decoration: underline"));
    }
}
