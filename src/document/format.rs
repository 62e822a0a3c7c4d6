//! @acp:module "Semantic Formatter"
//! @acp:summary "Turns classified lines into styled render blocks"
//! @acp:domain documents
//! @acp:layer logic

use serde::Serialize;

use super::classify::LineKind;
use super::ClassifiedLine;

/// Text of the marker appended after the last line
pub const END_MARKER: &str = "END OF DOCUMENT";

/// A single render block. One block per input line, plus the end marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Bold, underlined section title. `divider` is set for every header
    /// after the first one.
    Header { text: String, divider: bool },
    /// Numbered question with a wide top margin
    Question { text: String },
    /// Ordinary text with a standard margin
    Body { text: String },
    /// Non-breaking space keeping the vertical rhythm of an empty line
    Spacer,
    /// Centered, bold terminal marker
    EndMarker,
}

impl Block {
    /// Plain text carried by the block, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Header { text, .. } | Block::Question { text } | Block::Body { text } => {
                Some(text)
            }
            Block::Spacer => None,
            Block::EndMarker => Some(END_MARKER),
        }
    }

    pub fn has_divider(&self) -> bool {
        matches!(self, Block::Header { divider: true, .. })
    }
}

/// Format classified lines into blocks.
///
/// The output always holds `lines.len() + 1` blocks.
pub fn format_lines(lines: &[ClassifiedLine]) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(lines.len() + 1);
    let mut seen_header = false;

    for line in lines {
        let text = line.text.trim().to_string();
        let block = match line.kind {
            LineKind::SectionHeader => {
                let divider = seen_header;
                seen_header = true;
                Block::Header { text, divider }
            }
            LineKind::Question => Block::Question { text },
            LineKind::BodyText => Block::Body { text },
            LineKind::Blank => Block::Spacer,
        };
        blocks.push(block);
    }

    blocks.push(Block::EndMarker);
    blocks
}
