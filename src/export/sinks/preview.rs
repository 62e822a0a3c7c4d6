//! On-screen preview sink

use console::style;

use crate::document::{html, Block};
use crate::error::Result;
use crate::export::kind::SinkKind;
use crate::export::sink::{DocumentSink, ExportContext};

/// Preview sink - HTML fragment for saving, styled text for the terminal
pub struct PreviewSink;

impl DocumentSink for PreviewSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Preview
    }

    fn render(&self, context: &ExportContext) -> Result<String> {
        let blocks = context.blocks()?;
        Ok(format!(
            "<div class=\"paper-preview\">\n{}\n</div>\n",
            html::render_blocks(&blocks)
        ))
    }

    fn render_terminal(&self, context: &ExportContext) -> Result<String> {
        let blocks = context.blocks()?;
        let mut out = String::new();

        for block in &blocks {
            match block {
                Block::Header { text, divider } => {
                    if *divider {
                        out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
                    }
                    out.push_str(&format!("{}\n", style(text).bold().underlined()));
                }
                Block::Question { text } => {
                    out.push_str(&format!("\n{}\n\n", text));
                }
                Block::Body { text } => {
                    out.push_str(&format!("{}\n", text));
                }
                Block::Spacer => out.push('\n'),
                Block::EndMarker => {
                    let marker = block.text().unwrap_or_default();
                    out.push_str(&format!("\n{}\n", style(format!("{:^60}", marker)).bold()));
                }
            }
        }

        Ok(out)
    }

    fn file_name(&self, context: &ExportContext) -> String {
        let stem = context.paper.word_file_name();
        let stem = stem.trim_end_matches(".doc");
        format!("{}_preview.html", stem)
    }
}
