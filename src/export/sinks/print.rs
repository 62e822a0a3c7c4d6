//! Print-ready page sink

use crate::error::{DeskError, Result};
use crate::export::kind::SinkKind;
use crate::export::sink::{DocumentSink, ExportContext};
use crate::export::templates::{self, PRINT_TEMPLATE};

/// Print sink - standalone page that opens the print dialog on load and
/// closes itself once printing finishes or is cancelled
pub struct PrintSink;

impl DocumentSink for PrintSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Print
    }

    fn render(&self, context: &ExportContext) -> Result<String> {
        let body = context.body_html()?;
        templates::render(PRINT_TEMPLATE, &context.letterhead(body))
    }

    fn file_name(&self, context: &ExportContext) -> String {
        let stem = context.paper.word_file_name();
        let stem = stem.trim_end_matches(".doc");
        format!("{}_print.html", stem)
    }

    fn validate(&self, content: &str) -> Result<()> {
        if !content.contains("window.print()") {
            return Err(DeskError::Other(
                "Print page does not trigger the print dialog".into(),
            ));
        }
        Ok(())
    }
}
