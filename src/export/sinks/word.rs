//! Word-compatible document sink

use crate::error::{DeskError, Result};
use crate::export::kind::SinkKind;
use crate::export::sink::{DocumentSink, ExportContext};
use crate::export::templates::{self, WORD_TEMPLATE};

/// Word sink - HTML document declared as `application/vnd.ms-word`
pub struct WordSink;

impl DocumentSink for WordSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Word
    }

    fn render(&self, context: &ExportContext) -> Result<String> {
        let body = context.body_html()?;
        templates::render(WORD_TEMPLATE, &context.letterhead(body))
    }

    fn file_name(&self, context: &ExportContext) -> String {
        context.paper.word_file_name()
    }

    fn validate(&self, content: &str) -> Result<()> {
        if !content.contains(SinkKind::Word.media_type()) {
            return Err(DeskError::Other(
                "Word export is missing its content-type declaration".into(),
            ));
        }
        Ok(())
    }
}
