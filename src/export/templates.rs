//! @acp:module "Document Templates"
//! @acp:summary "Handlebars wrappers for Word and print exports"
//! @acp:domain export
//! @acp:layer output

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

pub const WORD_TEMPLATE: &str = "word";
pub const PRINT_TEMPLATE: &str = "print";

const WORD_SOURCE: &str = include_str!("../../templates/word.hbs");
const PRINT_SOURCE: &str = include_str!("../../templates/print.hbs");

/// Registry holding both document wrappers
pub fn registry() -> Result<Handlebars<'static>> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_template_string(WORD_TEMPLATE, WORD_SOURCE)?;
    hb.register_template_string(PRINT_TEMPLATE, PRINT_SOURCE)?;
    Ok(hb)
}

/// Render a named wrapper with the given data
pub fn render<T: Serialize>(name: &str, data: &T) -> Result<String> {
    Ok(registry()?.render(name, data)?)
}
