//! @acp:module "Export Sinks"
//! @acp:summary "Built-in sinks for every export target"
//! @acp:domain export
//! @acp:layer service

mod preview;
mod print;
mod word;

pub use preview::PreviewSink;
pub use print::PrintSink;
pub use word::WordSink;
