//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod classify;
pub mod evaluate;
pub mod export;
pub mod generate;
pub mod init;
pub mod output;
pub mod quiz;
pub mod records;
pub mod video;

pub use classify::{execute_classify, ClassifyOptions};
pub use evaluate::{execute_evaluate, EvaluateOptions};
pub use export::{execute_export, ExportOptions};
pub use generate::{execute_generate, generate_with, GenerateOptions};
pub use init::{execute_init, InitOptions};
pub use output::{print_error, print_export_result, spinner};
pub use quiz::{execute_quiz, quiz_with, QuizOptions};
pub use records::{execute_records, RecordsOptions};
pub use video::{execute_video, video_with, VideoOptions};
