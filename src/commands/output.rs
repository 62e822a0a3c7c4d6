//! @acp:module "Command Output"
//! @acp:summary "Shared terminal output helpers for commands"
//! @acp:domain cli
//! @acp:layer output

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::DeskError;
use crate::export::ExportResult;

/// Spinner shown while waiting on the content service
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One line per finished export
pub fn print_export_result(result: &ExportResult) {
    match &result.destination {
        Some(path) => println!(
            "{} {} saved to {} ({} bytes)",
            style("✓").green(),
            result.kind.name(),
            style(path.display()).cyan(),
            result.bytes
        ),
        None => eprintln!("{} {} written to stdout", style("✓").green(), result.kind.name()),
    }
}

/// Print a library error with the hint the user needs to recover
pub fn print_error(err: &DeskError) {
    eprintln!("{} {}", style("✗").red(), err);
    match err {
        DeskError::Validation(problems) => {
            for problem in problems {
                eprintln!("  - {}", problem);
            }
        }
        DeskError::ReauthorizationRequired(_) => {
            eprintln!("  Select a valid API key (billing-enabled project) and try again");
        }
        DeskError::MissingCredential(var) => {
            eprintln!("  export {}=<your key>", var);
        }
        DeskError::NoDocument => {
            eprintln!("  Generate a paper first, or pass a text file to 'schooldesk export'");
        }
        DeskError::Collaborator(_) | DeskError::EmptyResponse => {
            eprintln!("  The request can be retried");
        }
        _ => {}
    }
}
