//! @acp:module "Init Command"
//! @acp:summary "Create a SchoolDesk configuration file"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `schooldesk init` for first-time setup.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};

use crate::config::{Config, CONFIG_FILE};
use crate::export::SinkKind;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Force overwrite existing config
    pub force: bool,
    /// Institution name printed on papers
    pub institution: Option<String>,
    /// Logo path or URL
    pub logo: Option<String>,
    /// Export directory
    pub output_dir: Option<PathBuf>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE);

    if config_path.exists() && !options.force {
        eprintln!(
            "{} Config file already exists. Use --force to overwrite.",
            style("✗").red()
        );
        std::process::exit(1);
    }

    let mut config = Config::default();

    // Interactive mode if no CLI options and not using --yes
    let interactive = !options.yes
        && options.institution.is_none()
        && options.logo.is_none()
        && options.output_dir.is_none()
        && options.api_key_env.is_none();

    if interactive {
        run_interactive_init(&mut config)?;
    } else {
        apply_cli_options(&mut config, &options);
    }

    config.save(&config_path)?;
    println!("{} Created {}", style("✓").green(), config_path.display());

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  1. export {}=<your key>",
        style(&config.collaborator.api_key_env).cyan()
    );
    println!(
        "  2. Run {} to create a paper",
        style("schooldesk generate --subject Physics --grade 10th ...").cyan()
    );

    Ok(())
}

fn run_interactive_init(config: &mut Config) -> Result<()> {
    println!("{} SchoolDesk Setup\n", style("→").cyan());
    let theme = ColorfulTheme::default();

    config.institution.name = Input::with_theme(&theme)
        .with_prompt("Institution name")
        .interact_text()?;

    let logo: String = Input::with_theme(&theme)
        .with_prompt("Logo path or URL (optional)")
        .allow_empty(true)
        .interact_text()?;
    config.institution.logo = Some(logo.trim().to_string()).filter(|l| !l.is_empty());

    config.institution.medium = Input::with_theme(&theme)
        .with_prompt("Medium of instruction")
        .default(config.institution.medium.clone())
        .interact_text()?;

    let output_dir: String = Input::with_theme(&theme)
        .with_prompt("Export directory")
        .default(config.export.output_dir.display().to_string())
        .interact_text()?;
    config.export.output_dir = PathBuf::from(output_dir);

    let sink_names: Vec<&str> = SinkKind::all().iter().map(|s| s.name()).collect();
    let defaults: Vec<bool> = SinkKind::all()
        .iter()
        .map(|s| config.export.default_sinks.contains(s))
        .collect();
    let chosen = MultiSelect::with_theme(&theme)
        .with_prompt("Default export targets (space to toggle)")
        .items(&sink_names)
        .defaults(&defaults)
        .interact()?;
    if !chosen.is_empty() {
        config.export.default_sinks = chosen.into_iter().map(|i| SinkKind::all()[i]).collect();
    }

    config.collaborator.api_key_env = Input::with_theme(&theme)
        .with_prompt("Environment variable holding the API key")
        .default(config.collaborator.api_key_env.clone())
        .interact_text()?;

    println!();
    Ok(())
}

fn apply_cli_options(config: &mut Config, options: &InitOptions) {
    if let Some(ref name) = options.institution {
        config.institution.name = name.clone();
    }
    if let Some(ref logo) = options.logo {
        config.institution.logo = Some(logo.clone());
    }
    if let Some(ref dir) = options.output_dir {
        config.export.output_dir = dir.clone();
    }
    if let Some(ref var) = options.api_key_env {
        config.collaborator.api_key_env = var.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_cli_options() {
        let mut config = Config::default();
        let options = InitOptions {
            institution: Some("Springfield High".into()),
            output_dir: Some(PathBuf::from("exports")),
            yes: true,
            ..Default::default()
        };
        apply_cli_options(&mut config, &options);

        assert_eq!(config.institution.name, "Springfield High");
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert!(config.institution.logo.is_none());
        assert_eq!(config.collaborator.api_key_env, "SCHOOLDESK_API_KEY");
    }
}
