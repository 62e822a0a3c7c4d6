#![forbid(unsafe_code)]
//! SchoolDesk Command Line Interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use schooldesk::collab::AspectRatio;
use schooldesk::commands::{
    execute_classify, execute_evaluate, execute_export, execute_generate, execute_init,
    execute_quiz, execute_records, execute_video, print_error, ClassifyOptions, EvaluateOptions,
    ExportOptions, GenerateOptions, InitOptions, QuizOptions, RecordsOptions, VideoOptions,
};
use schooldesk::config::CONFIG_FILE;
use schooldesk::records::{Filter, RecordQuery};
use schooldesk::{Config, DeskError, Difficulty, PaperConfig, QuestionTypeSpec, SinkKind};

#[derive(Parser)]
#[command(name = "schooldesk")]
#[command(about = "SchoolDesk - question papers, exports and record summaries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Question paper form fields shared by generate and export
#[derive(Args, Debug, Clone)]
struct PaperArgs {
    /// Load the form from a JSON file; flags below override it
    #[arg(long)]
    paper_file: Option<PathBuf>,

    /// Institution name (defaults to the config letterhead)
    #[arg(long)]
    institution: Option<String>,

    /// Logo path or URL
    #[arg(long)]
    logo: Option<String>,

    /// Paper title
    #[arg(long)]
    title: Option<String>,

    /// Grade, e.g. "10th"
    #[arg(long)]
    grade: Option<String>,

    /// Medium of instruction
    #[arg(long)]
    medium: Option<String>,

    /// Subject
    #[arg(long)]
    subject: Option<String>,

    /// Comma-separated topics
    #[arg(long)]
    topics: Option<String>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Question breakdown as KIND:COUNT:MARKS (repeatable)
    #[arg(long = "question-type", short = 'q')]
    question_types: Vec<QuestionTypeSpec>,
}

impl PaperArgs {
    fn into_paper(self, config: &Config) -> anyhow::Result<PaperConfig> {
        let mut paper = match self.paper_file {
            Some(ref path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => {
                let mut paper = PaperConfig::default();
                paper.institution = config.institution.name.clone();
                paper.logo = config.institution.logo.clone();
                paper.medium = config.institution.medium.clone();
                paper
            }
        };

        if let Some(v) = self.institution {
            paper.institution = v;
        }
        if let Some(v) = self.logo {
            paper.logo = Some(v);
        }
        if let Some(v) = self.title {
            paper.title = v;
        }
        if let Some(v) = self.grade {
            paper.grade = v;
        }
        if let Some(v) = self.medium {
            paper.medium = v;
        }
        if let Some(v) = self.subject {
            paper.subject = v;
        }
        if let Some(v) = self.topics {
            paper.topics = v;
        }
        if let Some(v) = self.difficulty {
            paper.difficulty = v;
        }
        if !self.question_types.is_empty() {
            paper.set_question_types(self.question_types);
        }

        Ok(paper)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a SchoolDesk config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Institution name printed on papers
        #[arg(long)]
        institution: Option<String>,

        /// Logo path or URL
        #[arg(long)]
        logo: Option<String>,

        /// Export directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,

        /// Skip interactive prompts (use defaults + CLI args)
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Generate a question paper and export it
    Generate {
        #[command(flatten)]
        paper: PaperArgs,

        /// Export target (preview, word, print); repeatable
        #[arg(short, long = "sink")]
        sinks: Vec<SinkKind>,

        /// Output path for a single sink ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't keep the raw generated text
        #[arg(long)]
        no_save: bool,
    },

    /// Export an existing plain-text paper
    Export {
        /// Text file to export
        input: PathBuf,

        #[command(flatten)]
        paper: PaperArgs,

        /// Export target (preview, word, print); repeatable
        #[arg(short, long = "sink", default_value = "preview")]
        sinks: Vec<SinkKind>,

        /// Output path for a single sink ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for file exports
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the tag assigned to every line of a text file
    Classify {
        /// Text file to classify
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a multiple-choice quiz from notes
    Quiz {
        /// Notes file
        notes: PathBuf,

        /// Number of questions
        #[arg(short = 'n', long, default_value = "5")]
        count: u32,

        /// Save quiz JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade a photographed answer sheet
    Evaluate {
        /// Answer-sheet image (png, jpg, webp, heic)
        image: PathBuf,

        /// Marking instructions
        #[arg(short, long, default_value = "")]
        instructions: String,

        /// Save feedback to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a short teaching video
    Video {
        /// What the video should show
        prompt: String,

        /// 16:9 or 9:16
        #[arg(short, long, default_value = "16:9")]
        aspect: AspectRatio,
    },

    /// Filter record files and summarise the matches
    Records {
        /// JSON/YAML files or glob patterns
        #[arg(required = true)]
        files: Vec<String>,

        /// field=value (exact) or field~text (contains); repeatable, all must match
        #[arg(short = 'w', long = "where")]
        filters: Vec<Filter>,

        /// Numeric field to total
        #[arg(long)]
        sum: Option<String>,

        /// Field to break the matches down by
        #[arg(long)]
        count_by: Option<String>,

        /// Columns to show
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Only print the summary
        #[arg(long)]
        summary_only: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SCHOOLDESK_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("schooldesk=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::load_or_default()
    };

    match cli.command {
        Commands::Init { force, institution, logo, output_dir, api_key_env, yes } => {
            let options = InitOptions {
                force,
                institution,
                logo,
                output_dir,
                api_key_env,
                yes,
            };
            execute_init(options)?;
        }

        Commands::Generate { paper, sinks, output, no_save } => {
            let options = GenerateOptions {
                paper: paper.into_paper(&config)?,
                sinks,
                output,
                no_save,
            };
            execute_generate(options, &config)?;
        }

        Commands::Export { input, paper, sinks, output, output_dir } => {
            let options = ExportOptions {
                input,
                sinks,
                output,
                output_dir,
                paper: paper.into_paper(&config)?,
            };
            execute_export(options, &config)?;
        }

        Commands::Classify { input, json } => {
            execute_classify(ClassifyOptions { input, json })?;
        }

        Commands::Quiz { notes, count, output, json } => {
            let options = QuizOptions { notes, count, output, json };
            execute_quiz(options, &config)?;
        }

        Commands::Evaluate { image, instructions, output } => {
            let options = EvaluateOptions { image, instructions, output };
            execute_evaluate(options, &config)?;
        }

        Commands::Video { prompt, aspect } => {
            execute_video(VideoOptions { prompt, aspect }, &config)?;
        }

        Commands::Records { files, filters, sum, count_by, columns, summary_only, json } => {
            let options = RecordsOptions {
                files,
                query: RecordQuery {
                    filters,
                    sum_field: sum,
                    group_field: count_by,
                },
                columns,
                summary_only,
                json,
            };
            execute_records(options)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<DeskError>() {
            Some(desk) => print_error(desk),
            None => eprintln!("{} {:#}", style("✗").red(), err),
        }
        std::process::exit(1);
    }
}
