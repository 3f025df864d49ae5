use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flightplan::cli::AnswerOverrides;
use flightplan::cli::commands::{OutputFormat, PlanOptions};
use flightplan::config::GenerationMode;
use flightplan::types::PlanError;

/// Parse generation mode from string
fn parse_mode(s: &str) -> Result<GenerationMode, String> {
    s.parse()
}

/// Parse output format from string
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "flightplan")]
#[command(
    version,
    about = "Flying machines lesson planner for educators"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a lesson plan from interview answers
    Plan {
        #[arg(long, short, help = "Answers file (JSON, or YAML by .yaml/.yml extension)")]
        answers: Option<PathBuf>,
        #[arg(long, help = "Time available, e.g. \"45 minutes\"")]
        time: Option<String>,
        #[arg(long, help = "Grade or age group, e.g. \"5th grade\"")]
        grade: Option<String>,
        #[arg(long, help = "Learning environment, e.g. classroom, library")]
        environment: Option<String>,
        #[arg(long, help = "Confidence with hands-on projects")]
        confidence: Option<String>,
        #[arg(long, conflicts_with = "no_assessment", help = "Include an assessment")]
        assessment: bool,
        #[arg(long, help = "Leave out the assessment")]
        no_assessment: bool,
        #[arg(long, short, value_parser = parse_mode, help = "Generation mode: auto, ai, curated")]
        mode: Option<GenerationMode>,
        #[arg(short = 'f', long, value_parser = parse_format, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
        #[arg(long, short, help = "Write the result to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Answer the interview questions, plan, then explain objectives or get feedback
    Interview {
        #[arg(long, short, value_parser = parse_mode, help = "Generation mode: auto, ai, curated")]
        mode: Option<GenerationMode>,
        #[arg(short = 'f', long, value_parser = parse_format, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
        #[arg(long, short, help = "Write the result to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Get AI feedback on a lesson plan
    Feedback {
        #[arg(long, short, help = "Lesson plan JSON (bare plan or 'plan --format json' output)")]
        plan: PathBuf,
        #[arg(short = 'f', long, value_parser = parse_format, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// Explain a lesson concept
    Explain {
        #[arg(help = "Concept to explain, e.g. a learning objective")]
        concept: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mflightplan encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

/// Provider failures collapse to a generic message; the detail goes to the log.
/// Local problems (config, answers files) are shown as they are.
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PlanError>() {
        Some(plan_err @ (PlanError::Llm(_) | PlanError::MalformedResponse { .. })) => {
            tracing::debug!("Generation failed: {}", plan_err);
            plan_err.user_message()
        }
        Some(plan_err) => plan_err.to_string(),
        None => err.to_string(),
    }
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Plan {
            answers,
            time,
            grade,
            environment,
            confidence,
            assessment,
            no_assessment,
            mode,
            format,
            output,
        } => {
            let assessment = match (assessment, no_assessment) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = PlanOptions {
                answers,
                overrides: AnswerOverrides {
                    time,
                    grade_level: grade,
                    environment,
                    confidence,
                    assessment,
                },
                mode,
                format,
                output,
                quiet: cli.quiet,
            };
            let rt = Runtime::new()?;
            rt.block_on(flightplan::cli::commands::plan::run(options))?;
        }
        Commands::Interview {
            mode,
            format,
            output,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(flightplan::cli::commands::interview::run(
                mode, format, output, cli.quiet,
            ))?;
        }
        Commands::Feedback { plan, format } => {
            let rt = Runtime::new()?;
            rt.block_on(flightplan::cli::commands::feedback::run(&plan, format))?;
        }
        Commands::Explain { concept } => {
            let rt = Runtime::new()?;
            rt.block_on(flightplan::cli::commands::explain::run(&concept))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                flightplan::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                flightplan::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    flightplan::cli::commands::config::init_global(force)?;
                } else {
                    flightplan::cli::commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
