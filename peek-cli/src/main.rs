use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use peek_format::Config;
use peek_value::{Heap, Value};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "peek")]
#[command(version = "0.2.0")]
#[command(about = "Render script values the way a console prints them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a JSON document
    Inspect {
        /// Input .json file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Recursion depth before nested values collapse
        #[arg(short, long, value_name = "N")]
        depth: Option<usize>,

        /// Color the output
        #[arg(long)]
        colors: bool,

        /// Configuration file (default: peekfmt.json next to the input)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Format arguments like console.log
    Format {
        /// Format string (%s %d %i %f %o %O %c %%)
        #[arg(value_name = "FORMAT")]
        format: String,

        /// Arguments; each is parsed as JSON when possible, else taken as a string
        #[arg(value_name = "ARGS", allow_hyphen_values = true)]
        args: Vec<String>,

        /// Color the output
        #[arg(long)]
        colors: bool,
    },

    /// Show configuration
    Config {
        /// Print an example peekfmt.json
        #[arg(long)]
        example: bool,

        /// Directory to resolve configuration from (default: current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            input,
            depth,
            colors,
            config,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => Config::from_dir(input.parent().unwrap_or(Path::new(".")))?,
            };
            if let Some(depth) = depth {
                config.depth = depth;
            }
            if colors {
                config.colors = true;
            }

            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let json: serde_json::Value = serde_json::from_str(&source)
                .with_context(|| format!("{} is not valid JSON", input.display()))?;

            let mut heap = Heap::new();
            let root = heap.import_json(&json);
            log::debug!("imported {} objects from {}", heap.len(), input.display());

            println!("{}", peek_format::inspect(&heap, &root, &config));
            Ok(())
        }

        Commands::Format {
            format,
            args,
            colors,
        } => {
            let mut config = Config::from_dir(".")?;
            if colors {
                config.colors = true;
            }

            let mut heap = Heap::new();
            let mut values = vec![Value::String(format)];
            for arg in &args {
                values.push(heap.import_json_or_string(arg));
            }

            println!("{}", peek_format::stringify_args(&heap, &values, &config));
            Ok(())
        }

        Commands::Config { example, path } => {
            if example {
                println!("{}", Config::example()?);
                return Ok(());
            }

            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            let config = Config::from_dir(&dir)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
