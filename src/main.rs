use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use concord::analysis::{frequency, tokenize, top_terms};
use concord::config::Config;
use concord::corpus::source::FsSource;
use concord::output::sink::FsSink;
use concord::pipeline;

/// Concord: word-frequency profiling and similarity analysis for text
/// corpora.
///
/// Profiles every document in a corpus by relative word frequency, ranks
/// each document's most characteristic terms, and scores every document
/// pair by top-term overlap.
#[derive(Parser)]
#[command(name = "concord", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline and write the report files
    Analyze {
        /// Directory holding the corpus documents
        #[arg(long)]
        corpus_dir: Option<PathBuf>,

        /// Directory to write reports into
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Top terms to keep per document (default: 100)
        #[arg(long)]
        top_terms: Option<usize>,

        /// Most-similar pairs to list (default: 10)
        #[arg(long)]
        top_pairs: Option<usize>,

        /// Worker tasks per stage (default: 8)
        #[arg(long)]
        concurrency: Option<usize>,

        /// File with one stop word per line, replacing the built-in list
        #[arg(long)]
        stop_words: Option<PathBuf>,

        /// Also write a machine-readable analysis.json
        #[arg(long)]
        json: bool,

        /// Analyze only these documents (default: every .txt in the
        /// corpus directory)
        #[arg(long)]
        document: Vec<String>,
    },

    /// Tokenize a single file and show its term profile
    Tokens {
        /// The text file to inspect
        file: PathBuf,

        /// How many top terms to show
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("concord=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            corpus_dir,
            output_dir,
            top_terms,
            top_pairs,
            concurrency,
            stop_words,
            json,
            document,
        } => {
            let mut config = Config::load()?;
            if let Some(dir) = corpus_dir {
                config.corpus_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(k) = top_terms {
                config.top_terms = k;
            }
            if let Some(n) = top_pairs {
                config.top_pairs = n;
            }
            if let Some(c) = concurrency {
                config.concurrency = c;
            }
            if let Some(path) = stop_words {
                config.stop_words_path = Some(path);
            }
            config.write_json = json;
            config.validate()?;

            let source = FsSource::new(&config.corpus_dir);

            // Use the injected document list if given, otherwise enumerate
            // the corpus directory
            let ids = if document.is_empty() {
                source.list_documents().await?
            } else {
                document
            };
            if ids.is_empty() {
                anyhow::bail!(
                    "no documents to analyze in {} (expected .txt files)",
                    config.corpus_dir.display()
                );
            }
            info!(documents = ids.len(), corpus = %config.corpus_dir.display(), "Starting analysis");

            let sink = FsSink::new(&config.output_dir);
            pipeline::analyze::run(Arc::new(source), &ids, &config, &sink).await?;

            println!(
                "Reports written to {}",
                config.output_dir.display().to_string().bold()
            );
        }

        Commands::Tokens { file, top } => {
            let config = Config::load()?;
            let stop_words = config.stop_words()?;

            let raw = tokio::fs::read(&file).await?;
            let text = String::from_utf8_lossy(&raw);
            let tokens = tokenize::tokenize(&text, &stop_words);
            let profile = frequency::count_tokens(&tokens);

            println!("\n{}", format!("=== {} ===", file.display()).bold());
            println!("  Total tokens:    {}", profile.total);
            println!("  Distinct tokens: {}", profile.distinct_tokens());

            match frequency::normalize(&profile) {
                Some(scores) => {
                    let ranked = top_terms::extract_top_terms(&scores, top);
                    println!("\n  {}", "Top terms:".bold());
                    for (i, term) in ranked.terms.iter().enumerate() {
                        println!("  {:>3}. {} ({:.6})", i + 1, term.term, term.score);
                    }
                }
                None => {
                    println!(
                        "\n  {}",
                        "No tokens survived filtering — nothing to rank.".yellow()
                    );
                }
            }
        }
    }

    Ok(())
}
