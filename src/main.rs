//! stagewise - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stagewise::collect::{
    DefaultGitExecutor, check_git_installed, collect_changes, locate_repository,
};
use stagewise::config::{Overrides, Settings};
use stagewise::openai::ResponsesClient;
use stagewise::prompt::{build_input, load_instructions};

/// Draft a commit message from staged changes using the OpenAI Responses API.
#[derive(Parser, Debug)]
#[command(name = "stagewise")]
#[command(about = "Draft a commit message from staged changes")]
#[command(version)]
struct Cli {
    /// Whitespace-separated list of staged file paths
    files: Option<String>,

    /// Path to the instruction prompt file [default: ./scripts/prompt.txt]
    #[arg(long)]
    prompt: Option<PathBuf>,

    /// Model identifier (overrides STAGEWISE_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Responses API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the model input instead of calling the API
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn paths(&self) -> Vec<String> {
        self.files
            .as_deref()
            .map(|list| list.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::from_env(Overrides {
        prompt_path: cli.prompt.clone(),
        model: cli.model.clone(),
        endpoint: cli.endpoint.clone(),
    });

    // Step 1: Load the instruction prompt
    let instructions = load_instructions(&settings.prompt_path)
        .context("An instruction prompt is required")?;

    // Step 2: Check prerequisites
    check_git_installed().context("git is required")?;
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    // Outside a repository every file is skipped; the run still goes on
    locate_repository(&cwd);

    // Step 3: Collect staged changes
    let paths = cli.paths();
    let executor = DefaultGitExecutor::new(&cwd);
    let changes = collect_changes(&executor, &paths).await;
    debug!(files = changes.len(), "Collected staged changes");

    // Step 4: Build the model input
    let input = build_input(&changes);

    if cli.dry_run {
        println!("{}", input);
        return Ok(());
    }

    // Step 5: Ask the model
    let config = settings
        .client_config()
        .context("An API key is required to generate a message")?;
    let client = ResponsesClient::new(config)?;

    let message = client
        .generate(&instructions, &input)
        .await
        .context("Failed to generate commit message")?;

    println!("{}", message.to_json_line());

    Ok(())
}

/// Log to stderr so stdout carries only the generated JSON.
fn init_logging(verbose: bool) {
    let default = if verbose { "stagewise=debug" } else { "stagewise=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_argument_splits_on_whitespace() {
        let cli = Cli::parse_from(["stagewise", "src/a.rs  src/b.rs\ttests/c.rs\n"]);
        assert_eq!(cli.paths(), vec!["src/a.rs", "src/b.rs", "tests/c.rs"]);
    }

    #[test]
    fn test_no_files_argument_is_empty_list() {
        let cli = Cli::parse_from(["stagewise"]);
        assert!(cli.paths().is_empty());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_options_parse() {
        let cli = Cli::parse_from([
            "stagewise",
            "--prompt",
            "p.txt",
            "--model",
            "gpt-4o",
            "--endpoint",
            "http://localhost/v1/responses",
            "--dry-run",
            "-v",
            "a.txt",
        ]);
        assert_eq!(cli.prompt, Some(PathBuf::from("p.txt")));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost/v1/responses"));
        assert!(cli.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.paths(), vec!["a.txt"]);
    }
}
