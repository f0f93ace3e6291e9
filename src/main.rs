use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use recipegen::{
    CompletionClient, GenerateRecipeUseCase, GroqClient, MockCompletionClient, RecipeRequest,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};

#[derive(Parser)]
#[command(name = "recipegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.recipegen")]
    data_dir: String,

    /// Answer from canned data instead of calling the hosted model
    #[arg(long, global = true)]
    mock: bool,

    /// Model identifier (overrides GROQ_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// OpenAI-compatible API base URL (overrides GROQ_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one recipe and print it to stdout
    Generate {
        /// Free-text list of products the dish should contain
        #[arg(short, long)]
        ingredients: String,

        /// Cuisine the recipe must belong to
        #[arg(short, long)]
        cuisine: String,
    },

    /// Interactive form (the default when no subcommand is given)
    Tui,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // The TUI owns stdout, so interactive runs log to a file under the data
    // dir instead. The guard must stay alive for the whole run.
    let _log_guard = match command {
        Commands::Tui => {
            let data_dir = expand_tilde(&cli.data_dir);
            std::fs::create_dir_all(&data_dir)?;
            let appender = tracing_appender::rolling::never(&data_dir, "recipegen.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Some(guard)
        }
        _ => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            None
        }
    };

    let client: Arc<dyn CompletionClient> = if cli.mock {
        info!("Using mock completion client");
        Arc::new(MockCompletionClient::new())
    } else {
        let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        let model = cli
            .model
            .or_else(|| std::env::var("GROQ_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = cli
            .base_url
            .or_else(|| std::env::var("GROQ_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        info!("Using Groq completion client (model: {model})");
        Arc::new(GroqClient::new(api_key, model, base_url))
    };

    let use_case = Arc::new(GenerateRecipeUseCase::new(client));

    match command {
        Commands::Generate {
            ingredients,
            cuisine,
        } => {
            let request = RecipeRequest::new(ingredients, cuisine);
            let recipe = use_case.execute(&request).await?;
            if recipe.is_empty() {
                println!("(the model returned an empty response)");
            } else {
                println!("{}", recipe.markdown());
            }
        }

        Commands::Tui => recipegen::tui::run(use_case).await?,
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn generate_requires_both_inputs() {
        let res = Cli::try_parse_from(["recipegen", "generate", "--ingredients", "rice"]);
        assert!(res.is_err(), "--cuisine should be required");
    }

    #[test]
    fn generate_accepts_short_flags() {
        let res = Cli::try_parse_from(["recipegen", "generate", "-i", "rice", "-c", "Thai"]);
        assert!(res.is_ok());
    }

    #[test]
    fn no_subcommand_defaults_to_tui() {
        let cli = Cli::try_parse_from(["recipegen"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
    }
}
