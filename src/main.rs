//! Thin, stateless LLM CLI wrapper for editor integrations.

use std::io::Read;

use clap::{Parser, Subcommand};
use llm_bridge::{LlmClient, ConnectionStore, Message, Output, DEFAULT_CONNECTION};

#[derive(Parser)]
#[command(name = "llm-bridge", about = "Thin, stateless LLM completion boundary for editor integrations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the connection file if needed and print its path.
    ///
    /// The user is expected to fill in the file for subsequent use.
    Config {
        /// Connection name
        #[arg(short, long, default_value = DEFAULT_CONNECTION)]
        connection: String,
    },
    /// Execute a single stateless completion with stdin as the prompt.
    Run {
        /// Connection name
        #[arg(short, long, default_value = DEFAULT_CONNECTION)]
        connection: String,
        /// Output format token: "str" for text, "all" for the raw response
        #[arg(short, long, default_value = "str")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Config { connection } => config_command(&connection),
        Command::Run { connection, format } => run_command(&connection, &format).await,
    }
}

fn config_command(name: &str) -> anyhow::Result<()> {
    let store = ConnectionStore::new();
    let path = store.connection_path(name)?;
    if path.exists() {
        println!("{}", path.display());
        println!("The above path already exists, please edit the file.");
    } else {
        let path = store.init_connection(name)?;
        println!("{}", path.display());
        println!("The configuration was generated at the above path, please edit the file.");
    }
    Ok(())
}

async fn run_command(connection: &str, format: &str) -> anyhow::Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let input = input.trim();
    if input.is_empty() {
        anyhow::bail!("no prompt on stdin");
    }

    let client = LlmClient::from_name(connection)?;
    let output = client
        .completion(vec![Message::from_text(input)], format)
        .await?;

    match output {
        Output::Text(text) => println!("{text}"),
        Output::Raw(response) => println!("{}", serde_json::to_string_pretty(&response)?),
        Output::Structured(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Output::Custom(_) => anyhow::bail!("custom outputs are not printable from the CLI"),
    }
    Ok(())
}
