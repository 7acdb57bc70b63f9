//! Command-line interface for the stock research pipeline

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use research_server::{AppState, ServerConfig};
use research_stock::{ResearchConfig, StockResearcher, default_registry};
use serde_json::Value;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "research")]
#[command(about = "Equity research reports from news and SEC filings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a report for one ticker
    Analyze {
        /// Stock symbol; defaults to COMPANY_STOCK
        ticker: Option<String>,
    },
    /// Print the research context without calling the model
    Context { ticker: String },
    /// List the research tools
    Tools,
    /// Run one research tool
    Tool {
        name: String,
        /// Tool parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        input: String,
    },
    /// Run the HTTP server
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    research_utils::init_tracing();

    let cli = Cli::parse();
    let config = ResearchConfig::from_env()?;

    match cli.command {
        Commands::Analyze { ticker } => {
            let researcher = StockResearcher::new(&config)?;
            let raw = ticker.unwrap_or_else(|| researcher.default_ticker().to_string());
            let analysis = researcher.analyze(&raw).await?;
            println!("{}", banner(analysis.ticker.as_str()));
            println!("{}", analysis.report);
        }
        Commands::Context { ticker } => {
            let researcher = StockResearcher::new(&config)?;
            println!("{}", researcher.build_context(&ticker).await?);
        }
        Commands::Tools => {
            for tool in default_registry(&config)?.list_tools() {
                println!("{:<24} {}", tool.name(), tool.description());
            }
        }
        Commands::Tool { name, input } => {
            let params = parse_input(&input)?;
            info!(tool = %name, "Running tool");
            println!("{}", default_registry(&config)?.execute(&name, params).await?);
        }
        Commands::Serve { host, port } => {
            let state = AppState::from_config(&config)?;
            research_server::serve(state, &ServerConfig { host, port }).await?;
        }
    }

    Ok(())
}

fn banner(ticker: &str) -> String {
    let title = format!("Stock report: {ticker}");
    let rule = "=".repeat(title.len());
    format!("{rule}\n{title}\n{rule}\n")
}

fn parse_input(input: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(input).context("--input must be JSON")?;
    if !value.is_object() {
        return Err(anyhow!("--input must be a JSON object"));
    }
    Ok(value)
}
