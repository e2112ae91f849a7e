use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing::{error, info};

use quran_assistant::config::RequesterConfig;
use quran_assistant::env_file;
use quran_assistant::llm_interaction::AnswerRequester;
use quran_assistant::web_server::{self, ServerPaths};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// Options for the outbound chat-completion call
#[derive(clap::Args, Debug)]
struct RequesterArgs {
    #[arg(long, env = "GEMINI_MODEL", help = "Model identifier sent with each request.")]
    model: Option<String>,
    #[arg(long, env = "GEMINI_BASE_URL", help = "Base URL of the OpenAI-compatible API.")]
    base_url: Option<String>,
    #[arg(
        long,
        env = "QURAN_ASSISTANT_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Request timeout in seconds."
    )]
    timeout_secs: Option<u64>,
}

impl RequesterArgs {
    fn into_config(self) -> RequesterConfig {
        let mut config = RequesterConfig::from_env();
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the web UI.
    Serve {
        #[arg(long, env = "QURAN_ASSISTANT_HOST", default_value = "127.0.0.1", help = "Address to bind.")]
        host: std::net::IpAddr,
        #[arg(long, env = "QURAN_ASSISTANT_PORT", default_value_t = 8501, help = "Port for the web server.")]
        port: u16,
        #[arg(long, default_value = "templates", help = "Directory holding index.html.")]
        templates: PathBuf,
        #[arg(long, default_value = "static", help = "Directory served under /static.")]
        static_dir: PathBuf,
        #[command(flatten)]
        requester: RequesterArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for GEMINI_API_KEY)
    let dotenv = env_file::load_dotenv();

    // Reads log level from RUST_LOG (e.g. RUST_LOG=info,quran_assistant=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    dotenv.log();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            templates,
            static_dir,
            requester,
        } => {
            let config = requester.into_config();
            if config.api_key.is_none() {
                // Not fatal: each submission reports it until the key is set.
                error!("No Gemini API key configured; questions will fail until GEMINI_API_KEY is set");
            }
            info!(?config, "Starting web UI");
            let requester =
                AnswerRequester::new(config).context("Failed to initialize answer requester")?;

            let addr = SocketAddr::new(host, port);
            let paths = ServerPaths {
                templates_dir: templates,
                static_dir,
            };
            let mut web_server_handle = tokio::spawn(async move {
                if let Err(e) = web_server::start_web_server(addr, requester, paths).await {
                    error!("Web server failed: {:?}", e);
                }
            });

            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Ctrl-C received, initiating shutdown...");
                }
                res = &mut web_server_handle => {
                    match res {
                        Ok(_) => info!("Web server task completed unexpectedly."),
                        Err(e) if e.is_panic() => error!("Web server task panicked: {:?}", e),
                        Err(e) => error!("Web server task failed: {:?}", e),
                    }
                }
            }

            if !web_server_handle.is_finished() {
                info!("Aborting web server task...");
                web_server_handle.abort();
            }
            info!("Shutdown complete.");
        }
    }

    Ok(())
}
