use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{load_client_config, save_client_config};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Set the target API server URL")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:3000")]
        url: String,
    },

    #[command(about = "Show the configured server")]
    Show,

    #[command(about = "Check whether the server is reachable")]
    Ping,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Set { url } => {
            let parsed = url::Url::parse(&url)
                .map_err(|_| anyhow::anyhow!("Invalid server URL: {}", url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("Server URL must use http or https");
            }

            let mut config = load_client_config()?;
            config.server_url = url.trim_end_matches('/').to_string();
            save_client_config(&config)?;

            output_success(
                output_format,
                &format!("Server set to {}", config.server_url),
                Some(json!({ "server_url": config.server_url })),
            )
        }
        ServerCommands::Show => {
            let config = load_client_config()?;
            output_success(
                output_format,
                &format!("Current server: {}", config.server_url),
                Some(json!({ "server_url": config.server_url })),
            )
        }
        ServerCommands::Ping => {
            let client = ApiClient::from_config()?;
            if client.ping().await {
                output_success(
                    output_format,
                    &format!("{} is up", client.base_url()),
                    Some(json!({ "status": "up" })),
                )
            } else {
                output_error(output_format, &format!("{} is down", client.base_url()))
            }
        }
    }
}
