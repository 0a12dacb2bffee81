use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{clear_session, load_session, save_session, Session};
use crate::cli::utils::{output_error, output_success, output_value, resolve_password};
use crate::cli::OutputFormat;
use crate::database::models::UserProfile;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account and log in")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Log in to the server")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Log out and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Exchange the refresh token for a new access token")]
    Refresh,

    #[command(about = "Show the server's view of the current user")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register {
            name,
            email,
            password,
        } => {
            let password = resolve_password(password)?;
            let client = ApiClient::from_config()?;

            let data = client
                .post(
                    "/api/auth/register",
                    json!({ "name": name, "email": email, "password": password }),
                )
                .await?;

            let user: UserProfile = serde_json::from_value(data["user"].clone())?;
            save_session(&Session {
                access_token: token_field(&data, "accessToken")?,
                refresh_token: token_field(&data, "refreshToken")?,
                user: user.clone(),
                logged_in_at: Utc::now(),
            })?;

            output_success(
                output_format,
                &format!("Registered and logged in as {}", user.email),
                Some(json!({ "user": data["user"] })),
            )
        }
        AuthCommands::Login { email, password } => {
            let password = resolve_password(password)?;
            let client = ApiClient::from_config()?;

            let data = client
                .post(
                    "/api/auth/login",
                    json!({ "email": email, "password": password }),
                )
                .await?;
            let access_token = token_field(&data, "accessToken")?;
            let refresh_token = token_field(&data, "refreshToken")?;

            // Login returns tokens only; fetch the profile with the new token
            let client = ApiClient::with_token(&access_token)?;
            let profile = client.get("/api/auth/whoami").await?;
            let user: UserProfile = serde_json::from_value(profile)?;

            save_session(&Session {
                access_token,
                refresh_token,
                user: user.clone(),
                logged_in_at: Utc::now(),
            })?;

            output_success(
                output_format,
                &format!("Logged in as {}", user.email),
                Some(json!({ "email": user.email })),
            )
        }
        AuthCommands::Logout => {
            // Best-effort server acknowledgment; the session is local state
            if let Ok(client) = ApiClient::from_config() {
                let _ = client.post("/api/auth/logout", json!({})).await;
            }
            clear_session()?;
            output_success(output_format, "Logged out", None)
        }
        AuthCommands::Status => match load_session()? {
            Some(session) => output_success(
                output_format,
                &format!(
                    "Logged in as {} (since {})",
                    session.user.email,
                    session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
                ),
                Some(json!({
                    "email": session.user.email,
                    "logged_in_at": session.logged_in_at,
                })),
            ),
            None => output_error(output_format, "Not logged in"),
        },
        AuthCommands::Refresh => {
            let (client, mut session) = ApiClient::authenticated()?;

            let data = client
                .post(
                    "/api/auth/refresh",
                    json!({ "refreshToken": session.refresh_token }),
                )
                .await?;

            session.access_token = token_field(&data, "accessToken")?;
            save_session(&session)?;

            output_success(output_format, "Access token refreshed", None)
        }
        AuthCommands::Whoami => {
            let (client, _session) = ApiClient::authenticated()?;
            let profile = client.get("/api/auth/whoami").await?;
            match output_format {
                OutputFormat::Json => output_value(&profile),
                OutputFormat::Text => {
                    let user: UserProfile = serde_json::from_value(profile)?;
                    println!("{} <{}>", user.name, user.email);
                    println!("id: {}", user.id);
                    Ok(())
                }
            }
        }
    }
}

fn token_field(data: &serde_json::Value, key: &str) -> anyhow::Result<String> {
    data[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("server response is missing '{}'", key))
}
