use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use serde::Deserialize;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_success, output_value};
use crate::cli::OutputFormat;
use crate::database::models::Survey;
use crate::flow::{self, export, Edge, Node};

#[derive(Subcommand)]
pub enum SurveyCommands {
    #[command(about = "Create a new draft survey")]
    Create {
        #[arg(help = "Survey title")]
        title: String,
        #[arg(long, default_value = "", help = "Survey description")]
        description: String,
    },

    #[command(about = "List your surveys")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Show one survey")]
    Show {
        #[arg(help = "Survey id")]
        id: String,
    },

    #[command(about = "Push a local flow graph file to the server")]
    Save {
        #[arg(help = "Survey id")]
        id: String,
        #[arg(help = "JSON file with { title?, nodes, edges }")]
        file: PathBuf,
    },

    #[command(about = "Publish a survey (one-way)")]
    Publish {
        #[arg(help = "Survey id")]
        id: String,
    },

    #[command(about = "Delete a survey")]
    Delete {
        #[arg(help = "Survey id")]
        id: String,
    },

    #[command(about = "Export the flow graph to a file")]
    Export {
        #[arg(help = "Survey id")]
        id: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        #[arg(long, default_value = ".", help = "Output directory")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        })
    }
}

/// Local graph file accepted by `survey save`.
#[derive(Debug, Deserialize)]
struct GraphFile {
    title: Option<String>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

pub async fn handle(cmd: SurveyCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (client, _session) = ApiClient::authenticated()?;

    match cmd {
        SurveyCommands::Create { title, description } => {
            let data = client
                .post(
                    "/api/surveys",
                    json!({ "title": title, "description": description }),
                )
                .await?;
            let survey: Survey = serde_json::from_value(data.clone())?;
            output_success(
                output_format,
                &format!("Created survey '{}' ({})", survey.title, survey.id),
                Some(json!({ "survey": data })),
            )
        }
        SurveyCommands::List { page, limit } => {
            let data = client
                .get(&format!("/api/surveys?page={page}&limit={limit}"))
                .await?;
            match output_format {
                OutputFormat::Json => output_value(&data),
                OutputFormat::Text => {
                    let total = data["total"].as_i64().unwrap_or(0);
                    let surveys = data["surveys"].as_array().cloned().unwrap_or_default();
                    if surveys.is_empty() {
                        println!("No surveys yet");
                        return Ok(());
                    }
                    for raw in &surveys {
                        let survey: Survey = serde_json::from_value(raw.clone())?;
                        println!(
                            "{}  {:<9}  {}",
                            survey.id,
                            survey.status.as_str(),
                            survey.title
                        );
                    }
                    println!("page {page} ({} of {total} shown)", surveys.len());
                    Ok(())
                }
            }
        }
        SurveyCommands::Show { id } => {
            let data = client.get(&format!("/api/surveys/{id}")).await?;
            match output_format {
                OutputFormat::Json => output_value(&data),
                OutputFormat::Text => {
                    let survey: Survey = serde_json::from_value(data)?;
                    println!("{} ({})", survey.title, survey.status);
                    if !survey.description.is_empty() {
                        println!("{}", survey.description);
                    }
                    println!(
                        "{} nodes, {} edges, eligibility rate {}%",
                        survey.nodes.len(),
                        survey.edges.len(),
                        flow::eligibility_rate(&survey.nodes)
                    );
                    Ok(())
                }
            }
        }
        SurveyCommands::Save { id, file } => {
            let content = std::fs::read_to_string(&file)
                .map_err(|e| anyhow::anyhow!("cannot read {}: {}", file.display(), e))?;
            let graph: GraphFile = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("invalid graph file {}: {}", file.display(), e))?;

            let mut body = json!({ "nodes": graph.nodes, "edges": graph.edges });
            if let Some(title) = graph.title {
                body["title"] = json!(title);
            }

            client.put(&format!("/api/surveys/{id}"), body).await?;
            output_success(output_format, "Survey saved successfully", None)
        }
        SurveyCommands::Publish { id } => {
            // Mirror the builder UI: skip the write once the survey is live
            let data = client.get(&format!("/api/surveys/{id}")).await?;
            let survey: Survey = serde_json::from_value(data)?;
            if survey.status == crate::database::models::SurveyStatus::Published {
                return output_success(output_format, "Survey is already published", None);
            }

            client
                .put(
                    &format!("/api/surveys/{id}"),
                    json!({ "status": "published" }),
                )
                .await?;
            output_success(output_format, "Survey published successfully", None)
        }
        SurveyCommands::Delete { id } => {
            client.delete(&format!("/api/surveys/{id}")).await?;
            output_success(output_format, "Survey deleted", None)
        }
        SurveyCommands::Export { id, format, out } => {
            let data = client.get(&format!("/api/surveys/{id}")).await?;
            let survey: Survey = serde_json::from_value(data)?;

            let (filename, content) = match format {
                ExportFormat::Json => (
                    export::logic_filename(&survey.title),
                    export::export_json(&survey.title, &survey.nodes, &survey.edges)?,
                ),
                ExportFormat::Csv => (
                    export::nodes_filename(&survey.title),
                    export::export_csv(&survey.nodes),
                ),
            };

            let path = out.join(filename);
            std::fs::write(&path, content)
                .map_err(|e| anyhow::anyhow!("cannot write {}: {}", path.display(), e))?;

            output_success(
                output_format,
                &format!("Exported to {}", path.display()),
                Some(json!({ "path": path.display().to_string() })),
            )
        }
    }
}
