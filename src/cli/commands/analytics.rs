use crate::cli::client::ApiClient;
use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::database::models::AnalyticsSummary;

/// `surveyflow analytics` - the CLI rendition of the analytics page.
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let (client, _session) = ApiClient::authenticated()?;
    let data = client.get("/api/surveys/analytics").await?;

    match output_format {
        OutputFormat::Json => output_value(&data),
        OutputFormat::Text => {
            let summary: AnalyticsSummary = serde_json::from_value(data)?;
            println!("Total surveys:    {}", summary.total_surveys);
            println!("Published flows:  {}", summary.published_surveys);
            println!("Total responses:  {}", summary.total_responses);
            println!("Avg. eligibility: {}%", summary.avg_eligibility_rate);
            Ok(())
        }
    }
}
