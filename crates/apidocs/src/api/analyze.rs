use crate::prelude::{println, *};
use apidocs_core::{classify, render};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AnalyzeOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: AnalyzeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Analyzing API documentation at {}...", options.url);
    }

    let report = analyze_data(&options.url, &options.cookies).await?;
    println!("{}", report);

    Ok(())
}

/// Fetches the documentation, classifies its endpoints, and returns the
/// rendered summary with page recommendations.
pub async fn analyze_data(url: &str, cookies: &[(String, String)]) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    let groups = classify::classify(&description.endpoints);
    Ok(render::format_summary(&description, &groups))
}
