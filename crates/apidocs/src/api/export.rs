use crate::prelude::{println, *};
use apidocs_core::classify;
use apidocs_core::render::{self, ExportError};
use chrono::Utc;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ExportOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Export format: json or markdown
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: ExportOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Exporting {} as {}...", options.url, options.format);
    }

    let exported = export_data(&options.url, &options.format, &options.cookies).await?;
    println!("{}", exported);

    Ok(())
}

/// Fetches the documentation and serializes it in the requested format.
///
/// An unsupported format yields a rejection message, not an error.
pub async fn export_data(
    url: &str,
    format: &str,
    cookies: &[(String, String)],
) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    let groups = classify::classify(&description.endpoints);
    match render::export_docs(&description, &groups, format, Utc::now()) {
        Ok(exported) => Ok(exported),
        Err(rejection @ ExportError::UnsupportedFormat(_)) => Ok(rejection.to_string()),
        Err(e) => Err(eyre!(e)),
    }
}
