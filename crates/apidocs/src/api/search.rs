use crate::prelude::{println, *};
use apidocs_core::{openapi, render};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Term to search for in paths, summaries, descriptions, and tags
    pub search_term: String,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Searching {} for \"{}\"...",
            options.url, options.search_term
        );
    }

    let results = search_data(&options.url, &options.search_term, &options.cookies).await?;
    println!("{}", results);

    Ok(())
}

/// Fetches the documentation and returns rendered search results.
pub async fn search_data(
    url: &str,
    search_term: &str,
    cookies: &[(String, String)],
) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    let matches = openapi::search_endpoints(&description.endpoints, search_term);
    Ok(render::format_search_results(search_term, &matches))
}
