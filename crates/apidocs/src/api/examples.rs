use crate::prelude::{println, *};
use apidocs_core::render;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ExamplesOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Endpoint path to generate examples for, exactly as documented
    /// (e.g. "/pet/{petId}")
    pub endpoint_path: String,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: ExamplesOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Generating code examples for {} {}...",
            options.url, options.endpoint_path
        );
    }

    let examples = examples_data(&options.url, &options.endpoint_path, &options.cookies).await?;
    println!("{}", examples);

    Ok(())
}

/// Fetches the documentation and returns code samples for one endpoint.
///
/// The path has to match an extracted endpoint verbatim; when several
/// methods share the path, the first extracted one is used.
pub async fn examples_data(
    url: &str,
    endpoint_path: &str,
    cookies: &[(String, String)],
) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    let Some(endpoint) = description
        .endpoints
        .iter()
        .find(|endpoint| endpoint.path == endpoint_path)
    else {
        return Ok(format!(
            "Endpoint path \"{endpoint_path}\" was not found in the API documentation."
        ));
    };

    Ok(render::format_code_examples(&description.base_url, endpoint))
}
