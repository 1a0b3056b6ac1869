use crate::prelude::{println, *};
use apidocs_core::render;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct EndpointsOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: EndpointsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Listing endpoints for {}...", options.url);
    }

    let listing = endpoints_data(&options.url, &options.cookies).await?;
    println!("{}", listing);

    Ok(())
}

/// Fetches the documentation and returns the tag-grouped endpoint listing.
pub async fn endpoints_data(url: &str, cookies: &[(String, String)]) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    Ok(render::format_endpoints_by_tag(&description))
}
