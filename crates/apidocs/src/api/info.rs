use crate::prelude::{println, *};
use apidocs_core::openapi::ApiDescription;
use apidocs_core::render;
use colored::Colorize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct InfoOptions {
    /// URL of the API documentation (Swagger/OpenAPI JSON or HTML page)
    pub url: String,

    /// Cookie forwarded to every outbound request, as name=value (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = super::parse_cookie)]
    pub cookies: Vec<(String, String)>,
}

pub async fn run(options: InfoOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching API info for {}...", options.url);
    }

    let client = super::build_client()?;
    let Some(description) =
        super::load_description(&client, &options.url, &options.cookies).await?
    else {
        println!("{}", super::DOC_NOT_FOUND);
        return Ok(());
    };

    display_info(&description);

    Ok(())
}

/// Fetches the documentation and returns the plain-text info report.
pub async fn info_data(url: &str, cookies: &[(String, String)]) -> Result<String> {
    let client = super::build_client()?;
    let Some(description) = super::load_description(&client, url, cookies).await? else {
        return Ok(super::DOC_NOT_FOUND.to_string());
    };

    Ok(render::format_api_info(&description))
}

/// Display document info and statistics as a formatted CLI table.
fn display_info(description: &ApiDescription) {
    std::println!(
        "\n{} ({})\n",
        description.title.bold().cyan(),
        description.version.bright_white()
    );

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Base URL".bold().cyan(),
        description.base_url.cyan().underline().to_string()
    ]);
    table.add_row(prettytable::row![
        "Endpoints".bold().cyan(),
        description.endpoints.len().to_string().bright_yellow()
    ]);

    for (method, count) in render::method_counts(&description.endpoints) {
        table.add_row(prettytable::row![
            method.as_str().bold().green(),
            count.to_string().bright_white()
        ]);
    }

    table.printstd();

    if !description.description.is_empty() {
        std::println!("\n{}:", "Description".bold().cyan());
        std::println!("{}", description.description);
    }

    let tags = render::tag_counts(&description.endpoints);
    if !tags.is_empty() {
        std::println!("\n{}:", "Tags (by endpoint count)".bold().cyan());
        for (tag, count) in tags {
            std::println!(
                "  {} {}",
                tag.bright_magenta(),
                format!("({count})").bright_black()
            );
        }
    }

    std::println!();
}
