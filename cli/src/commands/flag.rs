use anyhow::{Context, Result, bail};
use std::path::Path;

use ratatouille_core::flags::FlagStyle;

use crate::flagsapi::FlagsApiClient;

pub(crate) fn parse_style(style: &str) -> Result<FlagStyle> {
    match style.to_lowercase().as_str() {
        "flat" => Ok(FlagStyle::Flat),
        "shiny" => Ok(FlagStyle::Shiny),
        other => bail!("Unknown flag style '{other}'. Supported: flat, shiny"),
    }
}

/// Resolve an area's flag. With `--output` the PNG is downloaded; otherwise
/// the URL is printed.
pub(crate) async fn cmd_flag(
    flags: &FlagsApiClient,
    area: &str,
    style: &str,
    size: u32,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let style = parse_style(style)?;
    let url = FlagsApiClient::url_for(area, style, size)?;

    match output {
        Some(path) => {
            let bytes = flags.fetch_flag(area, style, size).await?;
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "url": url, "path": path.display().to_string() })
                );
            } else {
                let path = path.display();
                println!("Saved flag for {area} to {path}");
            }
        }
        None => {
            if json {
                println!("{}", serde_json::json!({ "url": url }));
            } else {
                println!("{url}");
            }
        }
    }

    Ok(())
}
