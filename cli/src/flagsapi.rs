use ratatouille_core::error::{Error, Result, classify_status};
use ratatouille_core::flags::{FlagStyle, flag_url, iso_code_for_area};

/// Client for the flag-image service; resolves an area name to a country
/// flag PNG.
pub struct FlagsApiClient {
    client: reqwest::Client,
}

impl FlagsApiClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "ratatouille-cli/{} (recipe browser)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }

    pub fn url_for(area: &str, style: FlagStyle, size: u32) -> Result<String> {
        let code = iso_code_for_area(area)?;
        Ok(flag_url(code, style, size))
    }

    pub async fn fetch_flag(&self, area: &str, style: FlagStyle, size: u32) -> Result<Vec<u8>> {
        let url = Self::url_for(area, style, size)?;
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        classify_status(resp.status().as_u16())?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
