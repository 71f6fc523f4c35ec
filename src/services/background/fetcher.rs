use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::io::Read;
use std::thread;
use std::time::Duration;

/// Downloads external background images.
pub struct BackgroundFetcher {
    client: Client,
    max_response_bytes: usize,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl BackgroundFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("Failed to build background fetch HTTP client")?;

        Ok(Self {
            client,
            max_response_bytes: 16 * 1024 * 1024,
            max_retries: 1,
            retry_delay_ms: 400,
        })
    }

    pub fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        validate_image_url(url)?;

        let mut last_error: Option<anyhow::Error> = None;
        for attempt in 0..=self.max_retries {
            match self.fetch_once(url) {
                Ok(bytes) => return Ok(bytes),
                Err(err) => {
                    if attempt == self.max_retries {
                        last_error = Some(err.context(format!(
                            "Failed to fetch background from {} after {} attempts",
                            url,
                            attempt + 1
                        )));
                    } else {
                        log::warn!(
                            "Background fetch attempt {} failed for {}: {}",
                            attempt + 1,
                            url,
                            err
                        );
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Unknown background fetch error")))
    }

    fn fetch_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Network error during background fetch")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Background fetch failed with HTTP status {}", status));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(anyhow!(
                    "Background image too large ({} bytes, limit {})",
                    content_length,
                    self.max_response_bytes
                ));
            }
        }

        let mut bytes = Vec::new();
        response
            .take(self.max_response_bytes as u64 + 1)
            .read_to_end(&mut bytes)
            .context("Failed to read background image body")?;
        if bytes.len() > self.max_response_bytes {
            return Err(anyhow!(
                "Background image exceeds {} bytes",
                self.max_response_bytes
            ));
        }

        Ok(bytes)
    }
}

/// Only plain web URLs can be fetched.
pub fn validate_image_url(url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(anyhow!("Background URL must start with http:// or https://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://example.com/a.png").is_ok());
        assert!(validate_image_url("http://example.com/a.png").is_ok());
        assert!(validate_image_url("file:///etc/passwd").is_err());
        assert!(validate_image_url("example.com/a.png").is_err());
    }

    #[test]
    fn test_fetch_rejects_unsupported_scheme_without_network() {
        let fetcher = BackgroundFetcher::new().unwrap();
        assert!(fetcher.fetch_image("ftp://example.com/a.png").is_err());
    }
}
