use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Guess the image MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a base64 `data:` URL.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URL back into raw bytes.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("Not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("Data URL has no payload"))?;
    if !meta.ends_with(";base64") {
        return Err(anyhow!("Only base64 data URLs are supported"));
    }

    STANDARD
        .decode(payload.trim())
        .context("Failed to decode base64 image data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(&PathBuf::from("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(&PathBuf::from("beach.png")), "image/png");
        assert_eq!(mime_for_path(&PathBuf::from("noext")), "application/octet-stream");
    }

    #[test]
    fn test_encode_and_decode() {
        let bytes = [0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        let url = encode_data_url(&bytes, "image/png");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_other_urls() {
        assert!(decode_data_url("https://example.com/a.png").is_err());
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("data:image/png;base64").is_err());
    }
}
