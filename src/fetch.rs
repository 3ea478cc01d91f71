//! HTTP page fetcher.
//!
//! The Stack Exchange API gzip-compresses every response regardless of the
//! client's `Accept-Encoding`, so the fetcher pulls raw bytes and gunzips
//! them explicitly instead of relying on transport-level decompression.
//!
//! [`PageFetcher`] is the seam the orchestrator is written against; tests
//! drive the pagination loop with scripted fakes instead of the network.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::io::Read;
use std::time::Duration;

use crate::error::ImportError;

/// Fetches one URL and returns the decompressed response body.
///
/// No retry happens at this layer; a failure propagates to the orchestrator,
/// which stops paginating and persists what it has.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImportError>;
}

/// [`PageFetcher`] backed by a reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, ImportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(ImportError::fetch)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImportError::fetch(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::fetch(format!("GET {}: HTTP {}", url, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImportError::fetch(format!("GET {}: {}", url, e)))?;

        gunzip(&bytes)
    }
}

/// Decompress a gzip body, passing through bodies that are not gzipped.
///
/// The magic-byte check keeps the fetcher working when an intermediary has
/// already decompressed the payload.
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, ImportError> {
    if bytes.len() < 2 || bytes[0] != 0x1f || bytes[1] != 0x8b {
        return Ok(bytes.to_vec());
    }

    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| ImportError::fetch(format!("gzip decompression: {}", e)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_gunzip_roundtrip() {
        let payload = br#"{"items":[],"has_more":false}"#;
        let compressed = gzip(payload);
        assert_ne!(compressed, payload.to_vec());
        assert_eq!(gunzip(&compressed).unwrap(), payload.to_vec());
    }

    #[test]
    fn test_gunzip_passthrough_for_plain_bytes() {
        let payload = br#"{"items":[]}"#;
        assert_eq!(gunzip(payload).unwrap(), payload.to_vec());
    }

    #[test]
    fn test_gunzip_truncated_stream_fails() {
        let mut compressed = gzip(b"some longer payload that will be cut off");
        compressed.truncate(6);
        let err = gunzip(&compressed).unwrap_err();
        assert!(matches!(err, ImportError::Fetch(_)));
    }

    #[test]
    fn test_gunzip_empty_input() {
        assert_eq!(gunzip(&[]).unwrap(), Vec::<u8>::new());
    }
}
