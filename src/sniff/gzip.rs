use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// MIME type the sniffer reports for gzip streams.
pub const GZIP_MIME: &str = "application/gzip";

/// Decompresses a gzip stream, refusing to inflate past `limit` bytes.
pub fn gunzip(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .take(limit as u64 + 1)
        .read_to_end(&mut decompressed)
        .context("Failed to decompress gzip data")?;
    if decompressed.len() > limit {
        anyhow::bail!("Decompressed gzip data exceeds {} bytes", limit);
    }
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).expect("write to encoder");
        encoder.finish().expect("finish encoder")
    }

    #[test]
    fn test_gunzip_round_trip() {
        let compressed = gzip(b"hello icon");
        assert_eq!(gunzip(&compressed, 1024).expect("valid gzip"), b"hello icon");
    }

    #[test]
    fn test_gunzip_truncated_stream_fails() {
        let compressed = gzip(&[7u8; 500]);
        let truncated = &compressed[..compressed.len() / 2];
        assert!(gunzip(truncated, 1024).is_err());
    }

    #[test]
    fn test_gunzip_respects_limit() {
        let compressed = gzip(&[0u8; 10_000]);
        assert!(gunzip(&compressed, 1_000).is_err());
    }
}
