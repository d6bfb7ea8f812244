//! Request body compression.

use std::io::{self, Read, Write};

use faststats_core::constants::COMPRESSION_LEVEL;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Body encoding, announced through `Content-Encoding`.
///
/// Chosen by configuration, never negotiated with the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Zstd,
    Gzip,
}

impl Encoding {
    /// Value of the `Content-Encoding` header.
    pub fn content_encoding(self) -> &'static str {
        match self {
            Self::Zstd => "zstd",
            Self::Gzip => "gzip",
        }
    }

    pub fn compress(self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Self::Zstd => zstd::encode_all(bytes, COMPRESSION_LEVEL),
            Self::Gzip => {
                let level = Compression::new(COMPRESSION_LEVEL as u32);
                let mut encoder = GzEncoder::new(Vec::new(), level);
                encoder.write_all(bytes)?;
                encoder.finish()
            }
        }
    }

    pub fn decompress(self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Self::Zstd => zstd::decode_all(bytes),
            Self::Gzip => {
                let mut out = Vec::new();
                GzDecoder::new(bytes).read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zstd_frames_start_with_magic() {
        let compressed = Encoding::Zstd.compress(b"{}").unwrap();
        assert_eq!(&compressed[..4], &[0x28, 0xB5, 0x2F, 0xFD]);
    }

    #[test]
    fn gzip_frames_start_with_magic() {
        let compressed = Encoding::Gzip.compress(b"{}").unwrap();
        assert_eq!(&compressed[..2], &[0x1F, 0x8B]);
    }

    #[test]
    fn decompressing_garbage_fails() {
        assert!(Encoding::Zstd.decompress(b"not zstd").is_err());
        assert!(Encoding::Gzip.decompress(b"not gzip").is_err());
    }
}
