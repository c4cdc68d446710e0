//! Raw and gzip-wrapped file variants
//!
//! `.dat` files hold the encoded bytes as-is. `.gz` files hold the same
//! bytes as a single gzip stream with no extra framing.

use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use crate::error::{ParticleError, Result};
use crate::{GZIP_EXT, RAW_EXT};

/// File variant, selected by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Uncompressed (.dat)
    Raw,
    /// Gzip-compressed (.gz)
    Gzip,
}

impl FileFormat {
    /// Select the variant from the path's last extension.
    ///
    /// Matching deliberately ignores case, so `PARTICLES.DAT` reads as a raw
    /// file. Readers that compare extensions exactly accept only the
    /// lowercase `.dat` / `.gz` names.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            RAW_EXT => Ok(FileFormat::Raw),
            GZIP_EXT => Ok(FileFormat::Gzip),
            _ => Err(ParticleError::UnsupportedExtension(path.to_path_buf())),
        }
    }

    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Raw => RAW_EXT,
            FileFormat::Gzip => GZIP_EXT,
        }
    }

    /// Unwrap file bytes into the encoded particle data.
    ///
    /// Decompressed output larger than `max_bytes` is rejected.
    pub fn decompress(self, bytes: Vec<u8>, max_bytes: u64) -> Result<Vec<u8>> {
        match self {
            FileFormat::Raw => Ok(bytes),
            FileFormat::Gzip => {
                let mut out = Vec::new();
                MultiGzDecoder::new(bytes.as_slice())
                    .take(max_bytes.saturating_add(1))
                    .read_to_end(&mut out)
                    .map_err(|e| ParticleError::CorruptCompressedData(e.to_string()))?;

                let len = out.len() as u64;
                if len > max_bytes {
                    return Err(ParticleError::FileTooLarge {
                        len,
                        max: max_bytes,
                    });
                }
                tracing::debug!("Decompressed {} -> {} bytes", bytes.len(), out.len());
                Ok(out)
            }
        }
    }

    /// Wrap encoded particle data for writing.
    ///
    /// `level` is the gzip level (0-9) and is ignored for raw files.
    pub fn compress(self, bytes: Vec<u8>, level: u32) -> Result<Vec<u8>> {
        match self {
            FileFormat::Raw => Ok(bytes),
            FileFormat::Gzip => {
                let mut encoder =
                    GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::new(level));
                encoder.write_all(&bytes)?;
                Ok(encoder.finish()?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("particles.dat")).unwrap(),
            FileFormat::Raw
        );
        assert_eq!(
            FileFormat::from_path(Path::new("particles.dat.gz")).unwrap(),
            FileFormat::Gzip
        );
        assert_eq!(
            FileFormat::from_path(Path::new("dir/PARTICLES.DAT")).unwrap(),
            FileFormat::Raw
        );
        assert_eq!(
            FileFormat::from_path(Path::new("dir/Particles.Dat.GZ")).unwrap(),
            FileFormat::Gzip
        );
    }

    #[test]
    fn test_unsupported_extension() {
        for path in ["particles.csv", "particles", "particles.dat.zip", ".dat"] {
            assert!(
                matches!(
                    FileFormat::from_path(Path::new(path)),
                    Err(ParticleError::UnsupportedExtension(_))
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_raw_passthrough() {
        let data = vec![1, 2, 3, 4];
        assert_eq!(FileFormat::Raw.compress(data.clone(), 6).unwrap(), data);
        assert_eq!(FileFormat::Raw.decompress(data.clone(), 4).unwrap(), data);
    }

    #[test]
    fn test_gzip_roundtrip() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 17) as u8).collect();
        let packed = FileFormat::Gzip.compress(data.clone(), 6).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(&packed[0..2], &[0x1f, 0x8b]); // gzip magic

        let unpacked = FileFormat::Gzip.decompress(packed, u64::MAX).unwrap();
        assert_eq!(unpacked, data);
    }

    #[test]
    fn test_gzip_corrupt_stream() {
        let err = FileFormat::Gzip
            .decompress(vec![0x00, 0x01, 0x02, 0x03], u64::MAX)
            .unwrap_err();
        assert!(matches!(err, ParticleError::CorruptCompressedData(_)));

        let mut packed = FileFormat::Gzip.compress(vec![7u8; 1000], 6).unwrap();
        packed.truncate(packed.len() / 2);
        let err = FileFormat::Gzip.decompress(packed, u64::MAX).unwrap_err();
        assert!(matches!(err, ParticleError::CorruptCompressedData(_)));
    }

    #[test]
    fn test_gzip_size_cap() {
        let packed = FileFormat::Gzip.compress(vec![0u8; 10_000], 9).unwrap();
        let err = FileFormat::Gzip.decompress(packed, 1000).unwrap_err();
        assert!(matches!(err, ParticleError::FileTooLarge { max: 1000, .. }));
    }
}
