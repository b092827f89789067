//! Perceptual fingerprinting via `image_hasher`.
//!
//! Uses DCT preprocessing with a mean hash at 8x8, the classic pHash
//! construction: frequency-domain information makes the fingerprint robust
//! to scaling, compression artifacts and small brightness changes.

use super::decode::decode;
use super::FingerprintSource;
use crate::error::FingerprintError;
use image_hasher::{HashAlg, Hasher, HasherConfig};
use std::path::Path;

/// DCT-based 64-bit perceptual fingerprinter.
pub struct PerceptualFingerprinter {
    hasher: Hasher,
}

impl PerceptualFingerprinter {
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_size(8, 8)
            .hash_alg(HashAlg::Mean)
            .preproc_dct()
            .to_hasher();

        Self { hasher }
    }
}

impl Default for PerceptualFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintSource for PerceptualFingerprinter {
    fn fingerprint(&self, path: &Path) -> Result<u64, FingerprintError> {
        let image = decode(path)?;
        let hash = self.hasher.hash_image(&image);

        // An 8x8 mean hash is exactly 64 bits
        let mut packed = [0u8; 8];
        for (slot, byte) in packed.iter_mut().zip(hash.as_bytes()) {
            *slot = *byte;
        }

        Ok(u64::from_le_bytes(packed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_gradient(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let img = ImageBuffer::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn identical_files_produce_identical_fingerprints() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_gradient(&temp_dir, "a.png");
        let b = write_gradient(&temp_dir, "b.png");

        let source = PerceptualFingerprinter::new();
        assert_eq!(
            source.fingerprint(&a).unwrap(),
            source.fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn fingerprint_is_stable_across_calls() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_gradient(&temp_dir, "stable.png");

        let source = PerceptualFingerprinter::new();
        assert_eq!(
            source.fingerprint(&path).unwrap(),
            source.fingerprint(&path).unwrap()
        );
    }

    #[test]
    fn corrupt_file_fails_with_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.jpg");
        std::fs::write(&path, b"not a jpeg at all").unwrap();

        let source = PerceptualFingerprinter::new();
        assert!(source.fingerprint(&path).is_err());
    }
}
