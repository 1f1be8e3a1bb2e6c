//! Profile Image Storage
//!
//! Validates uploaded images, recompresses them to JPEG and stores them
//! content-addressed (sha256 filename) under the work dir. Identical
//! uploads dedupe to a single file.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::utils::AppError;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored profile images (85% keeps files small without
/// visible artifacts)
const JPEG_QUALITY: u8 = 85;

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    // Check file size
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    // Check file extension
    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext_lower, e
        )));
    }

    Ok(())
}

/// Re-encode the image as JPEG with a fixed quality
fn compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::database(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}

/// Store a profile image and return its path relative to the work dir
/// (`uploads/images/<sha256>.jpg`).
///
/// Re-uploading identical content resolves to the already stored file.
pub fn store_profile_image(
    uploads_dir: &Path,
    original_filename: &str,
    data: &[u8],
) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    let ext = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            AppError::validation(format!("Invalid file extension for: {}", original_filename))
        })?;

    validate_image(data, ext)?;

    let compressed = compress_image(data)?;
    let hash = calculate_hash(&compressed);
    let filename = format!("{}.jpg", hash);
    let file_path = uploads_dir.join(&filename);

    if file_path.exists() {
        tracing::info!(
            original_name = %original_filename,
            file = %filename,
            "Duplicate image detected, reusing stored file"
        );
    } else {
        fs::create_dir_all(uploads_dir)
            .map_err(|e| AppError::database(format!("Failed to create images directory: {}", e)))?;
        fs::write(&file_path, &compressed)
            .map_err(|e| AppError::database(format!("Failed to save file: {}", e)))?;
        tracing::info!(
            original_name = %original_filename,
            size = %compressed.len(),
            file = %filename,
            "Image stored"
        );
    }

    Ok(format!("uploads/images/{}", filename))
}
