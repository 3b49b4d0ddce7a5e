// src/uploads.rs
//
// Product images are stored inline as `data:` URIs. Each file in a batch is
// checked on its own; a rejected file never blocks the others.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_FILES_PER_BATCH: usize = 10;
/// Pasted URL text is small; anything past this is dropped.
pub const MAX_URL_FIELD_BYTES: usize = 64 * 1024;

pub const NOT_AN_IMAGE: &str = "Please select only image files";
pub const IMAGE_TOO_LARGE: &str = "Image size should be less than 5MB";
pub const TOO_MANY_FILES: &str = "You can upload at most 10 images at once";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    /// Full size of the part as received. `bytes` is left empty once this
    /// passes the upload limit.
    pub size: usize,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            size: bytes.len(),
            bytes,
        }
    }
}

/// Accumulates one multipart part chunk by chunk, keeping at most `limit`
/// bytes in memory. The rest is counted and discarded.
#[derive(Debug)]
pub struct CappedBuffer {
    limit: usize,
    size: usize,
    bytes: Vec<u8>,
}

impl CappedBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            size: 0,
            bytes: Vec::new(),
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.size = self.size.saturating_add(chunk.len());
        if self.size <= self.limit {
            self.bytes.extend_from_slice(chunk);
        } else if !self.bytes.is_empty() {
            self.bytes = Vec::new();
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.size > self.limit
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRejection {
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    /// Accepted images as data URIs, in upload order.
    pub images: Vec<String>,
    pub errors: Vec<UploadRejection>,
}

fn check_file(file: &UploadedFile, max_bytes: usize) -> Result<&str, &'static str> {
    let mime = match file.content_type.as_deref() {
        Some(mime) if mime.starts_with("image/") => mime,
        _ => return Err(NOT_AN_IMAGE),
    };
    if file.size > max_bytes {
        return Err(IMAGE_TOO_LARGE);
    }
    Ok(mime)
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn process_batch(files: Vec<UploadedFile>, max_bytes: usize) -> UploadReport {
    let mut report = UploadReport::default();
    for file in files {
        match check_file(&file, max_bytes) {
            Ok(mime) => {
                tracing::debug!(
                    "Accepted image {} ({}, {} bytes)",
                    file.file_name,
                    mime,
                    file.size
                );
                report.images.push(to_data_uri(mime, &file.bytes));
            }
            Err(message) => {
                tracing::warn!("Rejected upload {}: {}", file.file_name, message);
                report.errors.push(UploadRejection {
                    file_name: file.file_name,
                    message: message.to_string(),
                });
            }
        }
    }
    report
}

/// Pasted image URLs: trimmed, blanks dropped.
pub fn normalize_image_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .map(|url| url.as_ref().trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}
