//! Data URI encoding: MIME sniffing plus a base64 payload.

use base64::Engine;
use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Detects the image MIME type from magic bytes.
#[must_use]
pub fn detect_image_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }

    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, ..] if bytes.len() >= 12 && &bytes[8..12] == b"WEBP" => {
            Some("image/webp")
        }
        [0x42, 0x4D, ..] => Some("image/bmp"),
        [0x00, 0x00, 0x01, 0x00, ..] => Some("image/x-icon"),
        _ if bytes.starts_with(b"<svg") || bytes.starts_with(b"<?xml") => Some("image/svg+xml"),
        _ => None,
    }
}

/// MIME type from the file extension, for content the sniffer does not recognise.
fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        _ => return None,
    };
    Some(mime)
}

/// Content first, then extension, then `application/octet-stream`.
pub fn sniff_mime(bytes: &[u8], path: &Path) -> &'static str {
    detect_image_type(bytes)
        .or_else(|| mime_from_extension(path))
        .unwrap_or(FALLBACK_MIME)
}

/// Encodes `bytes` as `data:<mime>;base64,<payload>`.
pub fn data_uri(bytes: &[u8], path: &Path) -> String {
    let mime = sniff_mime(bytes, path);
    let encoded_capacity = base64::encoded_len(bytes.len(), true).unwrap_or(0);
    let mut encoded = String::with_capacity(encoded_capacity + 13 + mime.len());

    encoded.push_str("data:");
    encoded.push_str(mime);
    encoded.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut encoded);

    encoded
}
