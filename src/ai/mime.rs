/// Fallback when neither the server nor the bytes identify the image.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// MIME type to declare for an inline image part.
///
/// Prefers an `image/*` Content-Type from the origin server, then magic-byte
/// sniffing, then [`DEFAULT_IMAGE_MIME`].
pub fn resolve_image_mime(content_type: Option<&str>, bytes: &[u8]) -> String {
    let declared = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"));

    if let Some(declared) = declared {
        return declared;
    }

    match detect_image_mime(bytes) {
        Some(mime) => mime.to_string(),
        None => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to {}",
                &bytes[..bytes.len().min(4)],
                DEFAULT_IMAGE_MIME
            );
            DEFAULT_IMAGE_MIME.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some("image/png")
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some("image/webp")
        );
    }

    #[test]
    fn test_header_wins_over_sniffing() {
        assert_eq!(
            resolve_image_mime(Some("image/png; charset=binary"), &[0xFF, 0xD8, 0xFF]),
            "image/png"
        );
    }

    #[test]
    fn test_non_image_header_falls_back_to_sniffing() {
        assert_eq!(
            resolve_image_mime(Some("application/octet-stream"), &[0x89, 0x50, 0x4E, 0x47]),
            "image/png"
        );
    }

    #[test]
    fn test_unknown_falls_back_to_jpeg() {
        assert_eq!(resolve_image_mime(None, &[0x00, 0x01, 0x02, 0x03]), "image/jpeg");
    }

    #[test]
    fn test_empty_falls_back_to_jpeg() {
        assert_eq!(resolve_image_mime(None, &[]), "image/jpeg");
    }
}
