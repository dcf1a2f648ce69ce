use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to read photo: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not a recognised image")]
    NotAnImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhoto {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Sniff the format, then decode the whole payload. A valid signature over a
/// truncated or damaged body is not an image.
fn image_mime(bytes: &[u8]) -> Option<&'static str> {
    let kind = infer::get(bytes)?;
    if kind.matcher_type() != infer::MatcherType::Image {
        return None;
    }
    if let Err(err) = printpdf::image_crate::load_from_memory(bytes) {
        tracing::debug!(mime = kind.mime_type(), %err, "photo payload does not decode");
        return None;
    }
    Some(kind.mime_type())
}

/// Decode a `data:<mime>;base64,<payload>` URI. Returns `None` for anything
/// that does not decode to a usable image.
pub fn decode_data_uri(uri: &str) -> Option<DecodedPhoto> {
    let rest = uri.trim().strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    let bytes = BASE64.decode(payload.trim()).ok()?;
    let mime = image_mime(&bytes)?;
    Some(DecodedPhoto {
        mime: mime.to_string(),
        bytes,
    })
}

pub fn encode_data_uri(bytes: &[u8]) -> Result<String, PhotoError> {
    let mime = image_mime(bytes).ok_or(PhotoError::NotAnImage)?;
    Ok(format!(
        "data:{};base64,{}",
        mime,
        BASE64.encode(bytes)
    ))
}

pub fn load_photo(path: &Path) -> Result<String, PhotoError> {
    let bytes = std::fs::read(path)?;
    encode_data_uri(&bytes)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A real 2x2 PNG.
    pub(crate) fn sample_png() -> Vec<u8> {
        let mut pixmap = resvg::tiny_skia::Pixmap::new(2, 2).expect("pixmap");
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(0x80, 0x00, 0x20, 0xFF));
        pixmap.encode_png().expect("png")
    }

    /// PNG signature followed by bytes that are not chunks.
    pub(crate) fn corrupt_png() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend((0u8..50).map(|b| b.wrapping_mul(37)));
        bytes
    }

    #[test]
    fn round_trips_png_bytes() {
        let png = sample_png();
        let uri = encode_data_uri(&png).expect("png");
        assert!(uri.starts_with("data:image/png;base64,"));
        let decoded = decode_data_uri(&uri).expect("decoded");
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, png);
    }

    #[test]
    fn rejects_signature_without_image_body() {
        let bytes = corrupt_png();
        assert!(infer::is_image(&bytes));
        assert!(matches!(encode_data_uri(&bytes), Err(PhotoError::NotAnImage)));
        let uri = format!("data:image/png;base64,{}", BASE64.encode(&bytes));
        assert!(decode_data_uri(&uri).is_none());
    }

    #[test]
    fn rejects_non_image_payloads() {
        assert!(matches!(
            encode_data_uri(b"plain text"),
            Err(PhotoError::NotAnImage)
        ));
        let uri = format!("data:image/png;base64,{}", BASE64.encode(b"plain text"));
        assert!(decode_data_uri(&uri).is_none());
    }

    #[test]
    fn rejects_malformed_uris() {
        assert!(decode_data_uri("").is_none());
        assert!(decode_data_uri("https://example.com/a.png").is_none());
        assert!(decode_data_uri("data:image/png,rawdata").is_none());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_none());
    }
}
