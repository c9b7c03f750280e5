use tracing::warn;

/// Decode raw bytes as UTF-8, falling back to Latin-1
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback always succeeds.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(error = %e, "UTF-8 decoding failed, falling back to Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}
