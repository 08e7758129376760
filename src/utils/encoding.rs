use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Decode a base64url string (with or without padding) into raw bytes.
/// Push services hand out VAPID public keys and subscription key material
/// in this form.
pub fn decode_base64url(input: &str) -> Result<Vec<u8>, String> {
    let trimmed = input.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .map_err(|e| format!("Invalid base64url input: {}", e))
}

/// Encode raw bytes as unpadded base64url, the wire form used for
/// subscription keys sent to the backend.
pub fn encode_base64url(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}
