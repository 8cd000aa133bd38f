use kc_core::{Creation, KcodeError};

/// Decodes the raw creation envelope. `source`, `parts` and `scene` must
/// all be present with the right types; nothing partial is returned.
pub fn decode_creation(data: &[u8]) -> Result<Creation, KcodeError> {
    serde_json::from_slice(data)
        .map_err(|error| KcodeError::new("ENVELOPE_DECODE", error.to_string()))
}
