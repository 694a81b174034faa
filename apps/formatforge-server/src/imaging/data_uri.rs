//! Data-URI decoding
//!
//! Clients send files as `<prefix>,<base64 payload>`. The prefix is a MIME
//! hint and is ignored; only the payload is decoded.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{AppError, Result};

/// Split a data-URI on its first comma and decode the payload
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (_prefix, payload) = uri
        .split_once(',')
        .ok_or_else(|| AppError::InvalidDataUri("missing ',' between prefix and payload".to_string()))?;

    let bytes = BASE64.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(AppError::InvalidDataUri("payload is empty".to_string()));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_discarded() {
        let bytes = decode_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_only_first_comma_splits() {
        // base64 never contains ',' so a second one lands in the payload and fails
        let result = decode_data_uri("data:x,aGVs,bG8=");
        assert!(matches!(result, Err(AppError::Base64(_))));
    }

    #[test]
    fn test_missing_delimiter() {
        let result = decode_data_uri("aGVsbG8=");
        assert!(matches!(result, Err(AppError::InvalidDataUri(_))));
    }

    #[test]
    fn test_malformed_base64() {
        let result = decode_data_uri("data:image/png;base64,!!!not-base64!!!");
        assert!(matches!(result, Err(AppError::Base64(_))));
    }

    #[test]
    fn test_empty_payload() {
        let result = decode_data_uri("data:image/png;base64,");
        assert!(matches!(result, Err(AppError::InvalidDataUri(_))));
    }
}
