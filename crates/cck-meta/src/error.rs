//! Error types for meta decoding

/// Errors produced while decoding a meta document
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// Bytes are not a JSON object of the expected shape
    #[error("malformed meta document: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MetaError::from(source);
        assert!(err.to_string().starts_with("malformed meta document:"));
    }
}
