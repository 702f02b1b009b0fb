use crate::{FailureKind, FetchError, SearchResponse};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a search response body. Anything without an `articles` array is malformed.
pub fn decode_search_body(bytes: &[u8]) -> Result<SearchResponse, FetchError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))
}
