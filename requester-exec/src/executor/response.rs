use requester_core::types::ResponseKind;
use serde_json::Value as JsonValue;

use crate::executor::result::ChainError;

/// A response body decoded according to the endpoint's `response` kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(JsonValue),
    Text(String),
    Bytes(Vec<u8>),
}

pub fn decode_body(kind: ResponseKind, body: Vec<u8>) -> Result<ResponseBody, ChainError> {
    match kind {
        ResponseKind::Json => serde_json::from_slice(&body)
            .map(ResponseBody::Json)
            .map_err(|e| ChainError::InvalidJson(e.to_string())),
        ResponseKind::Text => Ok(ResponseBody::Text(match String::from_utf8(body) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })),
        ResponseKind::File => Ok(ResponseBody::Bytes(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_is_parsed() {
        let body = decode_body(ResponseKind::Json, br#"{"a":[1,2]}"#.to_vec()).unwrap();
        assert_eq!(body, ResponseBody::Json(json!({"a": [1, 2]})));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = decode_body(ResponseKind::Json, b"<html>".to_vec()).unwrap_err();
        assert!(matches!(err, ChainError::InvalidJson(_)));
    }

    #[test]
    fn text_decoding_is_lossy() {
        let body = decode_body(ResponseKind::Text, vec![b'o', b'k', 0xff]).unwrap();
        assert_eq!(body, ResponseBody::Text("ok\u{fffd}".to_string()));
    }
}
