use std::collections::BTreeMap;

use requester_core::types::{BodyRef, Endpoint, ValueMap};
use serde_json::Value as JsonValue;

use crate::executor::http::{FilePart, HttpRequest, RequestBody};
use crate::executor::result::ChainError;

/// Turn a fully substituted endpoint into the outbound request.
pub fn build_request(endpoint: &Endpoint) -> Result<HttpRequest, ChainError> {
    let url = url::Url::parse(endpoint.url.trim()).map_err(|e| {
        ChainError::InvalidRequest(format!("invalid url '{}': {e}", endpoint.url))
    })?;

    let mut headers = BTreeMap::new();
    for (name, value) in endpoint.headers.iter().flatten() {
        if !value.is_null() {
            headers.insert(name.clone(), value_to_string(value));
        }
    }

    let query = endpoint
        .params
        .as_ref()
        .map(query_pairs)
        .unwrap_or_default();

    let body = match endpoint.body() {
        None => RequestBody::Empty,
        Some(BodyRef::Files(files)) => RequestBody::Multipart(file_parts(files)),
        Some(BodyRef::Data(JsonValue::Object(map))) => RequestBody::Form(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect(),
        ),
        Some(BodyRef::Data(other)) => RequestBody::Raw(value_to_string(other).into_bytes()),
        Some(BodyRef::Json(value)) => RequestBody::Json(value.clone()),
    };

    Ok(HttpRequest {
        method: endpoint.method.trim().to_ascii_uppercase(),
        url,
        headers,
        query,
        body,
    })
}

/// Query pairs; list values repeat the key and nulls are dropped.
fn query_pairs(params: &ValueMap) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (k, v) in params {
        match v {
            JsonValue::Null => {}
            JsonValue::Array(items) => {
                out.extend(
                    items
                        .iter()
                        .filter(|i| !i.is_null())
                        .map(|i| (k.clone(), value_to_string(i))),
                );
            }
            other => out.push((k.clone(), value_to_string(other))),
        }
    }
    out
}

/// Each entry is either the file content or a `[file_name, content]` pair.
fn file_parts(files: &ValueMap) -> Vec<FilePart> {
    files
        .iter()
        .map(|(field, value)| {
            let (file_name, content) = match value {
                JsonValue::Array(pair) if pair.len() == 2 => {
                    (value_to_string(&pair[0]), value_to_string(&pair[1]))
                }
                other => (field.clone(), value_to_string(other)),
            };
            FilePart {
                field: field.clone(),
                file_name,
                content: content.into_bytes(),
            }
        })
        .collect()
}

pub(crate) fn value_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use requester_core::types::ResponseKind;
    use serde_json::json;

    fn endpoint() -> Endpoint {
        Endpoint {
            name: "e".to_string(),
            url: "https://example.com/x".to_string(),
            method: "post".to_string(),
            response: ResponseKind::Json,
            headers: None,
            params: None,
            files: None,
            data: None,
            json: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            hidden: false,
        }
    }

    #[test]
    fn method_is_uppercased_and_scalars_stringified() {
        let mut ep = endpoint();
        ep.headers = Some(BTreeMap::from([
            ("X-Count".to_string(), json!(3)),
            ("X-Skip".to_string(), JsonValue::Null),
        ]));
        ep.params = Some(BTreeMap::from([
            ("flag".to_string(), json!(true)),
            ("ids".to_string(), json!([1, 2])),
        ]));
        let req = build_request(&ep).unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.headers.get("X-Count").map(String::as_str), Some("3"));
        assert!(!req.headers.contains_key("X-Skip"));
        assert_eq!(
            req.query,
            vec![
                ("flag".to_string(), "true".to_string()),
                ("ids".to_string(), "1".to_string()),
                ("ids".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn form_and_raw_data_bodies() {
        let mut ep = endpoint();
        ep.data = Some(json!({"a": 1, "b": "two"}));
        assert_eq!(
            build_request(&ep).unwrap().body,
            RequestBody::Form(vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two".to_string()),
            ])
        );

        ep.data = Some(json!("raw text"));
        assert_eq!(
            build_request(&ep).unwrap().body,
            RequestBody::Raw(b"raw text".to_vec())
        );
    }

    #[test]
    fn file_parts_accept_name_content_pairs() {
        let mut ep = endpoint();
        ep.files = Some(BTreeMap::from([
            ("structure".to_string(), json!(["mol.pdb", "ATOM 1"])),
            ("notes".to_string(), json!("hello")),
        ]));
        let RequestBody::Multipart(parts) = build_request(&ep).unwrap().body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts[0].field, "notes");
        assert_eq!(parts[0].file_name, "notes");
        assert_eq!(parts[1].file_name, "mol.pdb");
        assert_eq!(parts[1].content, b"ATOM 1".to_vec());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let mut ep = endpoint();
        ep.url = "not a url".to_string();
        assert!(matches!(
            build_request(&ep),
            Err(ChainError::InvalidRequest(_))
        ));
    }
}
