//! PostgREST-style table client.
//!
//! Speaks the row API hosted Postgres backends expose under `/rest/v1`:
//! equality filters in the query string (`code=eq.ABC`), upserts declared via
//! `on_conflict` plus `Prefer: resolution=merge-duplicates`, and error bodies
//! shaped as `{"message": ..., "code": ..., "details": ..., "hint": ...}`.

use super::{RecordStore, StoreError, StoreResult};
use crate::model::Record;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

const REST_PATH: &str = "rest/v1";
const SELECT_COLUMNS: &str = "code,file_name,content";
const CONFLICT_COLUMNS: &str = "code,file_name";

struct Endpoint {
    client: Client,
    table_url: String,
    key: String,
}

pub struct RestStore {
    endpoint: std::result::Result<Endpoint, String>,
}

impl RestStore {
    pub fn new(base_url: &str, key: &str, table: &str) -> Self {
        Self {
            endpoint: Ok(Endpoint {
                client: Client::new(),
                table_url: table_url(base_url, table),
                key: key.to_string(),
            }),
        }
    }

    /// A store that fails every call with `reason`.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            endpoint: Err(reason.into()),
        }
    }

    fn endpoint(&self) -> StoreResult<&Endpoint> {
        self.endpoint
            .as_ref()
            .map_err(|reason| StoreError::backend(format!("backend is not configured: {}", reason)))
    }
}

impl Endpoint {
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
    }

    fn select_request(&self, code: &str) -> RequestBuilder {
        let builder = self
            .client
            .get(&self.table_url)
            .query(&[("select", SELECT_COLUMNS.to_string()), ("code", eq(code))]);
        self.authorize(builder)
    }

    /// `on_conflict` names the composite key, so a second save of the same
    /// `(code, file_name)` replaces the row instead of adding one.
    fn upsert_request(&self, record: &Record) -> RequestBuilder {
        let builder = self
            .client
            .post(&self.table_url)
            .query(&[("on_conflict", CONFLICT_COLUMNS)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[record]);
        self.authorize(builder)
    }

    fn delete_group_request(&self, code: &str) -> RequestBuilder {
        let builder = self
            .client
            .delete(&self.table_url)
            .query(&[("code", eq(code))]);
        self.authorize(builder)
    }

    fn delete_file_request(&self, code: &str, file_name: &str) -> RequestBuilder {
        let builder = self
            .client
            .delete(&self.table_url)
            .query(&[("code", eq(code)), ("file_name", eq(file_name))]);
        self.authorize(builder)
    }

    /// Sends the request and returns the body of a successful response.
    fn send(&self, builder: RequestBuilder) -> StoreResult<String> {
        let response = builder
            .send()
            .map_err(|e| StoreError::backend(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| StoreError::backend(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), REST_PATH, table)
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// Maps a non-success response onto the two error shapes.
///
/// A JSON object with a string `message` (or `error`) is a backend error we
/// understand; anything else is kept verbatim as an unknown payload.
pub(crate) fn classify_failure(status: u16, body: &str) -> StoreError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let known = parsed.as_ref().and_then(|v| {
        let message = v
            .get("message")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)?;
        let mut text = format!("{} (HTTP {})", message, status);
        for field in ["code", "details", "hint"] {
            if let Some(extra) = v.get(field).and_then(Value::as_str) {
                text.push_str(&format!("; {}: {}", field, extra));
            }
        }
        Some(text)
    });

    match known {
        Some(message) => StoreError::Backend { message },
        None => StoreError::Unknown {
            raw: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Decodes a successful select body.
pub(crate) fn decode_rows(body: &str) -> StoreResult<Vec<Record>> {
    serde_json::from_str(body).map_err(|e| StoreError::unknown(format!("{}: {}", e, body)))
}

impl RecordStore for RestStore {
    fn query(&self, code: &str) -> StoreResult<Vec<Record>> {
        let endpoint = self.endpoint()?;
        tracing::debug!(code, "querying records");
        let body = endpoint.send(endpoint.select_request(code))?;
        decode_rows(&body)
    }

    fn upsert(&mut self, record: &Record) -> StoreResult<()> {
        let endpoint = self.endpoint()?;
        tracing::debug!(code = %record.code, file_name = %record.file_name, "upserting record");
        endpoint.send(endpoint.upsert_request(record))?;
        Ok(())
    }

    fn delete_by_code(&mut self, code: &str) -> StoreResult<()> {
        let endpoint = self.endpoint()?;
        tracing::debug!(code, "deleting code group");
        endpoint.send(endpoint.delete_group_request(code))?;
        Ok(())
    }

    fn delete_by_code_and_file(&mut self, code: &str, file_name: &str) -> StoreResult<()> {
        let endpoint = self.endpoint()?;
        tracing::debug!(code, file_name, "deleting record");
        endpoint.send(endpoint.delete_file_request(code, file_name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::blocking::Request;
    use reqwest::Method;

    fn endpoint() -> Endpoint {
        match RestStore::new("https://db.example.test/", "anon-key", "code_files").endpoint {
            Ok(endpoint) => endpoint,
            Err(reason) => panic!("endpoint not configured: {}", reason),
        }
    }

    fn pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn header<'a>(request: &'a Request, name: &str) -> &'a str {
        request.headers()[name].to_str().unwrap()
    }

    fn assert_authorized(request: &Request) {
        assert_eq!(header(request, "apikey"), "anon-key");
        assert_eq!(header(request, "authorization"), "Bearer anon-key");
    }

    #[test]
    fn select_filters_on_code() {
        let request = endpoint().select_request("ABC").build().unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().path(), "/rest/v1/code_files");
        assert_eq!(
            pairs(&request),
            vec![
                ("select".to_string(), "code,file_name,content".to_string()),
                ("code".to_string(), "eq.ABC".to_string()),
            ]
        );
        assert_authorized(&request);
    }

    #[test]
    fn upsert_merges_on_composite_key() {
        let record = Record::new("ABC", "notes.txt", "hello");
        let request = endpoint().upsert_request(&record).build().unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(
            pairs(&request),
            vec![("on_conflict".to_string(), "code,file_name".to_string())]
        );
        assert_eq!(
            header(&request, "prefer"),
            "resolution=merge-duplicates,return=minimal"
        );
        assert_eq!(header(&request, "content-type"), "application/json");
        assert_authorized(&request);

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Vec<Record> = serde_json::from_slice(body).unwrap();
        assert_eq!(sent, vec![record]);
    }

    #[test]
    fn delete_group_filters_on_code_only() {
        let request = endpoint().delete_group_request("ABC").build().unwrap();

        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(
            pairs(&request),
            vec![("code".to_string(), "eq.ABC".to_string())]
        );
        assert_authorized(&request);
    }

    #[test]
    fn delete_file_filters_on_both_key_columns() {
        let request = endpoint()
            .delete_file_request("ABC", "my notes.txt")
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(
            pairs(&request),
            vec![
                ("code".to_string(), "eq.ABC".to_string()),
                ("file_name".to_string(), "eq.my notes.txt".to_string()),
            ]
        );
        assert_authorized(&request);
    }

    #[test]
    fn table_url_joins_without_double_slash() {
        assert_eq!(
            table_url("https://db.example.test/", "code_files"),
            "https://db.example.test/rest/v1/code_files"
        );
        assert_eq!(
            table_url("https://db.example.test", "t"),
            "https://db.example.test/rest/v1/t"
        );
    }

    #[test]
    fn error_object_is_backend_error() {
        let body = r#"{"code":"42501","details":null,"hint":"check policies","message":"permission denied for table code_files"}"#;
        match classify_failure(401, body) {
            StoreError::Backend { message } => {
                assert!(message.starts_with("permission denied for table code_files (HTTP 401)"));
                assert!(message.contains("code: 42501"));
                assert!(message.contains("hint: check policies"));
                assert!(!message.contains("details"));
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn error_field_is_backend_error() {
        let err = classify_failure(400, r#"{"error":"invalid_grant"}"#);
        assert!(matches!(err, StoreError::Backend { message } if message.contains("invalid_grant")));
    }

    #[test]
    fn html_body_is_unknown_with_raw_payload() {
        let body = "<html><body>502 Bad Gateway</body></html>";
        assert_eq!(
            classify_failure(502, body),
            StoreError::unknown(format!("HTTP 502: {}", body))
        );
    }

    #[test]
    fn json_without_message_is_unknown() {
        let err = classify_failure(500, r#"{"status":"boom"}"#);
        assert!(matches!(err, StoreError::Unknown { raw } if raw.contains("boom")));
    }

    #[test]
    fn decodes_rows_and_rejects_other_shapes() {
        let rows =
            decode_rows(r#"[{"code":"ABC","file_name":"a.txt","content":"1"}]"#).unwrap();
        assert_eq!(rows, vec![Record::new("ABC", "a.txt", "1")]);

        assert!(decode_rows("[]").unwrap().is_empty());
        assert!(matches!(
            decode_rows(r#"{"rows":[]}"#),
            Err(StoreError::Unknown { .. })
        ));
    }

    #[test]
    fn unconfigured_store_fails_every_call() {
        let mut store = RestStore::unconfigured("missing key");
        let expected = StoreError::backend("backend is not configured: missing key");

        assert_eq!(store.query("ABC"), Err(expected.clone()));
        assert_eq!(
            store.upsert(&Record::new("ABC", "a.txt", "1")),
            Err(expected.clone())
        );
        assert_eq!(store.delete_by_code("ABC"), Err(expected.clone()));
        assert_eq!(store.delete_by_code_and_file("ABC", "a.txt"), Err(expected));
    }
}
