//! HTTP bindings for the deal service's two calls.

use serde::Deserialize;
use thiserror::Error;

use crate::http::{Client, Response};
use crate::records::{RecordPatch, RelatedListResponse, UpdateRequest};

/// Failure of a service call. The display string is exactly what the
/// notification shows, so status errors surface the upstream `message`
/// verbatim.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request produced no HTTP response.
    #[error("{0}")]
    Transport(String),
    /// Non-success status. `message` prefers the body's `message` field
    /// over the bare status line.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A success response whose body did not match the contract.
    #[error("Parse error: {0}")]
    Decode(String),
}

/// Error body shape shared by both calls.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn status_error(response: &Response) -> ApiError {
    let message = response
        .json::<ErrorBody>()
        .map(|body| body.message)
        .unwrap_or_else(|_| format!("API returned status: {}", response.status));
    ApiError::Status {
        status: response.status,
        message,
    }
}

/// Read call: the related opportunities of one parent account, projected to
/// the requested fields, plus the shared stage options.
pub async fn fetch_related_opportunities(
    base_url: &str,
    parent_id: &str,
    field_list: &str,
) -> Result<RelatedListResponse, ApiError> {
    let url = format!("{base_url}/accounts/{parent_id}/opportunities?fields={field_list}");
    let response = Client::get(url)
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    if !response.is_success() {
        return Err(status_error(&response));
    }
    response.json().map_err(|err| ApiError::Decode(err.to_string()))
}

/// Write call: one batched update carrying every edited row's changed fields.
pub async fn update_opportunities(
    base_url: &str,
    patches: Vec<RecordPatch>,
) -> Result<(), ApiError> {
    let url = format!("{base_url}/opportunities/batch-update");
    let request = Client::post(url)
        .json(&UpdateRequest {
            opportunities_to_update: patches,
        })
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    if !response.is_success() {
        return Err(status_error(&response));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::records::RecordPatch;

    use super::{ApiError, fetch_related_opportunities, update_opportunities};

    #[tokio::test]
    async fn fetch_parses_rows_and_options() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts/001xx000003DGbY/opportunities"))
            .and(query_param("fields", "Name,StageName"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "opportunities": [
                    {"Id": "006A", "Name": "Server racks", "StageName": "Prospecting"},
                    {"Id": "006B", "Name": "Install", "StageName": "Closed Won"}
                ],
                "stageNameOptions": [
                    {"label": "Prospecting", "value": "Prospecting"},
                    {"label": "Closed Won", "value": "Closed Won"}
                ]
            })))
            .mount(&server)
            .await;

        let response =
            fetch_related_opportunities(&server.uri(), "001xx000003DGbY", "Name,StageName")
                .await
                .expect("fetch should succeed against the mock");
        assert_eq!(response.opportunities.len(), 2);
        assert_eq!(response.opportunities[1].field_text("StageName"), "Closed Won");
        assert_eq!(response.stage_name_options.len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_the_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "No access to account"})),
            )
            .mount(&server)
            .await;

        let err = fetch_related_opportunities(&server.uri(), "001xx000003DGbY", "Name")
            .await
            .expect_err("403 must map to an error");
        assert!(matches!(err, ApiError::Status { status: 403, .. }));
        assert_eq!(
            err.to_string(),
            "No access to account",
            "the body's message field is the display string"
        );
    }

    #[tokio::test]
    async fn fetch_failure_without_json_body_falls_back_to_the_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = fetch_related_opportunities(&server.uri(), "001xx000003DGbY", "Name")
            .await
            .expect_err("502 must map to an error");
        assert_eq!(err.to_string(), "API returned status: 502");
    }

    #[tokio::test]
    async fn update_posts_the_batched_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/opportunities/batch-update"))
            .and(body_json(json!({
                "opportunitiesToUpdate": [
                    {"fields": {"Id": "006A", "StageName": "Closed Won"}}
                ]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut fields = BTreeMap::new();
        fields.insert("Id".to_owned(), Value::String("006A".to_owned()));
        fields.insert("StageName".to_owned(), Value::String("Closed Won".to_owned()));
        update_opportunities(&server.uri(), vec![RecordPatch { fields }])
            .await
            .expect("update should succeed against the mock");
    }

    #[tokio::test]
    async fn update_failure_surfaces_the_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"message": "Row locked by another user"})),
            )
            .mount(&server)
            .await;

        let err = update_opportunities(&server.uri(), vec![RecordPatch { fields: BTreeMap::new() }])
            .await
            .expect_err("409 must map to an error");
        assert_eq!(err.to_string(), "Row locked by another user");
    }
}
