//! Integration tests for reactive query parameters: changing the parent id
//! or the field list refetches and replaces the rows.

mod common;

use crate::common::{TestCtx, default_rows_body, read_path, settle};
use dealgrid_business::RelatedListQuery;
use kittest::Queryable;
use serde_json::json;
use ustr::Ustr;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Switching to another account fetches that account's list and replaces
/// the rows wholesale.
#[tokio::test]
async fn parent_change_fetches_the_new_account() {
    let mut test_ctx = TestCtx::new().await;
    Mock::given(method("GET"))
        .and(path("/accounts/001xx000003AAAA/opportunities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "opportunities": [
                {"Id": "006Z", "Name": "Printers", "StageName": "Prospecting", "Amount": 20.0, "CloseDate": "2026-05-01"}
            ],
            "stageNameOptions": [
                {"label": "Prospecting", "value": "Prospecting"}
            ]
        })))
        .mount(test_ctx.server())
        .await;

    settle(test_ctx.harness_mut()).await;
    test_ctx.harness_mut().get_by_label("Server racks");

    test_ctx
        .harness_mut()
        .state_mut()
        .ctx
        .update::<RelatedListQuery>(|query| {
            query.set_parent_id(Some(Ustr::from("001xx000003AAAA")));
        });
    settle(test_ctx.harness_mut()).await;

    let harness = test_ctx.harness_mut();
    harness.get_by_label("Printers");
    assert_eq!(
        harness.query_all_by_label("Server racks").count(),
        0,
        "rows are replaced wholesale, never merged across accounts"
    );
}

/// Changing the field list refetches with the new `fields` parameter and
/// rebuilds the columns.
#[tokio::test]
async fn field_list_change_refetches_with_new_fields() {
    let mock_server = MockServer::start().await;
    // Most specific mock first: wiremock answers with the first match.
    Mock::given(method("GET"))
        .and(path(read_path()))
        .and(query_param("fields", "Name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "opportunities": [
                {"Id": "006N", "Name": "Renewal"}
            ],
            "stageNameOptions": []
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(read_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_rows_body()))
        .mount(&mock_server)
        .await;

    let mut test_ctx = TestCtx::with_server(mock_server);
    settle(test_ctx.harness_mut()).await;
    test_ctx.harness_mut().get_by_label("Amount");

    test_ctx
        .harness_mut()
        .state_mut()
        .ctx
        .update::<RelatedListQuery>(|query| query.set_field_list("Name"));
    settle(test_ctx.harness_mut()).await;

    let harness = test_ctx.harness_mut();
    harness.get_by_label("Renewal");
    assert_eq!(
        harness.query_all_by_label("Amount").count(),
        0,
        "columns follow the field list"
    );

    let requests = test_ctx.server().received_requests().await.unwrap_or_default();
    assert!(
        requests.iter().any(|request| request.url.query() == Some("fields=Name")),
        "the refetch must carry the new fields parameter"
    );
}
