//! Integration tests for fetch failures: last-known-good rows, the banner,
//! and the once-per-revision error toast.

mod common;

use crate::common::{TestCtx, default_rows_body, read_path, settle};
use dealgrid_business::{RelatedListQuery, ToastsState};
use kittest::Queryable;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One good fetch, then every follow-up answers 500.
async fn failing_after_first_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(read_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_rows_body()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(read_path()))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Upstream timeout"})))
        .mount(&mock_server)
        .await;
    mock_server
}

/// A failed refetch keeps the previous rows on screen, banners the message
/// every frame, and toasts it exactly once.
#[tokio::test]
async fn failed_refetch_keeps_rows_and_toasts_once() {
    let mut test_ctx = TestCtx::with_server(failing_after_first_server().await);
    settle(test_ctx.harness_mut()).await;
    test_ctx.harness_mut().get_by_label("Server racks");

    test_ctx
        .harness_mut()
        .state_mut()
        .ctx
        .update::<RelatedListQuery>(|query| query.set_field_list("Name,Amount"));
    settle(test_ctx.harness_mut()).await;

    let harness = test_ctx.harness_mut();
    harness.get_by_label("Error: Upstream timeout");
    harness.get_by_label("Server racks");
    harness.get_by_label("Error fetching opportunities: Upstream timeout");
    assert_eq!(
        harness.state().ctx.state::<ToastsState>().toasts().len(),
        1,
        "settling runs many frames, yet a failed revision toasts once"
    );
}

/// Each newly failed revision announces itself again.
#[tokio::test]
async fn every_failed_revision_gets_its_own_toast() {
    let mut test_ctx = TestCtx::with_server(failing_after_first_server().await);
    settle(test_ctx.harness_mut()).await;

    test_ctx
        .harness_mut()
        .state_mut()
        .ctx
        .update::<RelatedListQuery>(|query| query.set_field_list("Name,Amount"));
    settle(test_ctx.harness_mut()).await;

    test_ctx
        .harness_mut()
        .state_mut()
        .ctx
        .update::<RelatedListQuery>(|query| query.set_field_list("Name"));
    settle(test_ctx.harness_mut()).await;

    assert_eq!(
        test_ctx.harness().state().ctx.state::<ToastsState>().toasts().len(),
        2,
        "two failed revisions, two toasts"
    );
}
