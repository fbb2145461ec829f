#![allow(dead_code)]

use std::time::Duration;

use dealgrid_ui::DealGridApp;
use dealgrid_ui::state::{State, TEST_PARENT_ID};
use dealgrid_ui::widgets::{related_list_panel, toast_overlay};
use egui_kittest::Harness;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    pub fn server(&self) -> &MockServer {
        &self.mock_server
    }
}

impl TestCtx<'static, State> {
    /// Panel harness against a server that already answers the read call
    /// with [`default_rows_body`].
    pub async fn new() -> Self {
        let mock_server = start_default_server().await;
        Self::with_server(mock_server)
    }

    /// Panel harness against a server the test mounts its own mocks on.
    pub fn with_server(mock_server: MockServer) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let state = State::test(mock_server.uri());
        let harness = Harness::new_ui_state(panel_frame, state);

        Self { mock_server, harness }
    }
}

impl TestCtx<'static, DealGridApp> {
    /// Whole-app harness, for smoke tests over `DealGridApp::update`.
    pub async fn new_app() -> Self {
        let mock_server = start_default_server().await;
        let app = DealGridApp::new(State::test(mock_server.uri()));
        let harness = Harness::new_eframe(|_| app);

        Self { mock_server, harness }
    }
}

async fn start_default_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(read_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_rows_body()))
        .mount(&mock_server)
        .await;

    mock_server
}

/// Path of the read call for the test parent account.
pub fn read_path() -> String {
    format!("/accounts/{TEST_PARENT_ID}/opportunities")
}

/// Drives the panel the way `DealGridApp::update` does, toast overlay
/// included. Time stays put so toasts never expire mid-test.
pub fn panel_frame(ui: &mut egui::Ui, state: &mut State) {
    state.ctx.sync_computes();
    related_list_panel(&mut state.ctx, ui);
    toast_overlay(&mut state.ctx, ui.ctx());
    state.ctx.flush_commands();
    state.ctx.run_computed();
}

/// Steps the panel harness until no command task has been active for a few
/// consecutive frames, so follow-ups queued by observers (the refetch after
/// a save, the loading phase of a second fetch) all land.
pub async fn settle(harness: &mut Harness<'_, State>) {
    let mut idle_frames = 0;
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        harness.step();
        if harness.state().ctx.has_active_tasks() {
            idle_frames = 0;
        } else {
            idle_frames += 1;
        }
        if idle_frames >= 3 {
            break;
        }
    }
}

pub fn default_rows_body() -> serde_json::Value {
    json!({
        "opportunities": [
            {"Id": "006A", "Name": "Server racks", "StageName": "Prospecting", "Amount": 1234.5, "CloseDate": "2026-03-15"},
            {"Id": "006B", "Name": "Install", "StageName": "Needs Analysis", "Amount": 99.0, "CloseDate": "2026-04-01"}
        ],
        "stageNameOptions": [
            {"label": "Prospecting", "value": "Prospecting"},
            {"label": "Needs Analysis", "value": "Needs Analysis"},
            {"label": "Closed Won", "value": "Closed Won"}
        ]
    })
}
