//! Fetch command + rows cache for the related list.
//!
//! Fetching is a side effect (network IO), so it must not live in a derived
//! compute — computes can run implicitly. Instead:
//!
//! - [`RelatedListRows`]: a compute-shaped cache holding the fetched rows,
//!   the phase of the last fetch and which query revision it answered,
//! - [`RefreshRelatedListCommand`]: a manual-only command the panel
//!   dispatches, which performs the read call and updates the cache via
//!   [`Updater`].
//!
//! A failed fetch keeps the previous rows in place: the cache moves to the
//! failed phase but carries the last-known-good rows forward, so the table
//! never blanks out under the user.

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dealgrid_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, Time,
    Updater, assign_boxed,
};
use log::{debug, error, info};

use crate::config::BusinessConfig;
use crate::opportunity_api::fetch_related_opportunities;
use crate::query::RelatedListQuery;
use crate::records::OpportunityRow;

/// Phase of the last fetch, carrying the query revision it answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch attempted yet.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading { revision: u64 },
    /// Rows replaced wholesale from a successful fetch.
    Loaded { revision: u64 },
    /// Fetch failed with a user-visible message; rows are the previous ones.
    Failed { revision: u64, message: String },
}

/// Compute-shaped cache of the fetched rows.
///
/// Its `compute()` is a deliberate no-op; updates come from
/// [`RefreshRelatedListCommand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedListRows {
    pub phase: FetchPhase,
    pub rows: Vec<OpportunityRow>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RelatedListRows {
    /// The query revision the cache last answered, in-flight included.
    pub fn answered_revision(&self) -> Option<u64> {
        match &self.phase {
            FetchPhase::Idle => None,
            FetchPhase::Loading { revision }
            | FetchPhase::Loaded { revision }
            | FetchPhase::Failed { revision, .. } => Some(*revision),
        }
    }

    /// The revision watcher: true when the cache has not answered the
    /// current query revision. A failed fetch does not self-retry — it
    /// answers its revision and waits for the next parameter change.
    pub fn wants_fetch(&self, current: u64) -> bool {
        self.answered_revision() != Some(current)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        if let FetchPhase::Failed { message, .. } = &self.phase {
            Some(message)
        } else {
            None
        }
    }
}

impl Compute for RelatedListRows {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        // A cache updated by a command; no derived dependencies.
        (Vec::new(), Vec::new())
    }

    fn compute(&self, _dep: Dep<'_>, _updater: Updater) {
        // Intentionally no-op. Side effects must not run inside a compute;
        // `RefreshRelatedListCommand` updates this cache instead.
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        // The command reads the previous rows to carry them through the
        // loading and failed phases.
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}

/// Manual-only command that performs the read call.
///
/// Dispatched by the panel's revision watcher and, after a successful save,
/// as the explicit refetch continuation.
#[derive(Debug, Default)]
pub struct RefreshRelatedListCommand;

impl Command for RefreshRelatedListCommand {
    fn run(
        &self,
        snapshot: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let query = snapshot.state::<RelatedListQuery>().clone();
        let config = snapshot.state::<BusinessConfig>().clone();
        let previous = snapshot.compute::<RelatedListRows>().clone();
        let now = snapshot.state::<Time>().now();

        Box::pin(async move {
            let Some(parent_id) = query.parent_id() else {
                info!("RefreshRelatedListCommand: no parent record id, skipping fetch");
                return;
            };
            let revision = query.revision();
            info!("RefreshRelatedListCommand: fetching revision {revision} for parent {parent_id}");
            updater.set(RelatedListRows {
                phase: FetchPhase::Loading { revision },
                rows: previous.rows.clone(),
                fetched_at: previous.fetched_at,
            });

            let field_list = query.wire_field_list();
            let request = fetch_related_opportunities(
                config.api_url().as_str(),
                parent_id.as_str(),
                &field_list,
            );
            let result = tokio::select! {
                () = cancel.cancelled() => {
                    debug!("RefreshRelatedListCommand: superseded, dropping fetch");
                    return;
                }
                result = request => result,
            };

            match result {
                Ok(response) => {
                    info!(
                        "RefreshRelatedListCommand: fetched {} opportunities",
                        response.opportunities.len()
                    );
                    let stage_options = Arc::new(response.stage_name_options);
                    let rows = response
                        .opportunities
                        .into_iter()
                        .map(|record| OpportunityRow {
                            record,
                            stage_options: Arc::clone(&stage_options),
                        })
                        .collect();
                    updater.set(RelatedListRows {
                        phase: FetchPhase::Loaded { revision },
                        rows,
                        fetched_at: Some(now),
                    });
                }
                Err(err) => {
                    error!("RefreshRelatedListCommand: {err}");
                    updater.set(RelatedListRows {
                        phase: FetchPhase::Failed {
                            revision,
                            message: err.to_string(),
                        },
                        rows: previous.rows,
                        fetched_at: previous.fetched_at,
                    });
                }
            }
        })
    }
}
