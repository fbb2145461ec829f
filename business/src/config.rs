use std::any::Any;
use std::env::vars;

use dealgrid_states::{State, assign_boxed};
use serde::Deserialize;
use ustr::Ustr;

/// Field list used when `DEALGRID_FIELDS` is not set.
pub const DEFAULT_FIELD_LIST: &str = "Name,StageName,Amount,CloseDate";

/// Deal-service endpoint and the externally injected query parameters.
///
/// The base URL is baked in per build environment (Cargo features); all three
/// values can be overridden through `DEALGRID_*` environment variables at
/// startup and edited in the top bar afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Parent account whose related opportunities are listed. No fetch is
    /// issued while this is unset.
    pub parent_id: Option<Ustr>,
    /// Comma-separated field names projected into the table.
    pub field_list: String,
}

/// `DEALGRID_*` environment variables, deserialized with `serde-env`.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    dealgrid_api_base_url: Option<String>,
    dealgrid_parent_id: Option<String>,
    dealgrid_fields: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            parent_id: None,
            field_list: DEFAULT_FIELD_LIST.to_owned(),
        }
    }

    /// Built-in environment defaults with `DEALGRID_*` overrides applied.
    pub fn from_env() -> Self {
        match serde_env::from_iter(vars()) {
            Ok(overrides) => Self::default().with_overrides(overrides),
            Err(err) => {
                log::warn!("ignoring DEALGRID_* environment overrides: {err}");
                Self::default()
            }
        }
    }

    fn with_overrides(mut self, overrides: EnvOverrides) -> Self {
        if let Some(base_url) = overrides.dealgrid_api_base_url {
            // Request paths start with '/', so the base must not end with one.
            self.api_base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(parent_id) = overrides.dealgrid_parent_id {
            let parent_id = parent_id.trim();
            if !parent_id.is_empty() {
                self.parent_id = Some(Ustr::from(parent_id));
            }
        }
        if let Some(field_list) = overrides.dealgrid_fields {
            if !field_list.trim().is_empty() {
                self.field_list = field_list;
            }
        }
        self
    }

    pub fn api_url(&self) -> Ustr {
        Ustr::from(&self.api_base_url)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(if cfg!(target_arch = "wasm32") {
            // Same-origin relative URLs on web.
            String::new()
        } else if cfg!(feature = "env_sandbox") {
            "https://deals-sandbox.dealgrid.app".to_owned()
        } else if cfg!(feature = "env_nightly") {
            "https://deals-nightly.dealgrid.app".to_owned()
        } else {
            "https://deals.dealgrid.app".to_owned()
        })
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}
