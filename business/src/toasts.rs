//! In-app toast notifications.
//!
//! Every terminal fetch/save outcome surfaces here. Expiry runs against the
//! runtime's virtual clock, so tests drive it without sleeping.

use std::any::Any;

use chrono::{DateTime, Duration, Utc};
use dealgrid_states::{State, assign_boxed};

/// Seconds a toast stays up before it expires on its own.
pub const TOAST_TTL_SECONDS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(TOAST_TTL_SECONDS)
    }
}

/// The toast queue, newest last. Owned by the UI thread; commands never
/// push toasts directly — panels observe terminal phases and push here.
#[derive(Debug, Clone, Default)]
pub struct ToastsState {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastsState {
    pub fn push(
        &mut self,
        level: ToastLevel,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            level,
            title: title.into(),
            message: message.into(),
            created_at: now,
        });
        id
    }

    pub fn success(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.push(ToastLevel::Success, title, message, now)
    }

    pub fn error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.push(ToastLevel::Error, title, message, now)
    }

    pub fn info(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.push(ToastLevel::Info, title, message, now)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop every toast whose time-to-live has elapsed.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|toast| toast.expires_at() > now);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl State for ToastsState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}
