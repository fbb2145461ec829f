use std::any::Any;

use chrono::{DateTime, Utc};

use crate::state::{State, assign_boxed};

/// Virtual clock state.
///
/// The application advances this once per frame from the wall clock;
/// commands read it from their snapshot and tests set it directly, so
/// time-dependent logic (toast expiry, fetch timestamps) stays mockable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl Default for Time {
    fn default() -> Self {
        Self { virt: Utc::now() }
    }
}

impl Time {
    pub fn now(&self) -> DateTime<Utc> {
        self.virt
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.virt = now;
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}
