use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

/// Frozen copies of context data handed to a command at dispatch time.
///
/// Only states and computes whose `snapshot` returned `Some` are present.
/// Accessors panic on absence: what a command reads is decided when the
/// application is wired up, so a missing entry is a programmer error and
/// the panic names the type to fix.
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
    computes: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl CommandSnapshot {
    pub(crate) fn new(
        states: BTreeMap<TypeId, Box<dyn Any + Send>>,
        computes: BTreeMap<TypeId, Box<dyn Any + Send>>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn state<T: Any>(&self) -> &T {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .unwrap_or_else(|| panic!("state snapshot for {} is missing", type_name::<T>()))
    }

    pub fn compute<T: Any>(&self) -> &T {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .unwrap_or_else(|| panic!("compute snapshot for {} is missing", type_name::<T>()))
    }
}
