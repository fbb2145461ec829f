use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

/// Read-only view over the dependencies a compute declared.
///
/// The context builds this from the compute's `deps` list only, so an
/// undeclared access cannot silently read stale data — it panics instead.
/// Declarations are static, which makes a missing entry a wiring bug, not
/// a runtime condition.
pub struct Dep<'a> {
    states: BTreeMap<TypeId, &'a dyn Any>,
    computes: BTreeMap<TypeId, &'a dyn Any>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: BTreeMap<TypeId, &'a dyn Any>,
        computes: BTreeMap<TypeId, &'a dyn Any>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn state<T: Any>(&self) -> &'a T {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|any| any.downcast_ref::<T>())
            .unwrap_or_else(|| panic!("state {} is not a declared dependency", type_name::<T>()))
    }

    pub fn compute<T: Any>(&self) -> &'a T {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|any| any.downcast_ref::<T>())
            .unwrap_or_else(|| panic!("compute {} is not a declared dependency", type_name::<T>()))
    }
}

#[cfg(test)]
mod dep_tests {
    use std::any::{Any, TypeId};
    use std::collections::BTreeMap;

    use super::Dep;

    #[derive(Debug, PartialEq, Eq)]
    struct Counter(u32);

    #[test]
    fn state_returns_declared_dependency() {
        let counter = Counter(7);
        let mut states: BTreeMap<TypeId, &dyn Any> = BTreeMap::new();
        states.insert(TypeId::of::<Counter>(), &counter);
        let dep = Dep::new(states, BTreeMap::new());
        assert_eq!(dep.state::<Counter>(), &Counter(7), "declared state must be readable");
    }

    #[test]
    #[should_panic(expected = "not a declared dependency")]
    fn undeclared_state_panics() {
        let dep = Dep::new(BTreeMap::new(), BTreeMap::new());
        let _ = dep.state::<Counter>();
    }
}
