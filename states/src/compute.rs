use std::any::{Any, TypeId};

use crate::dep::Dep;
use crate::updater::Updater;

/// Dependency declaration of a compute: state types first, compute types
/// second. The context turns these into graph edges at registration.
pub type ComputeDeps = (Vec<TypeId>, Vec<TypeId>);

/// A derived value cached in the context.
///
/// `compute` runs on the UI thread whenever a declared dependency changed
/// since the last run. It must not perform side effects — network and other
/// long work belongs in a `Command`. New values are reported through the
/// [`Updater`] and applied at the next sync, never assigned in place.
///
/// Command-shaped caches (values only ever written by a command) implement
/// this with empty deps and a no-op `compute`; registering them as computes
/// gives them the same channel-assignment and snapshot plumbing.
pub trait Compute: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn deps(&self) -> ComputeDeps;

    fn compute(&self, dep: Dep<'_>, updater: Updater);

    /// Clone this compute into a `Send` box for a command snapshot. `None`
    /// (the default) keeps it off the snapshot.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Replace this compute with a value that arrived over the update channel.
    fn assign_box(&mut self, value: Box<dyn Any + Send>);
}
