use std::any::Any;

/// A unit of application state owned by the context.
///
/// States are plain data, read and mutated on the UI thread. Async commands
/// never hold references to them: they receive cloned snapshots at dispatch
/// time and write back through the update channel, which lands in
/// [`assign_box`](State::assign_box) at the next sync.
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone this state into a `Send` box for a command snapshot.
    ///
    /// The default keeps the state off the snapshot entirely; override it
    /// for states that commands read.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Replace this state with a value that arrived over the update channel.
    fn assign_box(&mut self, value: Box<dyn Any + Send>);
}

/// Shared `assign_box` body: downcast to `Self` and assign.
///
/// A downcast mismatch is logged rather than propagated; the sender is an
/// already-detached task and the slot keeps its current value.
pub fn assign_boxed<T: Any>(slot: &mut T, value: Box<dyn Any + Send>) {
    match value.downcast::<T>() {
        Ok(value) => *slot = *value,
        Err(_) => log::error!(
            "update channel carried a foreign type for {}",
            std::any::type_name::<T>()
        ),
    }
}
