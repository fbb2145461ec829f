use std::any::{Any, TypeId, type_name};

use crate::task::TaskId;

/// A pending assignment travelling from a command or compute back to the
/// context. `source` is the producing task for command results, `None`
/// for derived computes (those are never superseded).
pub(crate) struct Applied {
    pub target: TypeId,
    pub source: Option<TaskId>,
    pub value: Box<dyn Any + Send>,
}

/// Write handle given to computes and commands.
///
/// `set` never touches state directly. The value is sent to the context
/// and applied at the next `sync_computes`, which keeps every mutation on
/// the UI thread. Updates carrying a superseded task id are dropped there.
#[derive(Clone)]
pub struct Updater {
    sender: flume::Sender<Applied>,
    source: Option<TaskId>,
}

impl Updater {
    pub(crate) fn new(sender: flume::Sender<Applied>, source: Option<TaskId>) -> Self {
        Self { sender, source }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        let applied = Applied {
            target: TypeId::of::<T>(),
            source: self.source,
            value: Box::new(value),
        };
        if self.sender.send(applied).is_err() {
            log::warn!("dropping update for {}: context is gone", type_name::<T>());
        }
    }
}
