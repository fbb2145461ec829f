use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::snapshot::CommandSnapshot;
use crate::updater::Updater;

/// Future type returned by [`Command::run`].
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// An async unit of work dispatched from the UI — typically a network call.
///
/// A command receives a frozen [`CommandSnapshot`] of the states and
/// computes that opted into snapshotting, reports results through the
/// [`Updater`], and should return promptly once `cancel` fires: the context
/// cancels the previous task whenever the same command type is dispatched
/// again, and drops any late results the superseded task still sends.
pub trait Command: Any {
    fn run(
        &self,
        snapshot: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
