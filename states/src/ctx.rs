use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::command::Command;
use crate::compute::{Compute, ComputeDeps};
use crate::dep::Dep;
use crate::error::Error;
use crate::graph::Graph;
use crate::snapshot::CommandSnapshot;
use crate::state::State;
use crate::state_sync_status::StateSyncStatus;
use crate::task::{TaskHandle, TaskId};
use crate::updater::{Applied, Updater};

struct StateEntry {
    value: Box<dyn State>,
}

struct ComputeEntry {
    value: Box<dyn Compute>,
    status: StateSyncStatus,
}

/// Registry of states, computes and commands, plus the per-frame drive
/// cycle that keeps them in sync.
///
/// Frame order matters and is the owner's contract:
///
/// 1. [`sync_computes`](Self::sync_computes) — apply queued async results,
/// 2. widgets read states and queue updates / commands,
/// 3. [`flush_commands`](Self::flush_commands) — dispatch queued commands,
/// 4. [`run_computed`](Self::run_computed) — re-run dirty computes.
///
/// Commands are spawned onto an ambient Tokio runtime when one exists
/// (tests), otherwise onto a lazily created background runtime; on wasm
/// they run on the browser task queue. Results travel back over a channel
/// and are applied in step 1 of a later frame, so every state mutation
/// happens on the UI thread.
pub struct StateCtx {
    states: BTreeMap<TypeId, StateEntry>,
    computes: BTreeMap<TypeId, ComputeEntry>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,
    queued: Vec<TypeId>,
    tasks: BTreeMap<TypeId, TaskHandle>,
    graph: Graph<TypeId>,
    sender: flume::Sender<Applied>,
    receiver: flume::Receiver<Applied>,
    #[cfg(not(target_arch = "wasm32"))]
    runtime: std::sync::OnceLock<tokio::runtime::Runtime>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queued: Vec::new(),
            tasks: BTreeMap::new(),
            graph: Graph::new(),
            sender,
            receiver,
            #[cfg(not(target_arch = "wasm32"))]
            runtime: std::sync::OnceLock::new(),
        }
    }

    // Registration ------------------------------------------------------

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.graph.add_node(id);
        self.states.insert(id, StateEntry { value: Box::new(state) });
        self.mark_dependents_dirty(id);
    }

    /// Register a compute. Its `deps` become graph edges; a registration
    /// that closes a dependency cycle panics immediately rather than
    /// deadlocking the recompute order later.
    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (state_deps, compute_deps) = compute.deps();
        self.graph.add_node(id);
        for dep in state_deps.iter().chain(compute_deps.iter()) {
            self.graph.add_edge(*dep, id);
        }
        if let Err(err) = self.graph.toposort() {
            panic!("registering {} closes a {err}", type_name::<T>());
        }
        self.computes.insert(
            id,
            ComputeEntry {
                value: Box::new(compute),
                status: StateSyncStatus::Init,
            },
        );
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    // State access ------------------------------------------------------

    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
            .ok_or(Error::StateNotFound(type_name::<T>()))
    }

    /// Mutable access without dirty tracking. Use [`update`](Self::update)
    /// for states that computes depend on.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("{}", Error::StateNotFound(type_name::<T>())))
    }

    /// Mutate a state and mark its dependent computes dirty.
    pub fn update<T: State>(&mut self, apply: impl FnOnce(&mut T)) {
        apply(self.state_mut::<T>());
        self.mark_dependents_dirty(TypeId::of::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
    }

    /// Mutable access to a compute's cached value, for synchronous resets
    /// after the UI consumed a terminal result. No dirty tracking.
    pub fn compute_mut<T: Compute>(&mut self) -> &mut T {
        self.computes
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("{}", Error::ComputeNotFound(type_name::<T>())))
    }

    // Dirty tracking ----------------------------------------------------

    pub fn mark_dirty(&mut self, id: &TypeId) {
        if let Some(entry) = self.computes.get_mut(id) {
            entry.status = StateSyncStatus::Dirty;
        }
    }

    pub fn mark_clean(&mut self, id: &TypeId) {
        if let Some(entry) = self.computes.get_mut(id) {
            entry.status = StateSyncStatus::Clean;
        }
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        for dependent in self.graph.dependents_of(id) {
            if let Some(entry) = self.computes.get_mut(&dependent) {
                entry.status = StateSyncStatus::Dirty;
            }
        }
    }

    // Frame cycle -------------------------------------------------------

    /// Apply queued results from commands and computes. Call at the start
    /// of every frame, before any widget reads state.
    pub fn sync_computes(&mut self) {
        while let Ok(applied) = self.receiver.try_recv() {
            if let Some(task_id) = applied.source {
                if !self.is_current_task(task_id) {
                    log::debug!("dropping update from superseded task {task_id:?}");
                    continue;
                }
            }
            self.apply(applied);
        }
    }

    fn is_current_task(&self, id: TaskId) -> bool {
        self.tasks
            .get(&id.type_id())
            .is_some_and(|handle| handle.id() == id)
    }

    fn apply(&mut self, applied: Applied) {
        let target = applied.target;
        if let Some(entry) = self.computes.get_mut(&target) {
            entry.value.assign_box(applied.value);
            entry.status = StateSyncStatus::Clean;
        } else if let Some(entry) = self.states.get_mut(&target) {
            entry.value.assign_box(applied.value);
        } else {
            log::warn!("update targets unregistered type {target:?}");
            return;
        }
        self.mark_dependents_dirty(target);
    }

    /// Re-run every dirty compute in dependency order. Call at the end of
    /// the frame, after widgets queued their updates.
    pub fn run_computed(&mut self) {
        let order = match self.graph.toposort() {
            Ok(order) => order,
            // Cycles are rejected at registration; this only fires if that
            // contract is broken.
            Err(err) => {
                log::error!("skipping computes: {err}");
                return;
            }
        };
        for id in order {
            let needs_run = self.computes.get(&id).is_some_and(|entry| {
                matches!(entry.status, StateSyncStatus::Init | StateSyncStatus::Dirty)
            });
            if !needs_run {
                continue;
            }
            // Lift the entry out so the dependency view can borrow the rest
            // of the registry.
            let Some(mut entry) = self.computes.remove(&id) else {
                continue;
            };
            let dep = self.dep_view(entry.value.deps());
            let updater = Updater::new(self.sender.clone(), None);
            entry.value.compute(dep, updater);
            entry.status = StateSyncStatus::Clean;
            self.computes.insert(id, entry);
        }
    }

    fn dep_view(&self, deps: ComputeDeps) -> Dep<'_> {
        let (state_deps, compute_deps) = deps;
        let mut states: BTreeMap<TypeId, &dyn Any> = BTreeMap::new();
        for id in state_deps {
            if let Some(entry) = self.states.get(&id) {
                states.insert(id, entry.value.as_any());
            }
        }
        let mut computes: BTreeMap<TypeId, &dyn Any> = BTreeMap::new();
        for id in compute_deps {
            if let Some(entry) = self.computes.get(&id) {
                computes.insert(id, entry.value.as_any());
            }
        }
        Dep::new(states, computes)
    }

    // Commands ----------------------------------------------------------

    /// Queue a command for [`flush_commands`](Self::flush_commands) at the
    /// end of the frame. Queueing the same type twice in one frame
    /// dispatches it once.
    pub fn enqueue_command<T: Command>(&mut self) {
        let id = TypeId::of::<T>();
        if !self.queued.contains(&id) {
            self.queued.push(id);
        }
    }

    /// Dispatch every queued command, in queue order.
    pub fn flush_commands(&mut self) {
        let queued = std::mem::take(&mut self.queued);
        for id in queued {
            self.dispatch_id(id);
        }
    }

    /// Dispatch a command immediately, superseding the previous in-flight
    /// task of the same type: that task's token is cancelled and any
    /// results it still sends are dropped at the channel.
    pub fn dispatch<T: Command>(&mut self) {
        self.dispatch_id(TypeId::of::<T>());
    }

    fn dispatch_id(&mut self, id: TypeId) {
        if !self.commands.contains_key(&id) {
            log::error!("dispatching unregistered command {id:?}");
            return;
        }
        let generation = self
            .tasks
            .get(&id)
            .map_or(0, |handle| handle.id().generation() + 1);
        if let Some(previous) = self.tasks.get(&id) {
            previous.cancel();
        }
        let handle = TaskHandle::new(TaskId::new(id, generation));
        let snapshot = self.snapshot();
        let updater = Updater::new(self.sender.clone(), Some(handle.id()));
        let cancel = handle.cancel_token();
        let finished = handle.finished_flag();
        let Some(command) = self.commands.get(&id) else {
            return;
        };
        let future = command.run(snapshot, updater, cancel);
        self.tasks.insert(id, handle);
        self.spawn(Box::pin(async move {
            future.await;
            finished.store(true, std::sync::atomic::Ordering::Release);
        }));
    }

    fn snapshot(&self) -> CommandSnapshot {
        let states = self
            .states
            .iter()
            .filter_map(|(id, entry)| entry.value.snapshot().map(|boxed| (*id, boxed)))
            .collect();
        let computes = self
            .computes
            .iter()
            .filter_map(|(id, entry)| entry.value.snapshot().map(|boxed| (*id, boxed)))
            .collect();
        CommandSnapshot::new(states, computes)
    }

    /// Latest task handle for a command type, if one was ever dispatched.
    pub fn current_task<T: Command>(&self) -> Option<&TaskHandle> {
        self.tasks.get(&TypeId::of::<T>())
    }

    /// True while any dispatched command future has not completed. The UI
    /// uses this to keep repainting while results may still arrive.
    pub fn has_active_tasks(&self) -> bool {
        self.tasks.values().any(|handle| !handle.is_finished())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&self, future: crate::command::CommandFuture) {
        if let Ok(ambient) = tokio::runtime::Handle::try_current() {
            ambient.spawn(future);
            return;
        }
        let runtime = self.runtime.get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .thread_name("ctx-commands")
                .enable_all()
                .build()
                .unwrap_or_else(|err| panic!("failed to build command runtime: {err}"))
        });
        runtime.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&self, future: crate::command::CommandFuture) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
