/// Lifecycle of a registered compute inside the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered but never run.
    #[default]
    Init,
    /// A dependency changed since the last run.
    Dirty,
    /// Up to date with its dependencies.
    Clean,
}
