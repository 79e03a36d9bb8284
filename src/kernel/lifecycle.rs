use super::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
enum BoundWorkspace {
    /// Nothing observed yet; distinct from observing "no workspace".
    Unset,
    Bound(Option<String>),
}

/// Owns the session store of one mounted editor view and clears it whenever
/// the active workspace changes.
///
/// The first observation only records the workspace. Later observations
/// reset the store when the id differs from the previous one. Dropping the
/// controller is the unmount.
pub struct SessionLifecycleController {
    store: Store,
    previous: BoundWorkspace,
}

impl SessionLifecycleController {
    pub fn mount() -> Self {
        Self::with_store(Store::default())
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            store,
            previous: BoundWorkspace::Unset,
        }
    }

    /// Returns `true` when the store was reset.
    pub fn observe_workspace(&mut self, workspace_id: Option<&str>) -> bool {
        let current = workspace_id.map(str::to_string);
        match &self.previous {
            BoundWorkspace::Unset => {
                self.previous = BoundWorkspace::Bound(current);
                false
            }
            BoundWorkspace::Bound(prev) if *prev == current => false,
            BoundWorkspace::Bound(prev) => {
                tracing::debug!(
                    from = prev.as_deref().unwrap_or("<none>"),
                    to = current.as_deref().unwrap_or("<none>"),
                    "workspace changed, resetting session"
                );
                self.store.reset();
                self.previous = BoundWorkspace::Bound(current);
                true
            }
        }
    }

    /// The last observed workspace; `None` before the first observation too.
    pub fn workspace_id(&self) -> Option<&str> {
        match &self.previous {
            BoundWorkspace::Unset => None,
            BoundWorkspace::Bound(id) => id.as_deref(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/lifecycle.rs"]
mod tests;
