use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use parking_lot::{Mutex, RwLock};

use crate::id::ContributorId;

/// Shared read/write lock over the searchable model.
///
/// Contributors that read the model fetch under the read side. Writers
/// announce themselves before blocking so that readers about to start can
/// step aside for them.
#[derive(Debug, Default)]
pub struct ModelLock {
    lock: RwLock<()>,
    pending_writers: AtomicUsize,
}

impl ModelLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the read side.
    pub fn read<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock.read();
        f()
    }

    /// Run `f` while holding the write side.
    pub fn write<R>(&self, f: impl FnOnce() -> R) -> R {
        self.pending_writers.fetch_add(1, Ordering::AcqRel);
        let guard = self.lock.write();
        self.pending_writers.fetch_sub(1, Ordering::AcqRel);
        let result = f();
        drop(guard);
        result
    }

    #[must_use]
    pub fn has_pending_writers(&self) -> bool {
        self.pending_writers.load(Ordering::Acquire) > 0
    }

    /// Yield the current thread once when a writer is queued.
    ///
    /// Returns `true` when a yield happened.
    pub fn yield_to_writers(&self) -> bool {
        if self.has_pending_writers() {
            thread::yield_now();
            true
        } else {
            false
        }
    }
}

/// Project-scoped state shared by all sessions opened on the same project.
///
/// Contributors receive the context when they are created and keep their own
/// view of it; the pipeline never mutates contributor state through it.
pub struct SessionContext {
    project: String,
    root: PathBuf,
    model_lock: Arc<ModelLock>,
    scopes: Mutex<HashMap<&'static str, String>>,
    stores: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("project", &self.project)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new(project: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            root: root.into(),
            model_lock: Arc::new(ModelLock::new()),
            scopes: Mutex::new(HashMap::new()),
            stores: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn model_lock(&self) -> &Arc<ModelLock> {
        &self.model_lock
    }

    /// Scope the user last selected for `contributor`, if any.
    #[must_use]
    pub fn selected_scope(&self, contributor: ContributorId) -> Option<String> {
        self.scopes.lock().get(contributor.id()).cloned()
    }

    /// Remember the scope selected for `contributor`.
    pub fn select_scope(&self, contributor: ContributorId, scope: impl Into<String>) {
        self.scopes.lock().insert(contributor.id(), scope.into());
    }

    /// Project-level state of type `T`, created on first access.
    pub fn project_state<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        self.project_state_or_insert_with(T::default)
    }

    /// Project-level state of type `T`, created with `init` on first access.
    pub fn project_state_or_insert_with<T, F>(&self, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let mut stores = self.stores.lock();
        let store = stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(init()) as Arc<dyn Any + Send + Sync>);
        match Arc::clone(store).downcast::<T>() {
            Ok(state) => state,
            Err(_) => unreachable!("project state is keyed by its own type id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ContributorDescriptor;

    static DESCRIPTOR: ContributorDescriptor = ContributorDescriptor::new("ctx", "Context", 0);

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[test]
    fn project_state_is_created_once() {
        let context = SessionContext::new("demo", "/tmp");
        let first = context.project_state::<Counter>();
        first.0.fetch_add(1, Ordering::Relaxed);
        let second = context.project_state::<Counter>();
        assert_eq!(second.0.load(Ordering::Relaxed), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn scopes_are_remembered_per_contributor() {
        let context = SessionContext::new("demo", "/tmp");
        let id = ContributorId::from_descriptor(&DESCRIPTOR);
        assert_eq!(context.selected_scope(id), None);
        context.select_scope(id, "everywhere");
        assert_eq!(context.selected_scope(id).as_deref(), Some("everywhere"));
    }

    #[test]
    fn readers_see_pending_writers() {
        let lock = ModelLock::new();
        assert!(!lock.has_pending_writers());
        assert!(!lock.yield_to_writers());
        assert_eq!(lock.read(|| 7), 7);
        assert_eq!(lock.write(|| 8), 8);
        assert!(!lock.has_pending_writers());
    }

    #[test]
    fn queued_writer_makes_readers_yield() {
        use std::sync::mpsc;
        use std::time::{Duration, Instant};

        let lock = Arc::new(ModelLock::new());
        let (held_tx, held_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let reader = {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                lock.read(|| {
                    held_tx.send(()).expect("signal");
                    release_rx.recv().expect("release");
                });
            })
        };
        held_rx.recv().expect("reader holds the lock");

        let writer = {
            let lock = Arc::clone(&lock);
            thread::spawn(move || lock.write(|| 9))
        };
        let deadline = Instant::now() + Duration::from_secs(5);
        while !lock.has_pending_writers() {
            assert!(Instant::now() < deadline, "writer never queued");
            thread::yield_now();
        }

        assert!(lock.yield_to_writers());
        release_tx.send(()).expect("release");
        reader.join().expect("reader");
        assert_eq!(writer.join().expect("writer"), 9);
        assert!(!lock.yield_to_writers());
    }
}
