use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::thread::ThreadId;
use std::thread_local;

use crate::platform::RuntimeScheduler;

type LocalTask = Box<dyn FnOnce() + 'static>;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    local_tasks: RefCell<VecDeque<LocalTask>>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            local_tasks: RefCell::new(VecDeque::new()),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    /// Queues a closure on the UI thread's local queue.
    ///
    /// The closure may capture `Rc`/`RefCell` values because it never leaves the
    /// runtime thread. Callers must only invoke this from the runtime thread.
    fn enqueue_ui_task(&self, task: LocalTask) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "local UI task enqueued off the runtime thread",
        );
        self.local_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn drain_ui(&self) -> usize {
        let mut executed = 0;
        // Pop one at a time so tasks are free to enqueue more.
        loop {
            let task = self.local_tasks.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    executed += 1;
                }
                None => break,
            }
        }
        executed
    }

    fn has_pending_ui(&self) -> bool {
        self.local_tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true)
    }
}

/// Owner of the UI event loop state.
///
/// Dropping the `Runtime` invalidates every [`RuntimeHandle`] created from it.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let runtime = Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        };

        // Register this runtime so state created outside an explicit handle
        // can still request frames.
        let handle = runtime.handle();
        LAST_RUNTIME.with(|slot| {
            *slot.borrow_mut() = Some(handle);
        });

        runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
            ui_thread_id: self.inner.ui_thread_id,
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn set_needs_frame(&self, value: bool) {
        self.inner.needs_frame.set(value);
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak, cloneable reference to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    ui_thread_id: ThreadId,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    /// Schedules work that must run on the runtime thread.
    ///
    /// The closure runs the next time the host drains the local queue, never
    /// inline, so it may capture `Rc`/`RefCell` values. If the runtime is
    /// already gone there is no later turn and the closure is dropped unrun.
    pub fn enqueue_ui_task(&self, task: Box<dyn FnOnce() + 'static>) {
        match self.inner.upgrade() {
            Some(inner) => inner.enqueue_ui_task(task),
            None => log::debug!("runtime dropped; discarding deferred UI task"),
        }
    }

    /// Runs queued UI work until none is left, including work queued by the
    /// tasks themselves. Returns the number of tasks executed.
    pub fn drain_ui(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| inner.drain_ui())
            .unwrap_or(0)
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_ui())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn set_needs_frame(&self, value: bool) {
        if let Some(inner) = self.inner.upgrade() {
            inner.needs_frame.set(value);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "state mutated off the runtime's UI thread"
        );
    }
}

thread_local! {
    static LAST_RUNTIME: RefCell<Option<RuntimeHandle>> = const { RefCell::new(None) };
}

/// Returns the most recently created runtime on this thread, if still alive.
pub fn current_runtime_handle() -> Option<RuntimeHandle> {
    LAST_RUNTIME.with(|slot| slot.borrow().clone().filter(RuntimeHandle::is_alive))
}
