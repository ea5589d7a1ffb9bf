//! Observable single-value state cells.
//!
//! A [`MutableState`] holds one value on the UI thread. Writes that change the
//! value notify listeners and ask the owning runtime for a frame, which is the
//! host's cue to re-render anything that read the state.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::runtime::{current_runtime_handle, RuntimeHandle};

/// Identifies a listener registered with [`MutableState::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

struct StateCell<T> {
    value: RefCell<T>,
    listeners: RefCell<SmallVec<[(ListenerId, Listener<T>); 2]>>,
    next_listener_id: Cell<u64>,
    runtime: Option<RuntimeHandle>,
}

/// Shared, observable value.
///
/// Cloning the handle shares the underlying cell. Not thread-safe; use from
/// the runtime thread only.
pub struct MutableState<T> {
    inner: Rc<StateCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    /// Creates a state attached to the most recently created runtime, if any.
    pub fn new(value: T) -> Self {
        Self::with_runtime(value, current_runtime_handle())
    }

    /// Creates a state that schedules frames on the given runtime.
    pub fn new_in(value: T, runtime: RuntimeHandle) -> Self {
        Self::with_runtime(value, Some(runtime))
    }

    fn with_runtime(value: T, runtime: Option<RuntimeHandle>) -> Self {
        Self {
            inner: Rc::new(StateCell {
                value: RefCell::new(value),
                listeners: RefCell::new(SmallVec::new()),
                next_listener_id: Cell::new(1),
                runtime,
            }),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value`. Returns `true` if the value changed.
    ///
    /// Writing an equal value is a no-op: no listener runs and no frame is
    /// requested.
    pub fn set(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.replace(value);
        true
    }

    /// Stores `value` unconditionally and returns the previous value.
    pub fn replace(&self, value: T) -> T {
        if let Some(runtime) = &self.inner.runtime {
            runtime.assert_ui_thread();
        }
        let snapshot = value.clone();
        let previous = self.inner.value.replace(value);
        self.notify(&snapshot);
        if let Some(runtime) = &self.inner.runtime {
            runtime.schedule();
        }
        previous
    }

    /// Mutates the value in place through a copy. Returns `true` if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Adds a listener called after every change, outside of any borrow, so
    /// listeners may read or write the state again.
    pub fn add_listener(&self, listener: impl Fn(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener_id.get());
        self.inner.next_listener_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, value: &T) {
        let listeners: SmallVec<[Listener<T>; 2]> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T> PartialEq for MutableState<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
