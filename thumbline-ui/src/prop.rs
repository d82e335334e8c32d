//! Callback and render-hook handles used in component args.
//!
//! ## Usage
//!
//! Store host closures in args structs. Every handle compares by identity
//! (`Arc::ptr_eq`), so args stay `Clone + PartialEq` without comparing
//! closures deeply.

use std::sync::Arc;

/// Shared, identity-compared holder for a callable trait object.
pub struct Slot<F: ?Sized> {
    inner: Arc<F>,
}

impl<F: ?Sized> Slot<F> {
    /// Wraps an already shared callable.
    pub fn from_shared(handler: Arc<F>) -> Self {
        Self { inner: handler }
    }

    /// Borrows the callable.
    pub fn get(&self) -> &F {
        &self.inner
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

/// Handle for a one-argument notification, `Fn(T) -> R`.
///
/// Slider notifications take a tuple, e.g. `CallbackWith<(f64, f64, bool)>`
/// for `(low, high, by_user)`.
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        (self.slot.get())(value)
    }
}

impl<T> CallbackWith<T> {
    /// A callback that ignores its argument.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }
}

impl<T> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

/// Render hook producing a host visual from an input value.
///
/// `RenderSlotWith` shares identity semantics with [`CallbackWith`] but is
/// reserved for "produce a visual for this value" hooks, e.g. a label hook
/// `RenderSlotWith<f64, V>` that turns the current value into a host node.
pub struct RenderSlotWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> RenderSlotWith<T, R> {
    /// Create a render hook from a closure.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(render)),
        }
    }

    /// Run the hook with an input value.
    pub fn render(&self, value: T) -> R {
        (self.slot.get())(value)
    }
}

impl<T, R, F> From<F> for RenderSlotWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(render: F) -> Self {
        Self::new(render)
    }
}

impl<T, R> From<CallbackWith<T, R>> for RenderSlotWith<T, R> {
    fn from(callback: CallbackWith<T, R>) -> Self {
        Self {
            slot: callback.slot,
        }
    }
}

impl<T, R> Clone for RenderSlotWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for RenderSlotWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for RenderSlotWith<T, R> {}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn callbacks_compare_by_identity() {
        let a = CallbackWith::<f64>::new(|_| {});
        let b = a.clone();
        let c = CallbackWith::<f64>::new(|_| {});
        assert!(a == b);
        assert!(a != c);
    }

    #[test]
    fn callback_with_forwards_argument() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let cb = CallbackWith::new(move |(lo, hi): (usize, usize)| {
            sink.fetch_add(lo + hi, Ordering::SeqCst);
        });
        cb.call((2, 3));
        cb.call((1, 1));
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn render_slot_from_callback_keeps_identity() {
        let cb = CallbackWith::<f64, String>::new(|v| format!("{v:.1}"));
        let slot: RenderSlotWith<f64, String> = cb.clone().into();
        assert_eq!(slot.render(2.5), "2.5");
        assert!(slot == RenderSlotWith::from(cb));
    }
}
