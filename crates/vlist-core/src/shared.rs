use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

/// Single-threaded shared handle for engine collaborators.
///
/// The pool, the node arena, viewports and paged-state peers are wired once at
/// the composition root and handed to every list through a clone of this
/// handle. `T` may be unsized, so `Shared<dyn ScrollViewport>` works through
/// [`Shared::from_rc`].
pub struct Shared<T: ?Sized> {
    inner: Rc<RefCell<T>>,
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }
}

impl<T: ?Sized> Shared<T> {
    /// Wraps an existing `Rc<RefCell<_>>`, typically after unsizing it to a trait object.
    pub fn from_rc(inner: Rc<RefCell<T>>) -> Self {
        Self { inner }
    }

    /// Run `f` with an immutable reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&*borrow)
    }

    /// Run `f` with a mutable reference to the stored value.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut *borrow)
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Mutable borrow that yields `None` instead of panicking while the value is in use.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, T>> {
        self.inner.try_borrow_mut().ok()
    }

    pub fn downgrade(&self) -> WeakShared<T> {
        WeakShared {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("strong", &Rc::strong_count(&self.inner))
            .finish()
    }
}

/// Non-owning counterpart of [`Shared`], used by listeners that must not keep a list alive.
pub struct WeakShared<T: ?Sized> {
    inner: Weak<RefCell<T>>,
}

impl<T: ?Sized> Clone for WeakShared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> WeakShared<T> {
    pub fn upgrade(&self) -> Option<Shared<T>> {
        self.inner.upgrade().map(Shared::from_rc)
    }
}
