//! Shared-ownership cells for per-activation state.
//!
//! Operators with more than one upstream half (merge, zip) or a scheduler
//! hop between producer and consumer need a slot both sides can reach.
//! `MutRc` is the single-threaded flavour, `MutArc` the thread-safe one;
//! `InnerDeref`/`InnerDerefMut` give generic code a uniform way to reach
//! inside either.

use std::{
  cell::{Ref, RefCell, RefMut},
  ops::{Deref, DerefMut},
  rc::Rc,
  sync::{Arc, Mutex, MutexGuard},
};

pub trait InnerDeref {
  type Target;
  type Deref<'r>: Deref<Target = Self::Target>
  where
    Self: 'r;
  fn inner_deref(&self) -> Self::Deref<'_>;
}

pub trait InnerDerefMut: InnerDeref {
  type DerefMut<'r>: DerefMut<Target = Self::Target>
  where
    Self: 'r;
  fn inner_deref_mut(&self) -> Self::DerefMut<'_>;
}

pub struct MutRc<T>(Rc<RefCell<T>>);
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutRc<T> {
  #[inline]
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }
}

impl<T> MutArc<T> {
  #[inline]
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }
}

impl<T> InnerDeref for MutRc<T> {
  type Target = T;
  type Deref<'r>
    = Ref<'r, T>
  where
    Self: 'r;

  #[inline]
  fn inner_deref(&self) -> Self::Deref<'_> { self.0.borrow() }
}

impl<T> InnerDerefMut for MutRc<T> {
  type DerefMut<'r>
    = RefMut<'r, T>
  where
    Self: 'r;

  #[inline]
  fn inner_deref_mut(&self) -> Self::DerefMut<'_> { self.0.borrow_mut() }
}

impl<T> InnerDeref for MutArc<T> {
  type Target = T;
  type Deref<'r>
    = MutexGuard<'r, T>
  where
    Self: 'r;

  // A poisoned lock means a panic escaped a notification callback; that is a
  // programming error, not a runtime condition to recover from.
  #[inline]
  fn inner_deref(&self) -> Self::Deref<'_> { self.0.lock().unwrap() }
}

impl<T> InnerDerefMut for MutArc<T> {
  type DerefMut<'r>
    = MutexGuard<'r, T>
  where
    Self: 'r;

  #[inline]
  fn inner_deref_mut(&self) -> Self::DerefMut<'_> { self.0.lock().unwrap() }
}

impl<T: Default> Default for MutRc<T> {
  #[inline]
  fn default() -> Self { Self::own(T::default()) }
}

impl<T: Default> Default for MutArc<T> {
  #[inline]
  fn default() -> Self { Self::own(T::default()) }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}
