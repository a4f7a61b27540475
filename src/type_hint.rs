use std::marker::PhantomData;

/// Zero-sized marker that pins a type parameter to a struct without the
/// derive-bound pollution a bare `PhantomData` field causes: `Clone`, `Copy`
/// and `Default` are implemented for every `T`.
pub struct TypeHint<T>(PhantomData<T>);

impl<T> TypeHint<T> {
  #[inline]
  pub fn new() -> Self { TypeHint(PhantomData) }
}

impl<T> Default for TypeHint<T> {
  #[inline]
  fn default() -> Self { Self::new() }
}

impl<T> Clone for TypeHint<T> {
  #[inline]
  fn clone(&self) -> Self { Self::new() }
}

impl<T> Copy for TypeHint<T> {}
