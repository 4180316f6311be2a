//! Read entities definitions.

use std::{fmt, marker::PhantomData};

/// Indicator whether a `T` exists or not.
pub struct Exists<T: ?Sized> {
    /// Whether a `T` exists.
    exists: bool,

    /// Type of the checked entity.
    _of: PhantomData<T>,
}

impl<T: ?Sized> Exists<T> {
    /// Returns whether a `T` exists.
    #[must_use]
    pub const fn get(self) -> bool {
        self.exists
    }
}

impl<T: ?Sized> From<bool> for Exists<T> {
    fn from(exists: bool) -> Self {
        Self {
            exists,
            _of: PhantomData,
        }
    }
}

impl<T: ?Sized> From<Exists<T>> for bool {
    fn from(e: Exists<T>) -> Self {
        e.exists
    }
}

impl<T: ?Sized> Copy for Exists<T> {}
impl<T: ?Sized> Clone for Exists<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> fmt::Debug for Exists<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Exists").field(&self.exists).finish()
    }
}


#[cfg(test)]
mod spec {
    use crate::domain::Employee;

    use super::Exists;

    #[test]
    fn converts_from_and_into_bool() {
        let exists = Exists::<Employee>::from(true);

        assert!(exists.get());
        assert!(!bool::from(Exists::<Employee>::from(false)));
        assert_eq!(format!("{exists:?}"), "Exists(true)");
    }
}
