//! Immutable sequence with structural equality.

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    sync::Arc,
};

/// An immutable, order-preserving sequence compared element by element.
///
/// Two arrays are equal when they have the same length and pairwise-equal
/// elements in the same order, so descriptors built from them can be used as
/// cache keys. Cloning is cheap: the elements live behind an [`Arc`].
///
/// Empty input never allocates; every empty array shares the same
/// representation.
///
/// # Example
///
/// ```
/// use csgen_core::EquatableArray;
///
/// let a: EquatableArray<&str> = ["IFoo", "IBar"].into_iter().collect();
/// let b = EquatableArray::from(vec!["IFoo", "IBar"]);
///
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 2);
/// assert_eq!(a[1], "IBar");
/// ```
pub struct EquatableArray<T> {
    items: Option<Arc<[T]>>,
}

impl<T> EquatableArray<T> {
    /// The shared empty array.
    pub const fn empty() -> Self {
        Self { items: None }
    }

    /// Create an array from any sequence, reusing the empty representation
    /// when the sequence has no elements.
    pub fn create(items: impl IntoIterator<Item = T>) -> Self {
        items.into_iter().collect()
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.items {
            Some(items) => items,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_none()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> Default for EquatableArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for EquatableArray<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> Deref for EquatableArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PartialEq> PartialEq for EquatableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (&self.items, &other.items)
            && Arc::ptr_eq(a, b)
        {
            return true;
        }
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for EquatableArray<T> {}

impl<T: Hash> Hash for EquatableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Slice hashing writes the length first, then each element in order.
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for EquatableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> From<Vec<T>> for EquatableArray<T> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::empty()
        } else {
            Self {
                items: Some(items.into()),
            }
        }
    }
}

impl<T: Clone> From<&[T]> for EquatableArray<T> {
    fn from(items: &[T]) -> Self {
        items.to_vec().into()
    }
}

impl<T, const N: usize> From<[T; N]> for EquatableArray<T> {
    fn from(items: [T; N]) -> Self {
        Vec::from(items).into()
    }
}

impl<T> FromIterator<T> for EquatableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a, T> IntoIterator for &'a EquatableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for EquatableArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Build an [`EquatableArray<String>`] from anything string-like.
pub fn strings<I, S>(items: I) -> EquatableArray<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
