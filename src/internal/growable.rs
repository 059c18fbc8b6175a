//! Module with the growable container that backs the token store and the rule table.
//!
//! The container grows geometrically: the first append reserves room for
//! [`INITIAL_CAPACITY`] elements and every append into a full container doubles the capacity.
//! Reservation is fallible, so running out of memory surfaces as an error instead of an abort.
//! The container never shrinks on its own.

use crate::Result;

/// The capacity reserved by the first append.
pub(crate) const INITIAL_CAPACITY: usize = 2;

/// An append-only sequence with a doubling growth policy.
#[derive(Debug, Clone)]
pub(crate) struct Growable<T> {
    items: Vec<T>,
}

impl<T> Growable<T> {
    /// Creates an empty container without allocating.
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends an element at the end.
    /// If the container is full its capacity is doubled before the element is stored.
    pub(crate) fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            let additional = match self.items.capacity() {
                0 => INITIAL_CAPACITY,
                capacity => capacity,
            };
            self.items.try_reserve_exact(additional)?;
        }
        self.items.push(item);
        Ok(())
    }

    /// Drops all elements but keeps the storage.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops all elements and frees the storage.
    pub(crate) fn release(&mut self) {
        self.items = Vec::new();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Growable<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Two containers are equal if they have the same length and each element equals the element
// at the same index in the other container. Capacity is not compared.
impl<T: PartialEq> PartialEq for Growable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(lhs, rhs)| lhs == rhs)
    }
}

impl<T: Eq> Eq for Growable<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_doubles() {
        let mut growable = Growable::new();
        assert_eq!(growable.capacity(), 0);
        let mut capacities = Vec::new();
        for i in 0..9 {
            growable.push(i).unwrap();
            capacities.push(growable.capacity());
        }
        assert_eq!(capacities, vec![2, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(growable.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(growable.len() <= growable.capacity());
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut growable = Growable::new();
        for i in 0..5 {
            growable.push(i.to_string()).unwrap();
        }
        let capacity = growable.capacity();
        growable.clear();
        assert!(growable.is_empty());
        assert_eq!(growable.capacity(), capacity);

        growable.release();
        assert!(growable.is_empty());
        assert_eq!(growable.capacity(), 0);
    }

    #[test]
    fn test_equality_compares_corresponding_elements() {
        let mut lhs = Growable::new();
        let mut rhs = Growable::new();
        for c in ['a', 'b', 'c'] {
            lhs.push(c).unwrap();
        }
        for c in ['a', 'x', 'c'] {
            rhs.push(c).unwrap();
        }
        assert_ne!(lhs, rhs);

        let mut same = Growable::new();
        for c in ['a', 'b', 'c'] {
            same.push(c).unwrap();
        }
        assert_eq!(lhs, same);

        // Different capacities but the same elements are still equal.
        let mut wide = Growable::new();
        for c in ['a', 'b', 'c', 'd', 'e'] {
            wide.push(c).unwrap();
        }
        assert_ne!(lhs, wide);
        let mut shrunk: Growable<char> = Growable::new();
        for c in ['a', 'b', 'c'] {
            shrunk.push(c).unwrap();
        }
        wide.clear();
        for c in ['a', 'b', 'c'] {
            wide.push(c).unwrap();
        }
        assert_ne!(wide.capacity(), shrunk.capacity());
        assert_eq!(wide, shrunk);
    }
}
