use serde::Serialize;

/// An ordered collection that never drops below one entry.
///
/// Every repeating part of a quote (pages, features, nav items, price modules, terms…)
/// is an `Entries`. There is no way to build an empty one, and [`Entries::remove`]
/// refuses to take away the last remaining element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entries<T>(Vec<T>);

#[allow(clippy::len_without_is_empty)]
impl<T> Entries<T> {
    pub fn one(item: T) -> Self {
        Self(vec![item])
    }

    /// Returns `None` for an empty vector.
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    /// Whether an entry could be removed right now.
    pub fn can_remove(&self) -> bool {
        self.0.len() > 1
    }

    /// Removes the entry at `index`.
    ///
    /// Returns `false` (and leaves the collection untouched) when only one entry is
    /// left or the index is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        true
    }
}

impl<'a, T> IntoIterator for &'a Entries<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
