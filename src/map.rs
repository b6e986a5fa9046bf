//! A map of String to nanojson::Value.
//!
//! The map is backed by a contiguous vector of members in insertion order.
//! Lookups scan linearly and act on the first matching key, so a map built
//! with duplicate keys (which the parser allows) keeps the later occurrences
//! reachable by index even though keyed lookups always see the first.

use crate::value::Value;
use core::fmt::{self, Debug};
use core::iter::FusedIterator;
use core::ops;
use core::slice;
use std::vec;

/// Represents a JSON key/value type.
#[derive(Clone, Default)]
pub struct Map<K = String, V = Value> {
    members: Vec<(K, V)>,
}

impl Map<String, Value> {
    /// Makes a new empty Map.
    #[inline]
    pub fn new() -> Self {
        Map {
            members: Vec::new(),
        }
    }

    /// Makes a new empty Map with the given initial capacity.
    ///
    /// A capacity of zero allocates nothing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Map {
            members: Vec::with_capacity(capacity),
        }
    }

    /// Clears the map, removing all members. Capacity is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Returns the number of members the map can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.members.capacity()
    }

    /// Reserves capacity for at least `additional` more members. Never
    /// shrinks.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.members.reserve(additional);
    }

    /// Shrinks the backing storage down to exactly the current length.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.members.shrink_to_fit();
    }

    /// Returns a reference to the value of the first member with the given
    /// key, comparing length and then bytes.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index_of(key).map(|i| &self.members[i].1)
    }

    /// Returns a mutable reference to the value of the first member with the
    /// given key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self.index_of(key) {
            Some(i) => Some(&mut self.members[i].1),
            None => None,
        }
    }

    /// Returns the first key-value pair matching the given key.
    pub fn get_key_value(&self, key: &str) -> Option<(&String, &Value)> {
        self.index_of(key).map(|i| {
            let (k, v) = &self.members[i];
            (k, v)
        })
    }

    /// Returns true if the map contains a member with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Position of the first member with the given key, or `None` when
    /// absent. Linear scan, O(n) by design.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.members.iter().position(|(k, _)| k == key)
    }

    /// The member at `index` in iteration order.
    pub fn get_index(&self, index: usize) -> Option<(&String, &Value)> {
        self.members.get(index).map(|(k, v)| (k, v))
    }

    /// The member at `index`, with the value mutable.
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&String, &mut Value)> {
        self.members.get_mut(index).map(|(k, v)| (&*k, v))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, the member is appended and
    /// `None` is returned. If it did, the first matching member's value is
    /// replaced and the old value is returned.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.index_of(&key) {
            Some(i) => Some(core::mem::replace(&mut self.members[i].1, value)),
            None => {
                self.members.push((key, value));
                None
            }
        }
    }

    /// Removes the first member with the given key, returning its value.
    ///
    /// Like [`Vec::swap_remove`], the member is removed by swapping it with
    /// the last member and popping it off. This perturbs the position of
    /// what used to be the last member; removal is O(1) at the cost of
    /// iteration order.
    pub fn swap_remove(&mut self, key: &str) -> Option<Value> {
        self.index_of(key)
            .map(|i| self.members.swap_remove(i).1)
    }

    /// Removes and returns the member at `index` by swapping it with the
    /// last member. See [`swap_remove`](Map::swap_remove) for the ordering
    /// trade-off.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn swap_remove_index(&mut self, index: usize) -> (String, Value) {
        self.members.swap_remove(index)
    }

    /// Removes the first member with the given key. Alias for
    /// [`swap_remove`](Map::swap_remove); keyed removal does not preserve
    /// iteration order.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.swap_remove(key)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    pub fn entry<S>(&mut self, key: S) -> Entry
    where
        S: Into<String>,
    {
        let key = key.into();
        match self.index_of(&key) {
            Some(index) => Entry::Occupied(OccupiedEntry { map: self, index }),
            None => Entry::Vacant(VacantEntry { map: self, key }),
        }
    }

    /// Returns the number of members in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the map contains no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Gets an iterator over the members of the map.
    #[inline]
    pub fn iter(&self) -> Iter {
        Iter {
            iter: self.members.iter(),
        }
    }

    /// Gets a mutable iterator over the members of the map.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut {
        IterMut {
            iter: self.members.iter_mut(),
        }
    }

    /// Gets an iterator over the keys of the map.
    #[inline]
    pub fn keys(&self) -> Keys {
        Keys {
            iter: self.members.iter(),
        }
    }

    /// Gets an iterator over the values of the map.
    #[inline]
    pub fn values(&self) -> Values {
        Values {
            iter: self.members.iter(),
        }
    }

    /// Gets an iterator over mutable values of the map.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut {
        ValuesMut {
            iter: self.members.iter_mut(),
        }
    }
}

/// Structural equality: the maps hold the same members, in any order.
/// Each member of `self` is matched against a distinct member of `other`,
/// so repeated keys must appear with the same multiplicity on both sides.
/// O(n^2) given the linear scan.
impl PartialEq for Map<String, Value> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut claimed = vec![false; other.len()];
        self.iter().all(|(key, value)| {
            other
                .members
                .iter()
                .zip(claimed.iter_mut())
                .any(|((other_key, other_value), claim)| {
                    if !*claim && other_key == key && other_value == value {
                        *claim = true;
                        true
                    } else {
                        false
                    }
                })
        })
    }
}

/// Access a value by key, panicking if the key is not present.
impl<'a> ops::Index<&'a str> for Map<String, Value> {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).expect("no entry found for key")
    }
}

/// Mutably access a value by key, panicking if the key is not present.
impl<'a> ops::IndexMut<&'a str> for Map<String, Value> {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.get_mut(key).expect("no entry found for key")
    }
}

impl Debug for Map<String, Value> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Builds a map from members in order, keeping duplicate keys. This is how
/// the parser materializes objects: later occurrences of a key coexist with
/// earlier ones rather than replacing them.
impl From<Vec<(String, Value)>> for Map<String, Value> {
    fn from(members: Vec<(String, Value)>) -> Self {
        Map { members }
    }
}

impl FromIterator<(String, Value)> for Map<String, Value> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (String, Value)>,
    {
        Map {
            members: iter.into_iter().collect(),
        }
    }
}

/// Appends members in order; duplicate keys are not collapsed.
impl Extend<(String, Value)> for Map<String, Value> {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (String, Value)>,
    {
        self.members.extend(iter);
    }
}

//////////////////////////////////////////////////////////////////////////////

/// A view into a single entry in a map, which may either be vacant or
/// occupied. This enum is constructed from the [`entry`](Map::entry) method.
pub enum Entry<'a> {
    /// A vacant Entry.
    Vacant(VacantEntry<'a>),
    /// An occupied Entry.
    Occupied(OccupiedEntry<'a>),
}

/// A vacant Entry.
pub struct VacantEntry<'a> {
    map: &'a mut Map<String, Value>,
    key: String,
}

/// An occupied Entry.
pub struct OccupiedEntry<'a> {
    map: &'a mut Map<String, Value>,
    index: usize,
}

impl<'a> Entry<'a> {
    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &String {
        match self {
            Entry::Vacant(e) => &e.key,
            Entry::Occupied(e) => &e.map.members[e.index].0,
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty,
    /// and returns a mutable reference to the value.
    pub fn or_insert(self, default: Value) -> &'a mut Value {
        match self {
            Entry::Vacant(entry) => entry.insert(default),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the
    /// default function if empty, and returns a mutable reference to the
    /// value.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut Value
    where
        F: FnOnce() -> Value,
    {
        match self {
            Entry::Vacant(entry) => entry.insert(default()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }
}

impl<'a> VacantEntry<'a> {
    /// Gets a reference to the key that would be used when inserting a
    /// value through the VacantEntry.
    pub fn key(&self) -> &String {
        &self.key
    }

    /// Appends a member with the entry's key and the given value, and
    /// returns a mutable reference to the value.
    pub fn insert(self, value: Value) -> &'a mut Value {
        self.map.members.push((self.key, value));
        let last = self.map.members.len() - 1;
        &mut self.map.members[last].1
    }
}

impl<'a> OccupiedEntry<'a> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &Value {
        &self.map.members[self.index].1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut Value {
        &mut self.map.members[self.index].1
    }

    /// Converts the entry into a mutable reference to its value.
    pub fn into_mut(self) -> &'a mut Value {
        &mut self.map.members[self.index].1
    }

    /// Replaces the value in the entry, returning the old value.
    pub fn insert(&mut self, value: Value) -> Value {
        core::mem::replace(self.get_mut(), value)
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> IntoIterator for &'a Map<String, Value> {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over a nanojson::Map's entries.
pub struct Iter<'a> {
    iter: slice::Iter<'a, (String, Value)>,
}

fn map_entry<K, V>(entry: &(K, V)) -> (&K, &V) {
    (&entry.0, &entry.1)
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a String, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(map_entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(map_entry)
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a mut Map<String, Value> {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = IterMut<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A mutable iterator over a nanojson::Map's entries.
pub struct IterMut<'a> {
    iter: slice::IterMut<'a, (String, Value)>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a String, &'a mut Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, v)| (&*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for IterMut<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<'a> ExactSizeIterator for IterMut<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> FusedIterator for IterMut<'a> {}

impl IntoIterator for Map<String, Value> {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.members.into_iter(),
        }
    }
}

/// An owning iterator over a nanojson::Map's entries.
pub struct IntoIter {
    iter: vec::IntoIter<(String, Value)>,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for IntoIter {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl FusedIterator for IntoIter {}

/// An iterator over a nanojson::Map's keys.
pub struct Keys<'a> {
    iter: slice::Iter<'a, (String, Value)>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a String;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Keys<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<'a> ExactSizeIterator for Keys<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> FusedIterator for Keys<'a> {}

/// An iterator over a nanojson::Map's values.
pub struct Values<'a> {
    iter: slice::Iter<'a, (String, Value)>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Values<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<'a> ExactSizeIterator for Values<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> FusedIterator for Values<'a> {}

/// A mutable iterator over a nanojson::Map's values.
pub struct ValuesMut<'a> {
    iter: slice::IterMut<'a, (String, Value)>,
}

impl<'a> Iterator for ValuesMut<'a> {
    type Item = &'a mut Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for ValuesMut<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<'a> ExactSizeIterator for ValuesMut<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> FusedIterator for ValuesMut<'a> {}

#[cfg(test)]
mod tests {
    use super::Map;
    use crate::value::Value;

    #[test]
    fn insert_replaces_first_match_only() {
        let mut map: Map = vec![
            (String::from("a"), Value::from(1.0)),
            (String::from("a"), Value::from(2.0)),
        ]
        .into();
        assert_eq!(map.len(), 2);
        assert_eq!(map.insert(String::from("a"), Value::from(3.0)), Some(Value::from(1.0)));
        assert_eq!(map.get_index(1), Some((&String::from("a"), &Value::from(2.0))));
    }

    #[test]
    fn entry_reuses_first_match() {
        let mut map = Map::new();
        map.entry("k").or_insert(Value::from("v"));
        assert_eq!(map.index_of("k"), Some(0));
        *map.entry("k").or_insert(Value::Null) = Value::from(true);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&Value::Bool(true)));
    }

    #[test]
    fn swap_remove_moves_last_member_into_hole() {
        let mut map = Map::new();
        map.insert(String::from("a"), Value::from(1.0));
        map.insert(String::from("b"), Value::from(2.0));
        map.insert(String::from("c"), Value::from(3.0));
        assert_eq!(map.swap_remove("a"), Some(Value::from(1.0)));
        assert_eq!(map.get_index(0), Some((&String::from("c"), &Value::from(3.0))));
        assert_eq!(map.len(), 2);
        assert_eq!(map.index_of("a"), None);
    }

    #[test]
    fn equality_ignores_member_order() {
        let left: Map = vec![
            (String::from("x"), Value::from(1.0)),
            (String::from("y"), Value::from(2.0)),
        ]
        .into();
        let right: Map = vec![
            (String::from("y"), Value::from(2.0)),
            (String::from("x"), Value::from(1.0)),
        ]
        .into();
        assert_eq!(left, right);

        let shorter: Map = vec![(String::from("x"), Value::from(1.0))].into();
        assert_ne!(left, shorter);
    }

    #[test]
    fn equality_matches_repeated_keys_by_multiplicity() {
        let repeated: Map = vec![
            (String::from("k"), Value::from(1.0)),
            (String::from("k"), Value::from(2.0)),
        ]
        .into();
        assert_eq!(repeated, repeated.clone());

        let reordered: Map = vec![
            (String::from("k"), Value::from(2.0)),
            (String::from("k"), Value::from(1.0)),
        ]
        .into();
        assert_eq!(repeated, reordered);

        // Both sides have two members keyed "k", but the values pair up
        // only if each match consumes a distinct member.
        let doubled: Map = vec![
            (String::from("k"), Value::from(1.0)),
            (String::from("k"), Value::from(1.0)),
        ]
        .into();
        assert_ne!(repeated, doubled);
    }
}
