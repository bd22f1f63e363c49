use std::collections::HashSet;

/// Insertion-ordered set of field names.
///
/// The first insert of a key fixes its position; column order is derived
/// from this, so iteration order is part of the contract.
#[derive(Debug, Clone, Default)]
pub struct OrderedKeySet {
    keys: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the key was already present
    pub fn insert(&mut self, key: &str) -> bool {
        if self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.to_string());
        self.keys.push(key.to_string());
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.keys
    }
}

impl FromIterator<String> for OrderedKeySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(&key);
        }
        set
    }
}
