//! Insertion-ordered keyed rows

use std::collections::HashMap;

/// Rows keyed by a string, iterated in insertion order
///
/// Replacing an existing key keeps the row at its original position.
#[derive(Debug, Clone)]
pub(crate) struct OrderedTable<V> {
    rows: Vec<V>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedTable<V> {
    /// Build from loaded rows; a repeated key replaces the earlier row in place
    pub(crate) fn from_rows<F>(rows: Vec<V>, key: F) -> Self
    where
        F: Fn(&V) -> String,
    {
        let mut table = Self::default();
        for row in rows {
            let k = key(&row);
            table.upsert(k, row);
        }
        table
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.rows[i])
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace, returning the replaced row
    pub(crate) fn upsert(&mut self, key: String, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.rows[i], value)),
            None => {
                self.index.insert(key, self.rows.len());
                self.rows.push(value);
                None
            }
        }
    }

    /// Undo the most recent `upsert` of `key`
    pub(crate) fn revert(&mut self, key: &str, previous: Option<V>) {
        match previous {
            Some(old) => {
                if let Some(&i) = self.index.get(key) {
                    self.rows[i] = old;
                }
            }
            None => {
                // a fresh insert is always the last row
                if self.index.get(key) == Some(&(self.rows.len().saturating_sub(1))) {
                    self.index.remove(key);
                    self.rows.pop();
                }
            }
        }
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, V> {
        self.rows.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}
