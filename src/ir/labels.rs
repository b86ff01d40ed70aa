//! Insertion-ordered label inventory.

use std::collections::HashSet;

use super::model::Record;

/// The distinct class names of a dataset, in the order they were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelInventory {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl LabelInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the labels of `records` in first-occurrence order.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut inventory = Self::new();
        for record in records {
            inventory.insert(&record.label);
        }
        inventory
    }

    /// Adds a label. Returns true if it had not been seen before.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.seen.contains(label) {
            return false;
        }
        self.seen.insert(label.to_owned());
        self.order.push(label.to_owned());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.seen.contains(label)
    }

    /// Iterates labels in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}
