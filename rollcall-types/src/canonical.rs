//! Canonical ordering for team and area identifiers.
//!
//! Rollups emit one row per canonical id in the configured order, independent
//! of how students happen to be ordered in the roster. The order is supplied by
//! configuration; it is neither alphabetical nor insertion order of the roster.

use std::collections::{HashMap, HashSet};

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize};

/// Ordered list of group ids with cached positions for stable sort keys.
///
/// Duplicates are dropped, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalOrder {
    ids: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl CanonicalOrder {
    /// Build an order from a list of ids.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for id in ids {
            let id = id.into();
            if seen.insert(id.clone()) {
                values.push(id);
            }
        }

        let ranks = values
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        Self { ids: values, ranks }
    }

    /// Borrow the ids in canonical order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Position of `id` in the order, if it is canonical.
    #[must_use]
    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// True if `id` is part of the order.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ranks.contains_key(id)
    }

    /// Number of canonical ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no ids are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CanonicalOrder {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Serialize for CanonicalOrder {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for id in &self.ids {
            seq.serialize_element(id)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for CanonicalOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OrderVisitor;
        impl<'de> Visitor<'de> for OrderVisitor {
            type Value = CanonicalOrder;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a sequence of group ids")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut vals: Vec<String> = Vec::new();
                while let Some(elem) = seq.next_element::<String>()? {
                    vals.push(elem);
                }
                Ok(CanonicalOrder::new(vals))
            }
        }
        deserializer.deserialize_seq(OrderVisitor)
    }
}
