/// Declared family relationships: siblings, cousins, grandparents.
use std::collections::HashSet;

use indexmap::IndexMap;

/// A sibling supplying both attributed segments and a personal match export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling {
    pub name: String,
    pub kit: String,
}

/// A cousin declared under exactly one grandparent lineage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cousin {
    pub name: String,
    pub kit: String,
    pub lineage: String,
}

/// Lookup table over the declared relatives.
///
/// Registration is first-wins: a name or kit seen twice keeps its original
/// entry. Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct Roster {
    siblings: IndexMap<String, Sibling>,
    sibling_kit_by_name: IndexMap<String, String>,
    cousins: IndexMap<String, Cousin>,
    grandparents: IndexMap<String, ()>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sibling(&mut self, name: &str, kit: &str) {
        if self.siblings.contains_key(kit) {
            return;
        }
        self.siblings.insert(
            kit.to_string(),
            Sibling {
                name: name.to_string(),
                kit: kit.to_string(),
            },
        );
        self.sibling_kit_by_name
            .entry(name.to_string())
            .or_insert_with(|| kit.to_string());
    }

    pub fn add_cousin(&mut self, name: &str, kit: &str, lineage: &str) {
        self.cousins.entry(kit.to_string()).or_insert(Cousin {
            name: name.to_string(),
            kit: kit.to_string(),
            lineage: lineage.to_string(),
        });
    }

    pub fn add_grandparent(&mut self, name: &str) {
        self.grandparents.entry(name.to_string()).or_insert(());
    }

    pub fn siblings(&self) -> impl Iterator<Item = &Sibling> {
        self.siblings.values()
    }

    pub fn cousins(&self) -> impl Iterator<Item = &Cousin> {
        self.cousins.values()
    }

    pub fn grandparent_names(&self) -> impl Iterator<Item = &str> {
        self.grandparents.keys().map(|n| n.as_str())
    }

    pub fn num_siblings(&self) -> usize {
        self.siblings.len()
    }

    pub fn num_cousins(&self) -> usize {
        self.cousins.len()
    }

    pub fn is_sibling_kit(&self, kit: &str) -> bool {
        self.siblings.contains_key(kit)
    }

    pub fn sibling_kit_for_name(&self, name: &str) -> Option<&str> {
        self.sibling_kit_by_name.get(name).map(|k| k.as_str())
    }

    /// The full sibling kit set used by the match grouper
    pub fn sibling_kits(&self) -> HashSet<String> {
        self.siblings.keys().cloned().collect()
    }

    /// Kits of cousins declared under any lineage other than `lineage`.
    ///
    /// Recomputed per lineage: a cousin is never excluded when their own
    /// lineage is the one being evaluated.
    pub fn excluded_kits(&self, lineage: &str) -> HashSet<String> {
        self.cousins
            .values()
            .filter(|c| c.lineage != lineage)
            .map(|c| c.kit.clone())
            .collect()
    }
}
