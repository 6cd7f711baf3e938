use std::{collections::HashMap, fmt};

use serde::Serialize;
use shared::domain::{Animation, Quiz, ReagentId};

use crate::error::CatalogError;

/// Most reagents a beaker (and therefore a rule) may hold.
pub const MAX_REAGENTS: usize = 3;

/// Order-independent lookup key: sorted, deduplicated reagent ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReactionKey(Vec<ReagentId>);

impl ReactionKey {
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a ReagentId>) -> Self {
        ids.into_iter().cloned().collect()
    }

    pub fn reagents(&self) -> &[ReagentId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ReagentId> for ReactionKey {
    fn from_iter<I: IntoIterator<Item = ReagentId>>(iter: I) -> Self {
        let mut ids: Vec<ReagentId> = iter.into_iter().collect();
        ids.sort();
        ids.dedup();
        Self(ids)
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, id) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" + ")?;
            }
            f.write_str(id.as_str())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionRule {
    pub key: ReactionKey,
    pub color: String,
    pub animation: Option<Animation>,
    pub bubbles: bool,
    pub result_text: String,
    pub quiz: Option<Quiz>,
}

/// Static rule table. Keeps declaration order for hints and listings.
#[derive(Debug, Clone, Default)]
pub struct ReactionTable {
    rules: Vec<ReactionRule>,
    index: HashMap<ReactionKey, usize>,
}

impl ReactionTable {
    pub fn new(rules: Vec<ReactionRule>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(rules.len());
        for (position, rule) in rules.iter().enumerate() {
            if index.insert(rule.key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateRule {
                    key: rule.key.to_string(),
                });
            }
        }
        Ok(Self { rules, index })
    }

    /// Exact-match lookup; no partial or subset matching.
    pub fn lookup(&self, key: &ReactionKey) -> Option<&ReactionRule> {
        self.index.get(key).map(|&position| &self.rules[position])
    }

    /// First declared rule whose reagents all pass `available`.
    pub fn suggestion(&self, available: impl Fn(&ReagentId) -> bool) -> Option<&ReactionRule> {
        self.rules
            .iter()
            .find(|rule| rule.key.len() > 1 && rule.key.reagents().iter().all(&available))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReactionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(ids: &[&str]) -> ReactionRule {
        ReactionRule {
            key: ids.iter().map(|id| ReagentId::new(*id)).collect(),
            color: "pink-ish".into(),
            animation: Some(Animation::Fizz),
            bubbles: true,
            result_text: "CO2".into(),
            quiz: None,
        }
    }

    #[test]
    fn key_ignores_insertion_order_and_repeats() {
        let a: ReactionKey = ["vinegar", "baking-soda"]
            .into_iter()
            .map(ReagentId::new)
            .collect();
        let b: ReactionKey = ["baking-soda", "vinegar", "vinegar"]
            .into_iter()
            .map(ReagentId::new)
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "baking-soda + vinegar");
    }

    #[test]
    fn table_rejects_duplicate_combinations() {
        let err = ReactionTable::new(vec![
            rule(&["vinegar", "baking-soda"]),
            rule(&["baking-soda", "vinegar"]),
        ])
        .expect_err("duplicate key");
        assert!(matches!(err, CatalogError::DuplicateRule { .. }));
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let table = ReactionTable::new(vec![rule(&["baking-soda", "vinegar"])]).expect("table");
        let subset: ReactionKey = [ReagentId::new("vinegar")].into_iter().collect();
        let superset: ReactionKey = ["baking-soda", "vinegar", "milk"]
            .into_iter()
            .map(ReagentId::new)
            .collect();
        assert!(table.lookup(&subset).is_none());
        assert!(table.lookup(&superset).is_none());
    }

    #[test]
    fn suggestion_respects_availability() {
        let table = ReactionTable::new(vec![
            rule(&["baking-soda", "vinegar"]),
            rule(&["milk", "vinegar"]),
        ])
        .expect("table");
        let hint = table
            .suggestion(|id| id.as_str() != "baking-soda")
            .expect("hint");
        assert_eq!(hint.key.to_string(), "milk + vinegar");
    }
}
