//! Mix lab: resolves the reagents in a virtual beaker to a canned outcome.

use catalog::{ExperimentDefinition, LabCatalog, ReactionKey, ReactionRule, MAX_REAGENTS};
use serde::Serialize;
use shared::{
    domain::{Animation, Quiz, ReagentId},
    protocol::Advisory,
};
use tracing::{debug, info};

pub const EMPTY_COLOR: &str = "transparent";
pub const NO_REACTION_COLOR: &str = "murky";
pub const NO_REACTION_TEXT: &str = "No visible reaction.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MixReaction {
    Empty,
    /// One reagent in the beaker and no single-reagent rule for it.
    Waiting,
    Matched { key: ReactionKey },
    NoReaction,
}

/// Snapshot of a beaker. Only the resolver produces non-empty states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixState {
    reagents: Vec<ReagentId>,
    reaction: MixReaction,
    color: String,
    animation: Option<Animation>,
    bubbles: bool,
    result_text: String,
    quiz: Option<Quiz>,
}

impl Default for MixState {
    fn default() -> Self {
        Self::empty()
    }
}

impl MixState {
    pub fn empty() -> Self {
        Self {
            reagents: Vec::new(),
            reaction: MixReaction::Empty,
            color: EMPTY_COLOR.to_string(),
            animation: None,
            bubbles: false,
            result_text: String::new(),
            quiz: None,
        }
    }

    /// Reagents in the order they were added.
    pub fn reagents(&self) -> &[ReagentId] {
        &self.reagents
    }

    pub fn reaction(&self) -> &MixReaction {
        &self.reaction
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn animation(&self) -> Option<Animation> {
        self.animation
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.reagents.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.reagents.len() >= MAX_REAGENTS
    }

    pub fn contains(&self, reagent_id: &ReagentId) -> bool {
        self.reagents.contains(reagent_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixUpdate {
    pub state: MixState,
    pub advisory: Option<Advisory>,
}

impl MixUpdate {
    fn unchanged(state: &MixState, advisory: Advisory) -> Self {
        debug!(advisory = ?advisory, "reagent rejected");
        Self {
            state: state.clone(),
            advisory: Some(advisory),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReagentMixResolver<'a> {
    catalog: &'a LabCatalog,
    palette: Option<&'a [ReagentId]>,
}

impl<'a> ReagentMixResolver<'a> {
    /// Resolver over every reagent in the catalog.
    pub fn new(catalog: &'a LabCatalog) -> Self {
        Self {
            catalog,
            palette: None,
        }
    }

    /// Resolver limited to the reagents an experiment puts on the bench.
    pub fn for_experiment(catalog: &'a LabCatalog, experiment: &'a ExperimentDefinition) -> Self {
        Self {
            catalog,
            palette: Some(experiment.palette.as_slice()),
        }
    }

    pub fn offers(&self, reagent_id: &ReagentId) -> bool {
        self.catalog.reagent(reagent_id).is_some()
            && self
                .palette
                .map_or(true, |palette| palette.contains(reagent_id))
    }

    pub fn add_reagent(&self, state: &MixState, reagent_id: &ReagentId) -> MixUpdate {
        if state.is_full() {
            return MixUpdate::unchanged(state, Advisory::CapacityReached { max: MAX_REAGENTS });
        }
        if !self.offers(reagent_id) {
            return MixUpdate::unchanged(
                state,
                Advisory::UnknownReagent {
                    reagent_id: reagent_id.clone(),
                },
            );
        }
        if state.contains(reagent_id) {
            return MixUpdate::unchanged(
                state,
                Advisory::DuplicateReagent {
                    reagent_id: reagent_id.clone(),
                },
            );
        }

        let mut reagents = state.reagents.clone();
        reagents.push(reagent_id.clone());
        debug!(reagent = %reagent_id, count = reagents.len(), "reagent added");

        MixUpdate {
            state: self.resolve(reagents),
            advisory: None,
        }
    }

    pub fn reset(&self) -> MixState {
        debug!("beaker reset");
        MixState::empty()
    }

    fn resolve(&self, reagents: Vec<ReagentId>) -> MixState {
        let key = ReactionKey::from_ids(&reagents);
        if let Some(rule) = self.catalog.reactions().lookup(&key) {
            info!(key = %key, "reaction matched");
            return matched(reagents, key, rule);
        }

        if let [only] = reagents.as_slice() {
            let (color, name) = self
                .catalog
                .reagent(only)
                .map(|reagent| (reagent.color.clone(), reagent.name.clone()))
                .unwrap_or_else(|| (EMPTY_COLOR.to_string(), only.to_string()));
            return MixState {
                reaction: MixReaction::Waiting,
                color,
                result_text: format!(
                    "{name} is in the beaker. Add another ingredient to see what happens."
                ),
                ..base(reagents)
            };
        }

        debug!(key = %key, "no reaction for combination");
        MixState {
            reaction: MixReaction::NoReaction,
            color: NO_REACTION_COLOR.to_string(),
            result_text: self.no_reaction_text(),
            ..base(reagents)
        }
    }

    fn no_reaction_text(&self) -> String {
        let hint = self
            .catalog
            .reactions()
            .suggestion(|reagent_id| self.offers(reagent_id))
            .map(|rule| {
                let names: Vec<&str> = rule
                    .key
                    .reagents()
                    .iter()
                    .filter_map(|id| self.catalog.reagent(id).map(|r| r.name.as_str()))
                    .collect();
                join_names(&names)
            });
        match hint {
            Some(names) => format!("{NO_REACTION_TEXT} Try mixing {names}."),
            None => NO_REACTION_TEXT.to_string(),
        }
    }
}

fn base(reagents: Vec<ReagentId>) -> MixState {
    MixState {
        reagents,
        ..MixState::empty()
    }
}

fn matched(reagents: Vec<ReagentId>, key: ReactionKey, rule: &ReactionRule) -> MixState {
    MixState {
        reagents,
        reaction: MixReaction::Matched { key },
        color: rule.color.clone(),
        animation: rule.animation,
        bubbles: rule.bubbles,
        result_text: rule.result_text.clone(),
        quiz: rule.quiz.clone(),
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
#[path = "tests/mix_tests.rs"]
mod tests;
