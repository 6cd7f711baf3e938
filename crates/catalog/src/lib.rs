//! Static lab configuration: reagents, reaction rules and guided experiments.

use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{ActionId, Animation, ContentTag, ExperimentId, Quiz, Reagent, ReagentId};
use tracing::debug;

mod error;
mod experiment;
mod reaction;

pub use error::CatalogError;
pub use experiment::{progress_percent, ExperimentDefinition, ExperimentStep};
pub use reaction::{ReactionKey, ReactionRule, ReactionTable, MAX_REAGENTS};

const BUILTIN_CATALOG: &str = include_str!("../data/fun_lab.toml");
const DEFAULT_INITIAL_CONTENT: &str = "empty";

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    reagents: Vec<Reagent>,
    #[serde(default)]
    reactions: Vec<RawReaction>,
    #[serde(default)]
    experiments: Vec<RawExperiment>,
}

#[derive(Debug, Deserialize)]
struct RawReaction {
    reagents: Vec<ReagentId>,
    color: String,
    #[serde(default)]
    animation: Option<Animation>,
    #[serde(default)]
    bubbles: bool,
    result: String,
    #[serde(default)]
    quiz: Option<Quiz>,
}

#[derive(Debug, Deserialize)]
struct RawExperiment {
    id: ExperimentId,
    title: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    storyline: String,
    #[serde(default)]
    materials: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    palette: Vec<ReagentId>,
    #[serde(default)]
    initial_content: Option<ContentTag>,
    #[serde(default)]
    steps: Vec<RawStep>,
    #[serde(default)]
    result: String,
    #[serde(default)]
    quiz: Option<Quiz>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    action: ActionId,
    label: String,
    content: ContentTag,
}

#[derive(Debug, Clone)]
pub struct LabCatalog {
    reagents: Vec<Reagent>,
    reagent_index: HashMap<ReagentId, usize>,
    reactions: ReactionTable,
    experiments: Vec<ExperimentDefinition>,
}

impl LabCatalog {
    /// The Fun Lab catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(raw)?;
        let catalog = Self::from_raw(raw)?;
        debug!(
            reagents = catalog.reagents.len(),
            reactions = catalog.reactions.len(),
            experiments = catalog.experiments.len(),
            "lab catalog loaded"
        );
        Ok(catalog)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        let mut reagent_index = HashMap::with_capacity(raw.reagents.len());
        for (position, reagent) in raw.reagents.iter().enumerate() {
            if reagent_index.insert(reagent.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateReagent(reagent.id.clone()));
            }
        }

        let mut rules = Vec::with_capacity(raw.reactions.len());
        for (index, reaction) in raw.reactions.into_iter().enumerate() {
            let actual = reaction.reagents.len();
            if actual == 0 || actual > MAX_REAGENTS {
                return Err(CatalogError::RuleArity {
                    index,
                    max: MAX_REAGENTS,
                    actual,
                });
            }
            for (pos, reagent_id) in reaction.reagents.iter().enumerate() {
                if !reagent_index.contains_key(reagent_id) {
                    return Err(CatalogError::UnknownRuleReagent {
                        index,
                        reagent_id: reagent_id.clone(),
                    });
                }
                if reaction.reagents[..pos].contains(reagent_id) {
                    return Err(CatalogError::RepeatedRuleReagent {
                        index,
                        reagent_id: reagent_id.clone(),
                    });
                }
            }
            if let Some(quiz) = &reaction.quiz {
                validate_quiz(quiz)?;
            }
            rules.push(ReactionRule {
                key: ReactionKey::from_ids(&reaction.reagents),
                color: reaction.color,
                animation: reaction.animation,
                bubbles: reaction.bubbles,
                result_text: reaction.result,
                quiz: reaction.quiz,
            });
        }
        let reactions = ReactionTable::new(rules)?;

        let mut experiments: Vec<ExperimentDefinition> =
            Vec::with_capacity(raw.experiments.len());
        for experiment in raw.experiments {
            if experiments.iter().any(|known| known.id == experiment.id) {
                return Err(CatalogError::DuplicateExperiment(experiment.id));
            }
            experiments.push(build_experiment(experiment, &reagent_index)?);
        }

        Ok(Self {
            reagents: raw.reagents,
            reagent_index,
            reactions,
            experiments,
        })
    }

    pub fn reagents(&self) -> &[Reagent] {
        &self.reagents
    }

    pub fn reagent(&self, id: &ReagentId) -> Option<&Reagent> {
        self.reagent_index
            .get(id)
            .map(|&position| &self.reagents[position])
    }

    /// Resolves user input against reagent ids first, then display names.
    pub fn find_reagent(&self, query: &str) -> Option<&Reagent> {
        let query = query.trim();
        self.reagent(&ReagentId::new(query)).or_else(|| {
            self.reagents
                .iter()
                .find(|reagent| reagent.name.eq_ignore_ascii_case(query))
        })
    }

    pub fn reactions(&self) -> &ReactionTable {
        &self.reactions
    }

    pub fn experiments(&self) -> &[ExperimentDefinition] {
        &self.experiments
    }

    pub fn experiment(&self, id: &ExperimentId) -> Option<&ExperimentDefinition> {
        self.experiments.iter().find(|experiment| &experiment.id == id)
    }
}

fn build_experiment(
    raw: RawExperiment,
    reagent_index: &HashMap<ReagentId, usize>,
) -> Result<ExperimentDefinition, CatalogError> {
    if raw.palette.is_empty() && raw.steps.is_empty() {
        return Err(CatalogError::EmptyExperiment(raw.id));
    }
    if let Some(unknown) = raw
        .palette
        .iter()
        .find(|reagent_id| !reagent_index.contains_key(*reagent_id))
    {
        return Err(CatalogError::UnknownPaletteReagent {
            experiment: raw.id.clone(),
            reagent_id: unknown.clone(),
        });
    }
    for (pos, step) in raw.steps.iter().enumerate() {
        if raw.steps[..pos].iter().any(|prior| prior.action == step.action) {
            return Err(CatalogError::DuplicateStepAction {
                experiment: raw.id.clone(),
                action: step.action.clone(),
            });
        }
    }
    if let Some(quiz) = &raw.quiz {
        validate_quiz(quiz)?;
    }

    let steps = ExperimentStep::sequence(
        raw.steps
            .into_iter()
            .map(|step| (step.action, step.label, step.content))
            .collect(),
    );

    Ok(ExperimentDefinition {
        id: raw.id,
        title: raw.title,
        subject: raw.subject,
        storyline: raw.storyline,
        materials: raw.materials,
        instructions: raw.instructions,
        palette: raw.palette,
        initial_content: raw
            .initial_content
            .unwrap_or_else(|| ContentTag::new(DEFAULT_INITIAL_CONTENT)),
        steps,
        result_text: raw.result,
        quiz: raw.quiz,
    })
}

fn validate_quiz(quiz: &Quiz) -> Result<(), CatalogError> {
    if quiz.correct_option >= quiz.options.len() {
        return Err(CatalogError::QuizOutOfRange {
            question: quiz.question.clone(),
            correct_option: quiz.correct_option,
            options: quiz.options.len(),
        });
    }
    Ok(())
}

pub fn load_catalog(path: &Path) -> anyhow::Result<LabCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog '{}'", path.display()))?;
    LabCatalog::from_toml_str(&raw)
        .with_context(|| format!("invalid catalog '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
