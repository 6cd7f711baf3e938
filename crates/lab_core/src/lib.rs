//! Fun Lab core: reagent mixing, guided experiments and the screen that hosts them.

pub mod goals;
pub mod mix;
pub mod progress;
pub mod puzzle;
pub mod review;
pub mod screen;
pub mod stepper;

pub use goals::{Goal, GoalBoard};
pub use mix::{MixReaction, MixState, MixUpdate, ReagentMixResolver};
pub use progress::{ParentSummary, SubjectProgress};
pub use puzzle::{MathPuzzle, PuzzleDeck, PuzzleVerdict};
pub use review::{CompletedQuiz, QuizReview, ReviewQuestion};
pub use screen::{ExperimentScreen, ScreenEvent};
pub use stepper::{GuidedExperimentStepper, StepTransition, StepUpdate, StepperState};
