use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

impl Goal {
    pub fn new(id: u32, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalBoard {
    goals: Vec<Goal>,
    streak_days: u32,
}

impl GoalBoard {
    pub fn new(goals: Vec<Goal>, streak_days: u32) -> Self {
        Self { goals, streak_days }
    }

    pub fn sample() -> Self {
        Self::new(
            vec![
                Goal::new(1, "Complete 2 video lessons", true),
                Goal::new(2, "Solve 5 math problems", true),
                Goal::new(3, "Take chemistry quiz", false),
                Goal::new(4, "Review biology notes", false),
            ],
            7,
        )
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    /// Flips a goal's completion. Returns false for unknown ids.
    pub fn toggle(&mut self, id: u32) -> bool {
        match self.goals.iter_mut().find(|goal| goal.id == id) {
            Some(goal) => {
                goal.completed = !goal.completed;
                true
            }
            None => false,
        }
    }

    /// Toggles each id in order and returns the ids that matched no goal.
    pub fn toggle_all(&mut self, ids: impl IntoIterator<Item = u32>) -> Vec<u32> {
        ids.into_iter().filter(|&id| !self.toggle(id)).collect()
    }

    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|goal| goal.completed).count()
    }

    pub fn progress_percent(&self) -> f64 {
        if self.goals.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.goals.len() as f64 * 100.0
    }
}
