use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ReagentId);
id_newtype!(ActionId);
id_newtype!(ExperimentId);
id_newtype!(ContentTag);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reagent {
    pub id: ReagentId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animation {
    Fizz,
    Curdle,
    Swirl,
    Foam,
    Glow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVerdict {
    Correct,
    Incorrect { correct_option: usize },
    InvalidChoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: usize,
}

impl Quiz {
    /// Grades a zero-based option index.
    pub fn grade(&self, choice: usize) -> QuizVerdict {
        if choice >= self.options.len() {
            QuizVerdict::InvalidChoice
        } else if choice == self.correct_option {
            QuizVerdict::Correct
        } else {
            QuizVerdict::Incorrect {
                correct_option: self.correct_option,
            }
        }
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_option).map(String::as_str)
    }
}
