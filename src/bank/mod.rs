pub mod builtin;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// Canonical topic identifiers. Display labels come from the translation
/// catalog (`quiz.topics.<id>`); the bank is addressed by the id so a
/// locale switch never invalidates the selected topic.
pub const TOPICS: [&str; 6] = [
    "math",
    "fractions",
    "science",
    "plants",
    "electricity",
    "english",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Difficulty::Easy => "quiz.difficulties.easy",
            Difficulty::Medium => "quiz.difficulties.medium",
            Difficulty::Hard => "quiz.difficulties.hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// One multiple-choice question as returned by a bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl Question {
    /// At least two options and an in-bounds answer index.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.correct < self.options.len()
    }
}

/// Quiz content supplier. The builtin bank is embedded content; a future
/// backend would implement the same trait.
pub trait QuestionSource {
    fn fetch(&mut self, topic: &str, difficulty: Difficulty, locale: Locale) -> Result<Vec<Question>>;
}
