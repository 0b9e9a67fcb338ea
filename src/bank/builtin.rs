use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::bank::{Difficulty, Question, QuestionSource};
use crate::i18n::Locale;

const QUESTIONS_EN: &str = include_str!("../../assets/questions-en.json");
const QUESTIONS_HI: &str = include_str!("../../assets/questions-hi.json");
const QUESTIONS_MR: &str = include_str!("../../assets/questions-mr.json");

#[derive(Debug, Deserialize)]
struct BankEntry {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    difficulty: Difficulty,
}

type TopicTable = HashMap<String, Vec<BankEntry>>;

/// Embedded stand-in for the future question-bank backend. Localized
/// tables may cover only some topics; anything missing falls back to the
/// English table.
pub struct BuiltinBank {
    tables: HashMap<Locale, TopicTable>,
    question_count: usize,
    rng: SmallRng,
}

impl BuiltinBank {
    pub fn load(question_count: usize) -> Result<Self> {
        let mut tables = HashMap::new();
        for (locale, raw) in [
            (Locale::En, QUESTIONS_EN),
            (Locale::Hi, QUESTIONS_HI),
            (Locale::Mr, QUESTIONS_MR),
        ] {
            let table: TopicTable = serde_json::from_str(raw)
                .with_context(|| format!("parsing bundled questions for {}", locale.as_str()))?;
            tables.insert(locale, table);
        }
        Ok(Self {
            tables,
            question_count,
            rng: SmallRng::from_entropy(),
        })
    }

    pub fn set_question_count(&mut self, question_count: usize) {
        self.question_count = question_count;
    }

    fn entries(&self, topic: &str, locale: Locale) -> Result<&[BankEntry]> {
        if let Some(entries) = self.tables.get(&locale).and_then(|t| t.get(topic)) {
            return Ok(entries);
        }
        if let Some(entries) = self.tables.get(&Locale::En).and_then(|t| t.get(topic)) {
            return Ok(entries);
        }
        bail!("unknown topic: {topic}")
    }
}

impl QuestionSource for BuiltinBank {
    fn fetch(&mut self, topic: &str, difficulty: Difficulty, locale: Locale) -> Result<Vec<Question>> {
        let pool: Vec<Question> = self
            .entries(topic, locale)?
            .iter()
            .filter(|entry| entry.difficulty == difficulty)
            .map(|entry| Question {
                prompt: entry.prompt.clone(),
                options: entry.options.clone(),
                correct: entry.correct,
            })
            .collect();

        let picked: Vec<Question> = pool
            .choose_multiple(&mut self.rng, self.question_count)
            .cloned()
            .collect();

        Ok(picked
            .into_iter()
            .map(|q| shuffle_options(q, &mut self.rng))
            .collect())
    }
}

/// Reorder a question's options, keeping `correct` pointed at the same
/// answer text.
fn shuffle_options(question: Question, rng: &mut SmallRng) -> Question {
    let mut indexed: Vec<(usize, String)> = question.options.into_iter().enumerate().collect();
    indexed.shuffle(rng);

    let mut options = Vec::with_capacity(indexed.len());
    let mut correct = 0;
    for (new_idx, (old_idx, text)) in indexed.into_iter().enumerate() {
        if old_idx == question.correct {
            correct = new_idx;
        }
        options.push(text);
    }

    Question {
        prompt: question.prompt,
        options,
        correct,
    }
}
