use icu_normalizer::ComposingNormalizer;

use crate::i18n::Locale;

/// Reply template chosen for a user utterance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseCategory {
    Explain,
    Example,
    Question,
    Default,
}

impl ResponseCategory {
    pub fn template_key(self) -> &'static str {
        match self {
            ResponseCategory::Explain => "responses.explain",
            ResponseCategory::Example => "responses.example",
            ResponseCategory::Question => "responses.question",
            ResponseCategory::Default => "responses.default",
        }
    }
}

const EXPLAIN_EN: &[&str] = &["explain"];
const EXAMPLE_EN: &[&str] = &["example"];
const QUESTION_EN: &[&str] = &["question", "questions"];

const EXPLAIN_HI: &[&str] = &["समझाएं", "समझाओ"];
const EXAMPLE_HI: &[&str] = &["उदाहरण"];
const QUESTION_HI: &[&str] = &["सवाल", "प्रश्न"];

const EXPLAIN_MR: &[&str] = &["समजावून", "समजवा"];
const EXAMPLE_MR: &[&str] = &["उदाहरण"];
const QUESTION_MR: &[&str] = &["प्रश्न", "सवाल"];

fn keywords(category: ResponseCategory, locale: Locale) -> (&'static [&'static str], &'static [&'static str]) {
    let extra: &[&str] = match (category, locale) {
        (ResponseCategory::Explain, Locale::Hi) => EXPLAIN_HI,
        (ResponseCategory::Explain, Locale::Mr) => EXPLAIN_MR,
        (ResponseCategory::Example, Locale::Hi) => EXAMPLE_HI,
        (ResponseCategory::Example, Locale::Mr) => EXAMPLE_MR,
        (ResponseCategory::Question, Locale::Hi) => QUESTION_HI,
        (ResponseCategory::Question, Locale::Mr) => QUESTION_MR,
        _ => &[],
    };
    let base: &[&str] = match category {
        ResponseCategory::Explain => EXPLAIN_EN,
        ResponseCategory::Example => EXAMPLE_EN,
        ResponseCategory::Question => QUESTION_EN,
        ResponseCategory::Default => &[],
    };
    (base, extra)
}

/// Pick a reply category by case-insensitive substring match against the
/// English keywords plus the locale's equivalents. Categories are tried in
/// a fixed priority order; the first hit wins regardless of where the
/// keyword sits in the input.
///
/// Input is NFC-normalized first so composed and decomposed Devanagari
/// spellings match the same keywords.
pub fn classify(text: &str, locale: Locale) -> ResponseCategory {
    let nfc = ComposingNormalizer::new_nfc();
    let normalized = nfc.normalize(text).to_lowercase();

    for category in [
        ResponseCategory::Explain,
        ResponseCategory::Example,
        ResponseCategory::Question,
    ] {
        let (base, extra) = keywords(category, locale);
        if base
            .iter()
            .chain(extra.iter())
            .any(|kw| normalized.contains(kw))
        {
            return category;
        }
    }
    ResponseCategory::Default
}
