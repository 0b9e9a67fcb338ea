use thiserror::Error;

use crate::bank::{Difficulty, Question, QuestionSource};
use crate::connectivity::ConnectivityMonitor;
use crate::i18n::Locale;

/// Selections the generator runs against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub topic: Option<String>,
    pub difficulty: Difficulty,
    pub locale: Locale,
}

/// A generated test together with the configuration that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTest {
    pub config: QuizConfig,
    pub questions: Vec<Question>,
}

#[derive(Debug)]
pub enum QuizPhase {
    Configuring,
    Presenting(GeneratedTest),
}

/// Wrong-state and bad-input calls signal instead of silently no-oping;
/// a silent no-op would hide caller bugs behind an unchanged screen.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no topic selected")]
    MissingTopic,
    #[error("topic cannot be empty")]
    EmptyTopic,
    #[error("cannot change the configuration while a test is shown")]
    NotConfiguring,
    #[error("no generated test to discard")]
    NotPresenting,
    #[error("cannot generate a test while offline")]
    Offline,
    #[error("question {index} from the bank is malformed")]
    MalformedQuestion { index: usize },
    #[error(transparent)]
    Bank(#[from] anyhow::Error),
}

/// Two-state configure/present flow behind the practice-test screen.
pub struct QuizSession {
    topic: Option<String>,
    difficulty: Difficulty,
    locale: Locale,
    net: ConnectivityMonitor,
    phase: QuizPhase,
}

impl QuizSession {
    pub fn new(locale: Locale, net: ConnectivityMonitor) -> Self {
        Self {
            topic: None,
            difficulty: Difficulty::default(),
            locale,
            net,
            phase: QuizPhase::Configuring,
        }
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self.phase, QuizPhase::Presenting(_))
    }

    pub fn current_test(&self) -> Option<&GeneratedTest> {
        match &self.phase {
            QuizPhase::Presenting(test) => Some(test),
            QuizPhase::Configuring => None,
        }
    }

    fn ensure_configuring(&self) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Configuring => Ok(()),
            QuizPhase::Presenting(_) => Err(QuizError::NotConfiguring),
        }
    }

    pub fn set_topic(&mut self, topic: &str) -> Result<(), QuizError> {
        self.ensure_configuring()?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuizError::EmptyTopic);
        }
        self.topic = Some(topic.to_string());
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), QuizError> {
        self.ensure_configuring()?;
        self.difficulty = difficulty;
        Ok(())
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<(), QuizError> {
        self.ensure_configuring()?;
        self.locale = locale;
        Ok(())
    }

    /// Fetch questions for the current selections and move to
    /// [`QuizPhase::Presenting`]. Requires a topic and connectivity. The
    /// bank's content and ordering are taken as-is; only the shape of each
    /// question is checked here. Bank errors pass through untouched.
    pub fn generate(&mut self, bank: &mut dyn QuestionSource) -> Result<&GeneratedTest, QuizError> {
        self.ensure_configuring()?;
        let topic = self.topic.clone().ok_or(QuizError::MissingTopic)?;
        if !self.net.current() {
            return Err(QuizError::Offline);
        }

        let questions = bank.fetch(&topic, self.difficulty, self.locale)?;
        for (index, question) in questions.iter().enumerate() {
            if !question.is_well_formed() {
                return Err(QuizError::MalformedQuestion { index });
            }
        }

        self.phase = QuizPhase::Presenting(GeneratedTest {
            config: QuizConfig {
                topic: Some(topic),
                difficulty: self.difficulty,
                locale: self.locale,
            },
            questions,
        });
        match &self.phase {
            QuizPhase::Presenting(test) => Ok(test),
            QuizPhase::Configuring => unreachable!("just transitioned to Presenting"),
        }
    }

    /// Discard the generated test and return to configuring. Topic and
    /// difficulty stay selected so the user can regenerate immediately.
    pub fn reset(&mut self) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Presenting(_) => {
                self.phase = QuizPhase::Configuring;
                Ok(())
            }
            QuizPhase::Configuring => Err(QuizError::NotPresenting),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;

    struct FixedBank {
        questions: Vec<Question>,
    }

    impl FixedBank {
        fn with(count: usize) -> Self {
            let questions = (0..count)
                .map(|i| Question {
                    prompt: format!("q{i}"),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct: i % 3,
                })
                .collect();
            Self { questions }
        }
    }

    impl QuestionSource for FixedBank {
        fn fetch(
            &mut self,
            _topic: &str,
            _difficulty: Difficulty,
            _locale: Locale,
        ) -> anyhow::Result<Vec<Question>> {
            Ok(self.questions.clone())
        }
    }

    struct FailingBank;

    impl QuestionSource for FailingBank {
        fn fetch(
            &mut self,
            topic: &str,
            _difficulty: Difficulty,
            _locale: Locale,
        ) -> anyhow::Result<Vec<Question>> {
            bail!("no content for {topic}")
        }
    }

    fn online_session() -> QuizSession {
        QuizSession::new(Locale::En, ConnectivityMonitor::new(true))
    }

    #[test]
    fn generate_without_topic_signals() {
        let mut session = online_session();
        let mut bank = FixedBank::with(3);
        assert!(matches!(
            session.generate(&mut bank),
            Err(QuizError::MissingTopic)
        ));
        assert!(!session.is_presenting());
    }

    #[test]
    fn generate_with_topic_presents_bank_questions() {
        let mut session = online_session();
        let mut bank = FixedBank::with(3);
        session.set_topic("math").expect("set topic");
        let test = session.generate(&mut bank).expect("generate");
        assert_eq!(test.questions.len(), 3);
        assert!(test.questions.iter().all(Question::is_well_formed));
        assert_eq!(test.config.topic.as_deref(), Some("math"));
        assert!(session.is_presenting());
    }

    #[test]
    fn reset_returns_to_configuring_with_selections_kept() {
        let mut session = online_session();
        let mut bank = FixedBank::with(2);
        session.set_topic("math").expect("set topic");
        session.set_difficulty(Difficulty::Hard).expect("set difficulty");
        session.generate(&mut bank).expect("generate");

        session.reset().expect("reset");
        assert!(!session.is_presenting());
        assert_eq!(session.topic(), Some("math"));
        assert_eq!(session.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn reset_while_configuring_signals() {
        let mut session = online_session();
        assert!(matches!(session.reset(), Err(QuizError::NotPresenting)));
    }

    #[test]
    fn mutators_rejected_while_presenting() {
        let mut session = online_session();
        let mut bank = FixedBank::with(1);
        session.set_topic("science").expect("set topic");
        session.generate(&mut bank).expect("generate");

        assert!(matches!(
            session.set_topic("math"),
            Err(QuizError::NotConfiguring)
        ));
        assert!(matches!(
            session.set_difficulty(Difficulty::Medium),
            Err(QuizError::NotConfiguring)
        ));
        assert!(matches!(
            session.set_locale(Locale::Hi),
            Err(QuizError::NotConfiguring)
        ));
        assert!(matches!(
            session.generate(&mut bank),
            Err(QuizError::NotConfiguring)
        ));
    }

    #[test]
    fn empty_topic_signals() {
        let mut session = online_session();
        assert!(matches!(session.set_topic("  "), Err(QuizError::EmptyTopic)));
        assert_eq!(session.topic(), None);
    }

    #[test]
    fn generate_offline_signals() {
        let net = ConnectivityMonitor::new(false);
        let mut session = QuizSession::new(Locale::En, net.clone());
        let mut bank = FixedBank::with(3);
        session.set_topic("math").expect("set topic");
        assert!(matches!(
            session.generate(&mut bank),
            Err(QuizError::Offline)
        ));

        net.report(true);
        assert!(session.generate(&mut bank).is_ok());
    }

    #[test]
    fn malformed_bank_question_is_rejected() {
        struct BadBank;
        impl QuestionSource for BadBank {
            fn fetch(
                &mut self,
                _topic: &str,
                _difficulty: Difficulty,
                _locale: Locale,
            ) -> anyhow::Result<Vec<Question>> {
                Ok(vec![
                    Question {
                        prompt: "ok".into(),
                        options: vec!["a".into(), "b".into()],
                        correct: 0,
                    },
                    Question {
                        prompt: "bad".into(),
                        options: vec!["a".into(), "b".into()],
                        correct: 5,
                    },
                ])
            }
        }

        let mut session = online_session();
        session.set_topic("math").expect("set topic");
        assert!(matches!(
            session.generate(&mut BadBank),
            Err(QuizError::MalformedQuestion { index: 1 })
        ));
        assert!(!session.is_presenting());
    }

    #[test]
    fn bank_errors_pass_through() {
        let mut session = online_session();
        session.set_topic("history").expect("set topic");
        let err = session.generate(&mut FailingBank).expect_err("should fail");
        assert!(matches!(err, QuizError::Bank(_)));
        assert!(err.to_string().contains("history"));
        assert!(!session.is_presenting());
    }

    #[test]
    fn regenerate_after_reset_uses_retained_selections() {
        let mut session = online_session();
        let mut bank = FixedBank::with(2);
        session.set_topic("plants").expect("set topic");
        session.generate(&mut bank).expect("generate");
        session.reset().expect("reset");

        let test = session.generate(&mut bank).expect("regenerate");
        assert_eq!(test.config.topic.as_deref(), Some("plants"));
    }
}
