use std::time::{Duration, Instant};

use padhai::bank::builtin::BuiltinBank;
use padhai::bank::{Difficulty, Question};
use padhai::connectivity::ConnectivityMonitor;
use padhai::i18n::{Catalog, Locale, Translate};
use padhai::session::chat::ChatSession;
use padhai::session::quiz::{QuizError, QuizSession};

const DELAY: Duration = Duration::from_millis(1000);

fn chat(locale: Locale, net: &ConnectivityMonitor) -> ChatSession {
    ChatSession::new(locale, DELAY, net.clone(), &Catalog)
}

#[test]
fn fresh_chat_greets_in_every_locale() {
    let net = ConnectivityMonitor::new(true);
    for locale in Locale::ALL {
        let session = chat(locale, &net);
        assert_eq!(session.transcript().len(), 1);
        let greeting = &session.transcript()[0];
        assert!(!greeting.is_user);
        assert_eq!(greeting.content, Catalog.translate("chat.greeting", locale));
    }
}

#[test]
fn submit_grows_transcript_by_one_then_two() {
    let net = ConnectivityMonitor::new(true);
    let mut session = chat(Locale::En, &net);
    let t0 = Instant::now();

    session.submit("explain fractions", t0);
    assert_eq!(session.transcript().len(), 2);

    session.poll(t0 + DELAY, &Catalog);
    assert_eq!(session.transcript().len(), 3);
    assert!(!session.transcript()[2].is_user);
}

#[test]
fn blank_and_offline_submissions_are_no_ops() {
    let net = ConnectivityMonitor::new(true);
    let mut session = chat(Locale::En, &net);
    let t0 = Instant::now();

    session.submit("", t0);
    session.submit("   ", t0);
    assert_eq!(session.transcript().len(), 1);

    net.report(false);
    session.submit("explain fractions", t0);
    assert_eq!(session.transcript().len(), 1);
}

#[test]
fn classification_priority_and_default_echo() {
    let net = ConnectivityMonitor::new(true);
    let mut session = chat(Locale::En, &net);
    let t0 = Instant::now();

    // Both keywords present: explain wins.
    session.submit("explain this with an example", t0);
    session.poll(t0 + DELAY, &Catalog);
    assert_eq!(
        session.transcript()[2].content,
        Catalog.translate("responses.explain", Locale::En)
    );

    // No keyword: default template embeds the original text verbatim.
    session.submit("What is 2+2?", t0 + DELAY);
    session.poll(t0 + DELAY + DELAY, &Catalog);
    let reply = &session.transcript()[4].content;
    assert!(reply.contains("What is 2+2?"), "reply was: {reply}");
    assert!(!reply.contains("{0}"));
}

#[test]
fn reply_scheduled_before_reset_never_lands() {
    let net = ConnectivityMonitor::new(true);
    let mut session = chat(Locale::En, &net);
    let t0 = Instant::now();

    session.submit("explain gravity", t0);
    session.reset(Locale::Mr, &Catalog);

    assert_eq!(session.poll(t0 + DELAY + DELAY, &Catalog), 0);
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(
        session.transcript()[0].content,
        Catalog.translate("chat.greeting", Locale::Mr)
    );
}

#[test]
fn chip_labels_match_catalog() {
    let net = ConnectivityMonitor::new(true);
    let session = chat(Locale::Hi, &net);
    let chips = session.suggestions(&Catalog);
    assert_eq!(chips.len(), 4);
    assert_eq!(
        chips[0],
        Catalog.translate("chat.suggestions.explain", Locale::Hi)
    );
}

#[test]
fn quiz_flow_against_builtin_bank() {
    let net = ConnectivityMonitor::new(true);
    let mut session = QuizSession::new(Locale::En, net);
    let mut bank = BuiltinBank::load(3).expect("bank");

    assert!(matches!(
        session.generate(&mut bank),
        Err(QuizError::MissingTopic)
    ));

    session.set_topic("math").expect("set topic");
    session.set_difficulty(Difficulty::Medium).expect("set difficulty");
    let test = session.generate(&mut bank).expect("generate");
    assert!(!test.questions.is_empty());
    assert!(test.questions.len() <= 3);
    assert!(test.questions.iter().all(Question::is_well_formed));
    assert!(session.is_presenting());

    session.reset().expect("reset");
    assert!(!session.is_presenting());
    assert_eq!(session.topic(), Some("math"));
    assert_eq!(session.difficulty(), Difficulty::Medium);
}

#[test]
fn quiz_generate_offline_signals() {
    let net = ConnectivityMonitor::new(false);
    let mut session = QuizSession::new(Locale::En, net.clone());
    let mut bank = BuiltinBank::load(3).expect("bank");
    session.set_topic("science").expect("set topic");

    assert!(matches!(
        session.generate(&mut bank),
        Err(QuizError::Offline)
    ));

    net.report(true);
    assert!(session.generate(&mut bank).is_ok());
}

#[test]
fn localized_quiz_content_follows_locale() {
    let net = ConnectivityMonitor::new(true);
    let mut session = QuizSession::new(Locale::Hi, net);
    let mut bank = BuiltinBank::load(3).expect("bank");
    session.set_topic("math").expect("set topic");

    let test = session.generate(&mut bank).expect("generate");
    assert_eq!(test.config.locale, Locale::Hi);
    assert!(
        test.questions
            .iter()
            .any(|q| q.prompt.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))),
        "expected Devanagari prompts for the Hindi locale"
    );
}
