use std::time::{Duration, Instant};

use crate::connectivity::ConnectivityMonitor;
use crate::i18n::{Locale, Translate};
use crate::session::Message;
use crate::session::classify::{ResponseCategory, classify};
use crate::session::schedule::Scheduler;

pub const SUGGESTION_KEYS: [&str; 4] = [
    "chat.suggestions.explain",
    "chat.suggestions.examples",
    "chat.suggestions.questions",
    "chat.suggestions.fun",
];

struct PendingReply {
    category: ResponseCategory,
    original: String,
}

/// Transcript plus the deterministic reply machinery behind the chat screen.
///
/// Submissions while a reply is still pending simply queue another reply;
/// there is no mutual exclusion between in-flight replies.
pub struct ChatSession {
    transcript: Vec<Message>,
    locale: Locale,
    net: ConnectivityMonitor,
    delay: Duration,
    replies: Scheduler<PendingReply>,
}

impl ChatSession {
    pub fn new(
        locale: Locale,
        delay: Duration,
        net: ConnectivityMonitor,
        tr: &dyn Translate,
    ) -> Self {
        let mut session = Self {
            transcript: Vec::new(),
            locale,
            net,
            delay,
            replies: Scheduler::new(),
        };
        session.reset(locale, tr);
        session
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Replies scheduled but not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.replies.pending()
    }

    /// Start the transcript over in `locale`: one tutor greeting, nothing
    /// else. Outstanding replies are invalidated so nothing scheduled
    /// against the previous transcript can land in this one.
    pub fn reset(&mut self, locale: Locale, tr: &dyn Translate) {
        self.locale = locale;
        self.replies.cancel_all();
        self.transcript.clear();
        self.transcript
            .push(Message::tutor(tr.translate("chat.greeting", locale)));
    }

    /// Append a user message and schedule its reply for `now + delay`.
    ///
    /// Blank input and offline submissions are ignored outright — the
    /// screen also disables the affordance while offline, but the session
    /// refuses to mutate regardless of what the caller lets through.
    pub fn submit(&mut self, text: &str, now: Instant) {
        if text.trim().is_empty() || !self.net.current() {
            return;
        }
        self.transcript.push(Message::user(text));
        let category = classify(text, self.locale);
        self.replies.schedule(
            now + self.delay,
            PendingReply {
                category,
                original: text.to_string(),
            },
        );
    }

    /// Deliver every reply whose delay has elapsed, in due order. Returns
    /// how many messages were appended.
    pub fn poll(&mut self, now: Instant, tr: &dyn Translate) -> usize {
        let mut appended = 0;
        while let Some(reply) = self.replies.pop_due(now) {
            let template = tr.translate(reply.category.template_key(), self.locale);
            let content = if reply.category == ResponseCategory::Default {
                template.replace("{0}", &reply.original)
            } else {
                template
            };
            self.transcript.push(Message::tutor(content));
            appended += 1;
        }
        appended
    }

    /// The four canned prompts shown as chips. Selecting one goes through
    /// [`ChatSession::submit`] with the chip's label.
    pub fn suggestions(&self, tr: &dyn Translate) -> Vec<String> {
        SUGGESTION_KEYS
            .iter()
            .map(|key| tr.translate(key, self.locale))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub translator: returns `key` for plain keys and keeps the `{0}`
    /// slot in the default template so substitution can be observed.
    struct KeyEcho;

    impl Translate for KeyEcho {
        fn translate(&self, key: &str, locale: Locale) -> String {
            if key == "responses.default" {
                format!("[{}] you said: {{0}}", locale.as_str())
            } else {
                format!("[{}] {}", locale.as_str(), key)
            }
        }
    }

    fn online_session() -> ChatSession {
        ChatSession::new(
            Locale::En,
            Duration::from_millis(1000),
            ConnectivityMonitor::new(true),
            &KeyEcho,
        )
    }

    #[test]
    fn fresh_session_has_single_greeting() {
        let session = online_session();
        assert_eq!(session.transcript().len(), 1);
        let greeting = &session.transcript()[0];
        assert!(!greeting.is_user);
        assert_eq!(greeting.content, "[en] chat.greeting");
    }

    #[test]
    fn reset_replaces_transcript_for_every_locale() {
        let mut session = online_session();
        let now = Instant::now();
        session.submit("hello", now);
        for locale in Locale::ALL {
            session.reset(locale, &KeyEcho);
            assert_eq!(session.transcript().len(), 1);
            assert!(!session.transcript()[0].is_user);
            assert_eq!(
                session.transcript()[0].content,
                format!("[{}] chat.greeting", locale.as_str())
            );
        }
    }

    #[test]
    fn submit_appends_user_then_reply_after_delay() {
        let mut session = online_session();
        let t0 = Instant::now();
        session.submit("explain gravity", t0);
        assert_eq!(session.transcript().len(), 2);
        assert!(session.transcript()[1].is_user);
        assert_eq!(session.transcript()[1].content, "explain gravity");

        // Not yet due.
        assert_eq!(session.poll(t0 + Duration::from_millis(500), &KeyEcho), 0);
        assert_eq!(session.transcript().len(), 2);

        assert_eq!(session.poll(t0 + Duration::from_millis(1000), &KeyEcho), 1);
        assert_eq!(session.transcript().len(), 3);
        let reply = &session.transcript()[2];
        assert!(!reply.is_user);
        assert_eq!(reply.content, "[en] responses.explain");
    }

    #[test]
    fn blank_submissions_are_ignored() {
        let mut session = online_session();
        let now = Instant::now();
        session.submit("", now);
        session.submit("   ", now);
        session.submit("\t\n", now);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.pending_replies(), 0);
    }

    #[test]
    fn offline_submissions_are_ignored() {
        let net = ConnectivityMonitor::new(false);
        let mut session = ChatSession::new(
            Locale::En,
            Duration::from_millis(1000),
            net.clone(),
            &KeyEcho,
        );
        session.submit("explain gravity", Instant::now());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.pending_replies(), 0);

        // Back online the same session accepts input again.
        net.report(true);
        session.submit("explain gravity", Instant::now());
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn default_reply_embeds_original_text() {
        let mut session = online_session();
        let t0 = Instant::now();
        session.submit("What is 2+2?", t0);
        session.poll(t0 + Duration::from_millis(1000), &KeyEcho);
        let reply = &session.transcript()[2];
        assert_eq!(reply.content, "[en] you said: What is 2+2?");
    }

    #[test]
    fn overlapping_submissions_reply_in_order() {
        let mut session = online_session();
        let t0 = Instant::now();
        session.submit("What is a noun?", t0);
        session.submit("What is a verb?", t0 + Duration::from_millis(300));
        assert_eq!(session.pending_replies(), 2);

        // First reply due at t0+1000, second at t0+1300.
        assert_eq!(session.poll(t0 + Duration::from_millis(1100), &KeyEcho), 1);
        assert!(session.transcript()[3].content.contains("What is a noun?"));
        assert_eq!(session.poll(t0 + Duration::from_millis(1400), &KeyEcho), 1);
        assert!(session.transcript()[4].content.contains("What is a verb?"));
    }

    #[test]
    fn reset_cancels_scheduled_replies() {
        let mut session = online_session();
        let t0 = Instant::now();
        session.submit("explain gravity", t0);
        session.reset(Locale::Hi, &KeyEcho);

        assert_eq!(session.poll(t0 + Duration::from_secs(10), &KeyEcho), 0);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].content, "[hi] chat.greeting");
    }

    #[test]
    fn reply_language_follows_session_locale() {
        let net = ConnectivityMonitor::new(true);
        let mut session =
            ChatSession::new(Locale::Hi, Duration::from_millis(1000), net, &KeyEcho);
        let t0 = Instant::now();
        session.submit("इसे समझाएं", t0);
        session.poll(t0 + Duration::from_millis(1000), &KeyEcho);
        assert_eq!(
            session.transcript()[2].content,
            "[hi] responses.explain"
        );
    }

    #[test]
    fn suggestions_are_translated_chip_labels() {
        let session = online_session();
        let chips = session.suggestions(&KeyEcho);
        assert_eq!(chips.len(), 4);
        assert_eq!(chips[0], "[en] chat.suggestions.explain");
        assert_eq!(chips[3], "[en] chat.suggestions.fun");
    }
}
