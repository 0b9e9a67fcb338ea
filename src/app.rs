use std::time::Instant;

use anyhow::Result;

use crate::bank::builtin::BuiltinBank;
use crate::bank::{Difficulty, TOPICS};
use crate::config::Config;
use crate::connectivity::ConnectivityMonitor;
use crate::i18n::{Catalog, Locale, Translate};
use crate::session::chat::{ChatSession, SUGGESTION_KEYS};
use crate::session::quiz::QuizSession;
use crate::ui::components::menu::Menu;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Chat,
    Quiz,
    Settings,
}

pub const SETTINGS_FIELDS: usize = 4;

pub struct App {
    pub screen: AppScreen,
    pub chat: ChatSession,
    pub quiz: QuizSession,
    pub monitor: ConnectivityMonitor,
    pub catalog: Catalog,
    pub bank: BuiltinBank,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub input: LineInput,
    pub chip_selected: Option<usize>,
    pub topic_cursor: usize,
    pub question_cursor: usize,
    pub picked: Vec<Option<usize>>,
    pub status: Option<String>,
    pub settings_selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(mut config: Config, monitor: ConnectivityMonitor) -> Result<Self> {
        config.normalize();

        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let catalog = Catalog;
        let locale = config.locale();
        let chat = ChatSession::new(locale, config.reply_delay(), monitor.clone(), &catalog);
        let quiz = QuizSession::new(locale, monitor.clone());
        let bank = BuiltinBank::load(config.question_count)?;

        Ok(Self {
            screen: AppScreen::Menu,
            chat,
            quiz,
            monitor,
            catalog,
            bank,
            config,
            theme,
            menu,
            input: LineInput::new(""),
            chip_selected: None,
            topic_cursor: 0,
            question_cursor: 0,
            picked: Vec::new(),
            status: None,
            settings_selected: 0,
            should_quit: false,
        })
    }

    pub fn locale(&self) -> Locale {
        self.config.locale()
    }

    /// Drive the chat's pending replies from the event loop's tick.
    pub fn tick(&mut self) {
        self.chat.poll(Instant::now(), &self.catalog);
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.status = None;
    }

    /// The chat transcript starts over on every screen entry; nothing is
    /// kept across visits.
    pub fn go_to_chat(&mut self) {
        self.chat.reset(self.locale(), &self.catalog);
        self.input.clear();
        self.chip_selected = None;
        self.screen = AppScreen::Chat;
        self.status = None;
    }

    pub fn go_to_quiz(&mut self) {
        self.screen = AppScreen::Quiz;
        self.status = None;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
        self.status = None;
    }

    pub fn submit_input(&mut self) {
        if self.input.is_empty() {
            return;
        }
        let text = self.input.value().to_string();
        self.chat.submit(&text, Instant::now());
        self.input.clear();
    }

    pub fn submit_chip(&mut self) {
        let Some(index) = self.chip_selected else {
            return;
        };
        let chips = self.chat.suggestions(&self.catalog);
        if let Some(label) = chips.get(index) {
            let label = label.clone();
            self.chat.submit(&label, Instant::now());
        }
    }

    pub fn chip_next(&mut self) {
        let count = SUGGESTION_KEYS.len();
        self.chip_selected = Some(match self.chip_selected {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    pub fn chip_prev(&mut self) {
        let count = SUGGESTION_KEYS.len();
        self.chip_selected = Some(match self.chip_selected {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        });
    }

    pub fn topic_next(&mut self) {
        self.topic_cursor = (self.topic_cursor + 1) % TOPICS.len();
    }

    pub fn topic_prev(&mut self) {
        self.topic_cursor = (self.topic_cursor + TOPICS.len() - 1) % TOPICS.len();
    }

    pub fn choose_topic(&mut self) {
        match self.quiz.set_topic(TOPICS[self.topic_cursor]) {
            Ok(()) => self.status = None,
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn difficulty_next(&mut self) {
        let next = self.quiz.difficulty().next();
        if let Err(err) = self.quiz.set_difficulty(next) {
            self.status = Some(err.to_string());
        }
    }

    pub fn difficulty_prev(&mut self) {
        let prev = self.quiz.difficulty().prev();
        if let Err(err) = self.quiz.set_difficulty(prev) {
            self.status = Some(err.to_string());
        }
    }

    pub fn generate_quiz(&mut self) {
        match self.quiz.generate(&mut self.bank) {
            Ok(test) => {
                self.picked = vec![None; test.questions.len()];
                self.question_cursor = 0;
                self.status = None;
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn new_quiz(&mut self) {
        match self.quiz.reset() {
            Ok(()) => {
                self.picked.clear();
                self.question_cursor = 0;
                self.status = None;
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn question_next(&mut self) {
        if let Some(test) = self.quiz.current_test() {
            if self.question_cursor + 1 < test.questions.len() {
                self.question_cursor += 1;
            }
        }
    }

    pub fn question_prev(&mut self) {
        self.question_cursor = self.question_cursor.saturating_sub(1);
    }

    /// Record an answer pick for the focused question. Screen state only;
    /// the generated test is read-only here and correctness is never
    /// revealed.
    pub fn pick_option(&mut self, option: usize) {
        let Some(test) = self.quiz.current_test() else {
            return;
        };
        let Some(question) = test.questions.get(self.question_cursor) else {
            return;
        };
        if option < question.options.len() {
            if let Some(slot) = self.picked.get_mut(self.question_cursor) {
                *slot = Some(option);
            }
        }
    }

    /// Switch the app language: restart the chat transcript and point the
    /// quiz config at the new locale. A presented test is discarded first
    /// since its content is in the old language.
    pub fn set_locale(&mut self, locale: Locale) {
        self.config.locale = locale.as_str().to_string();
        self.chat.reset(locale, &self.catalog);
        if self.quiz.is_presenting() {
            let _ = self.quiz.reset();
            self.picked.clear();
            self.question_cursor = 0;
        }
        if let Err(err) = self.quiz.set_locale(locale) {
            self.status = Some(err.to_string());
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        if let Some(theme) = Theme::load(name) {
            let theme: &'static Theme = Box::leak(Box::new(theme));
            self.theme = theme;
            self.menu.theme = theme;
            self.config.theme = name.to_string();
        }
    }

    pub fn on_connectivity(&mut self, online: bool) {
        let key = if online { "status.online" } else { "status.offline" };
        self.status = Some(self.catalog.translate(key, self.locale()));
    }

    pub fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                let locale = if forward {
                    self.locale().next()
                } else {
                    self.locale().next().next()
                };
                self.set_locale(locale);
            }
            1 => {
                let mut themes = Theme::available_themes();
                themes.sort();
                if themes.is_empty() {
                    return;
                }
                let current = themes
                    .iter()
                    .position(|t| *t == self.config.theme)
                    .unwrap_or(0);
                let next = if forward {
                    (current + 1) % themes.len()
                } else {
                    (current + themes.len() - 1) % themes.len()
                };
                let name = themes[next].clone();
                self.set_theme(&name);
            }
            2 => {
                let step = 250;
                let delay = if forward {
                    (self.config.reply_delay_ms + step).min(5000)
                } else {
                    self.config.reply_delay_ms.saturating_sub(step).max(250)
                };
                self.config.reply_delay_ms = delay;
                self.chat.set_delay(self.config.reply_delay());
            }
            3 => {
                let count = if forward {
                    (self.config.question_count + 1).min(10)
                } else {
                    self.config.question_count.saturating_sub(1).max(1)
                };
                self.config.question_count = count;
                self.bank.set_question_count(count);
            }
            _ => {}
        }
    }

    /// Pre-translated display labels for the topic list.
    pub fn topic_labels(&self) -> Vec<String> {
        TOPICS
            .iter()
            .map(|topic| {
                self.catalog
                    .translate(&format!("quiz.topics.{topic}"), self.locale())
            })
            .collect()
    }

    pub fn difficulty_labels(&self) -> Vec<String> {
        Difficulty::ALL
            .iter()
            .map(|d| self.catalog.translate(d.label_key(), self.locale()))
            .collect()
    }
}
