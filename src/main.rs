mod app;
mod bank;
mod config;
mod connectivity;
mod event;
mod i18n;
mod session;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen, SETTINGS_FIELDS};
use config::Config;
#[cfg(not(feature = "network"))]
use connectivity::AlwaysOnline;
use connectivity::ConnectivityMonitor;
#[cfg(feature = "network")]
use connectivity::HttpProbe;
use event::{AppEvent, EventHandler};
use i18n::Translate;
use ui::components::chat_log::ChatLog;
use ui::components::quiz_form::QuizForm;
use ui::components::quiz_sheet::QuizSheet;
use ui::components::suggestion_row::SuggestionRow;
use ui::layout::{AppLayout, centered_rect};
use ui::line_input::LineInput;

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(
    name = "padhai",
    version,
    about = "Terminal study assistant with a chat tutor and practice tests"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Language (en, hi, mr)")]
    lang: Option<String>,

    #[arg(short, long, help = "Reply delay in milliseconds")]
    delay: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(lang) = cli.lang {
        config.locale = lang;
    }
    if let Some(delay) = cli.delay {
        config.reply_delay_ms = delay;
    }
    config.normalize();

    #[cfg(feature = "network")]
    let monitor = {
        let probe = HttpProbe::new(&config.probe_url, Duration::from_secs(3));
        let monitor = ConnectivityMonitor::with_probe(&probe);
        EventHandler::spawn_probe(monitor.clone(), probe, config.probe_interval());
        monitor
    };
    #[cfg(not(feature = "network"))]
    let monitor = ConnectivityMonitor::with_probe(&AlwaysOnline);

    let mut app = App::new(config, monitor.clone())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    // Forward connectivity transitions into the event stream so the UI
    // refreshes promptly instead of on the next keypress.
    let _connectivity_sub = monitor.subscribe({
        let tx = events.sender();
        move |online| {
            let _ = tx.send(AppEvent::Connectivity(online));
        }
    });

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Connectivity(online) => app.on_connectivity(online),
        }

        if app.should_quit {
            let _ = app.config.save();
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only act on Press — ignore Repeat and Release to avoid double input
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Chat => handle_chat_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.go_to_chat(),
        KeyCode::Char('2') => app.go_to_quiz(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.go_to_chat(),
            1 => app.go_to_quiz(),
            2 => app.go_to_settings(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_to_menu();
        return;
    }

    // Offline: the input affordance is disabled entirely. The session
    // would refuse the submit anyway; this mirrors the disabled text box.
    if !app.monitor.current() {
        return;
    }

    // With an empty input box the arrow keys walk the suggestion chips.
    if app.input.is_empty() {
        match key.code {
            KeyCode::Left => {
                app.chip_prev();
                return;
            }
            KeyCode::Right => {
                app.chip_next();
                return;
            }
            KeyCode::Enter if app.chip_selected.is_some() => {
                app.submit_chip();
                return;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Enter => app.submit_input(),
        _ => {
            app.chip_selected = None;
            app.input.handle(key);
        }
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if app.quiz.is_presenting() {
        match key.code {
            KeyCode::Esc => app.go_to_menu(),
            KeyCode::Char('n') => app.new_quiz(),
            KeyCode::Up | KeyCode::Char('k') => app.question_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.question_next(),
            KeyCode::Char(ch @ '1'..='6') => {
                app.pick_option(ch as usize - '1' as usize);
            }
            KeyCode::Char(ch @ 'a'..='f') => {
                app.pick_option(ch as usize - 'a' as usize);
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.topic_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.topic_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_topic(),
        KeyCode::Left | KeyCode::Char('h') => app.difficulty_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.difficulty_next(),
        KeyCode::Char('g') => app.generate_quiz(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < SETTINGS_FIELDS - 1 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle(true);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle(false);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Chat => render_chat(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, title: &str) {
    let colors = &app.theme.colors;
    let online = app.monitor.current();
    let status_key = if online { "status.online" } else { "status.offline" };
    let status = app.catalog.translate(status_key, app.locale());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " padhai ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {title} "),
            Style::default().fg(colors.fg()).bg(colors.header_bg()),
        ),
        Span::styled(
            format!("| {} ", app.locale().label()),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
        Span::styled(
            format!("| {status} "),
            Style::default()
                .fg(if online {
                    colors.success()
                } else {
                    colors.error()
                })
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hint: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "");

    let menu_area = centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);

    render_footer(frame, app, layout.footer, " [1-2] Open  [c] Settings  [q] Quit ");
}

fn render_chat(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    let title = app.catalog.translate("chat.title", app.locale());
    render_header(frame, app, layout.header, &title);

    let offline = !app.monitor.current();
    let mut constraints: Vec<Constraint> = Vec::new();
    if offline {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(2));
    constraints.push(Constraint::Length(3));

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(layout.main);

    let mut idx = 0;
    if offline {
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {}", app.catalog.translate("chat.offline", app.locale())),
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(banner, main_layout[idx]);
        idx += 1;
    }

    let log = ChatLog::new(app.chat.transcript(), app.theme);
    frame.render_widget(log, main_layout[idx]);
    idx += 1;

    let chips = app.chat.suggestions(&app.catalog);
    let row = SuggestionRow::new(&chips, app.chip_selected, app.theme);
    frame.render_widget(row, main_layout[idx]);
    idx += 1;

    render_input_box(frame, app, main_layout[idx], offline);

    render_footer(
        frame,
        app,
        layout.footer,
        " [Enter] Send  [←/→] Suggestions  [Esc] Back ",
    );
}

fn render_input_box(
    frame: &mut ratatui::Frame,
    app: &App,
    area: ratatui::layout::Rect,
    offline: bool,
) {
    let colors = &app.theme.colors;
    let input: &LineInput = &app.input;

    let border = if offline {
        Style::default().fg(colors.muted())
    } else {
        Style::default().fg(colors.accent())
    };
    let block = Block::bordered()
        .border_style(border)
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if input.value().is_empty() {
        Line::from(Span::styled(
            app.catalog.translate("chat.placeholder", app.locale()),
            Style::default().fg(colors.muted()),
        ))
    } else {
        let (before, cursor, after) = input.render_parts();
        let cursor_span = match cursor {
            Some(ch) => Span::styled(
                ch.to_string(),
                Style::default().fg(colors.bg()).bg(colors.fg()),
            ),
            None => Span::styled(" ", Style::default().fg(colors.bg()).bg(colors.fg())),
        };
        Line::from(vec![
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
            cursor_span,
            Span::styled(after.to_string(), Style::default().fg(colors.fg())),
        ])
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let title = app.catalog.translate("quiz.title", app.locale());
    render_header(frame, app, layout.header, &title);

    if let Some(test) = app.quiz.current_test() {
        let topic_label = test
            .config
            .topic
            .as_deref()
            .map(|topic| {
                app.catalog
                    .translate(&format!("quiz.topics.{topic}"), app.locale())
            })
            .unwrap_or_default();
        let difficulty_label = app
            .catalog
            .translate(test.config.difficulty.label_key(), app.locale());
        let questions_word = app.catalog.translate("quiz.questions", app.locale());
        let summary = format!(
            "{topic_label} • {difficulty_label} • {} {questions_word}",
            test.questions.len()
        );

        let sheet = QuizSheet {
            summary: &summary,
            questions: &test.questions,
            picked: &app.picked,
            cursor: app.question_cursor,
            theme: app.theme,
        };
        frame.render_widget(sheet, layout.main);

        render_footer(
            frame,
            app,
            layout.footer,
            " [n] New test  [j/k] Question  [1-6/a-f] Pick  [Esc] Back ",
        );
        return;
    }

    let topics = app.topic_labels();
    let difficulties = app.difficulty_labels();
    let chosen_topic = app
        .quiz
        .topic()
        .and_then(|topic| bank::TOPICS.iter().position(|t| *t == topic));
    let offline_hint = if app.monitor.current() {
        None
    } else {
        Some(app.catalog.translate("quiz.offline_hint", app.locale()))
    };

    let select_topic = app.catalog.translate("quiz.select_topic", app.locale());
    let difficulty_heading = app.catalog.translate("quiz.difficulty", app.locale());
    let questions_in = app.catalog.translate("quiz.questions_in", app.locale());

    let form = QuizForm {
        select_topic: &select_topic,
        difficulty_heading: &difficulty_heading,
        questions_in: &questions_in,
        language_name: app.locale().display_name(),
        topics: &topics,
        topic_cursor: app.topic_cursor,
        chosen_topic,
        difficulties: &difficulties,
        difficulty_index: bank::Difficulty::ALL
            .iter()
            .position(|d| *d == app.quiz.difficulty())
            .unwrap_or(0),
        offline_hint: offline_hint.as_deref(),
        status: app.status.as_deref(),
        theme: app.theme,
    };
    frame.render_widget(form, layout.main);

    render_footer(
        frame,
        app,
        layout.footer,
        " [j/k] Topic  [Enter] Choose  [←/→] Difficulty  [g] Generate  [Esc] Back ",
    );
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = frame.area();

    let centered = centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        ("Language".to_string(), app.locale().display_name().to_string()),
        ("Theme".to_string(), app.config.theme.clone()),
        (
            "Reply delay".to_string(),
            format!("{} ms", app.config.reply_delay_ms),
        ),
        (
            "Questions per test".to_string(),
            format!("{}", app.config.question_count),
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.muted()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.muted()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
