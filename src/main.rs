use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use thundertype::app::{App, AppScreen, AuthMode, MAX_POST_CHARS, Tab};
use thundertype::config::Config;
use thundertype::event::{AppEvent, EventHandler};
use thundertype::generator::lesson::{LevelDescriptor, target_wpm};
use thundertype::session::typing::SessionPhase;
use thundertype::store::LocalBackend;
use thundertype::store::schema::ReactionKind;
use thundertype::ui::components::auth_form::AuthPanel;
use thundertype::ui::components::dashboard::Dashboard;
use thundertype::ui::components::level_list::LevelList;
use thundertype::ui::components::post_feed::PostFeed;
use thundertype::ui::components::progress_bar::ProgressBar;
use thundertype::ui::components::stats_panel::StatsPanel;
use thundertype::ui::components::toast::ToastStack;
use thundertype::ui::components::typing_area::TypingArea;
use thundertype::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use thundertype::ui::line_input::InputResult;
use thundertype::ui::theme::Theme;

const LOG_FILE: &str = "thundertype.log";
const LOG_ENV: &str = "THUNDERTYPE_LOG";

#[derive(Parser)]
#[command(
    name = "thundertype",
    version,
    about = "Terminal typing tutor with 500 progressive levels"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Directory for accounts, profiles and posts")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Open this level right after signing in")]
    level: Option<u32>,

    #[arg(long, help = "Print the bundled theme names and exit")]
    list_themes: bool,
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
        .context("opening log file")?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_default();
    let config_path = Config::config_path();
    if !config_path.exists() {
        // first run: leave an editable copy of the defaults
        let _ = config.save_to(&config_path);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    config.validate();

    init_logging(&config.data_path())?;
    info!(data_dir = %config.data_dir, theme = %config.theme, "starting");

    let theme: &'static Theme = Box::leak(Box::new(Theme::resolve(&config.theme)));
    let backend = LocalBackend::open(config.data_path()).context("opening data directory")?;
    let events = EventHandler::new(Duration::from_millis(config.tick_ms));

    let mut app = App::new(
        config,
        theme,
        Box::new(backend),
        events.sender(),
        SmallRng::from_entropy(),
    );
    app.pending_level = cli.level;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = ?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }
    info!("exiting");

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
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
            AppEvent::Store(event) => app.apply_store_event(event),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat would inflate typed input
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Loading => {
            if key.code == KeyCode::Esc {
                app.should_quit = true;
            }
        }
        AppScreen::Auth => handle_auth_key(app, key),
        AppScreen::Hub => handle_hub_key(app, key),
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::F(2) => {
            let mode = match app.auth.mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            };
            app.set_auth_mode(mode);
        }
        KeyCode::Tab | KeyCode::Down => app.auth.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.auth.focus_prev(),
        KeyCode::Enter => match app.auth.mode {
            AuthMode::Login => app.submit_login(),
            AuthMode::Register => app.submit_register(),
        },
        _ => {
            app.auth.focused_mut().handle(key);
        }
    }
}

fn handle_hub_key(app: &mut App, key: KeyEvent) {
    if app.composing {
        match app.composer.handle(key) {
            InputResult::Submit => app.submit_post(),
            InputResult::Cancel => app.composing = false,
            InputResult::Continue => {}
        }
        return;
    }

    if app.tab == Tab::Typing && handle_typing_key(app, key) {
        return;
    }

    match key.code {
        KeyCode::Tab => app.select_tab(app.tab.next()),
        KeyCode::BackTab => app.select_tab(app.tab.prev()),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            app.select_tab(Tab::ALL[idx]);
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('o') => app.logout(),
        _ => match app.tab {
            Tab::Hub => handle_home_key(app, key),
            Tab::Levels => handle_levels_key(app, key),
            Tab::Lessons => handle_lessons_key(app, key),
            Tab::Posts => handle_posts_key(app, key),
            Tab::Typing => {}
        },
    }
}

/// Returns true when the key was consumed by the typing session.
fn handle_typing_key(app: &mut App, key: KeyEvent) -> bool {
    match app.typing.phase() {
        SessionPhase::Ready | SessionPhase::Active => {
            match key.code {
                KeyCode::Esc => app.select_tab(Tab::Levels),
                KeyCode::Tab | KeyCode::BackTab => return false,
                _ => app.type_key(key),
            }
            true
        }
        SessionPhase::Finished => match key.code {
            KeyCode::Char('r') => {
                app.restart_level();
                true
            }
            KeyCode::Char('n') => {
                let next = app
                    .last_progression
                    .as_ref()
                    .filter(|p| p.passed)
                    .and_then(|p| p.next_level);
                if let Some(level) = next {
                    app.start_level(level);
                }
                true
            }
            KeyCode::Esc => {
                app.select_tab(Tab::Levels);
                true
            }
            _ => false,
        },
        SessionPhase::Idle => {
            if key.code == KeyCode::Enter {
                let level = app.profile_level();
                app.start_level(level);
                return true;
            }
            false
        }
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        let level = app.profile_level();
        app.start_level(level);
    }
}

fn handle_levels_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_level_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_level_cursor(1),
        KeyCode::PageUp => app.move_level_cursor(-10),
        KeyCode::PageDown => app.move_level_cursor(10),
        KeyCode::Enter => {
            if let Some(level) = app.selected_level() {
                app.start_level(level.id);
            }
        }
        _ => {}
    }
}

fn handle_lessons_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_level_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_level_cursor(1),
        KeyCode::PageUp => app.move_level_cursor(-10),
        KeyCode::PageDown => app.move_level_cursor(10),
        KeyCode::Enter => {
            if let Some(level) = app.selected_level() {
                app.preview_lesson(level.id);
            }
        }
        KeyCode::Char('s') => {
            app.start_previewed_lesson();
        }
        _ => {}
    }
}

fn handle_posts_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('i') => app.composing = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_post_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_post_cursor(1),
        KeyCode::Char('l') => app.react(ReactionKind::Likes),
        KeyCode::Char('h') => app.react(ReactionKind::Hearts),
        _ => {}
    }
}

// ---- rendering ----

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Loading => render_loading(frame, app),
        AppScreen::Auth => render_auth(frame, app),
        AppScreen::Hub => render_hub(frame, app),
    }

    frame.render_widget(ToastStack::new(&app.toasts, app.theme), area);
}

fn render_loading(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = centered_rect(60, 30, 40, 7, frame.area());
    let lines = vec![
        Line::from(Span::styled(
            "ThunderType",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Loading...", Style::default().fg(colors.fg()))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Tip: {}", app.tip),
            Style::default().fg(colors.text_pending()),
        )),
    ];
    let loading = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
    frame.render_widget(loading, area);
}

fn render_auth(frame: &mut ratatui::Frame, app: &App) {
    let height = match app.auth.mode {
        AuthMode::Login => 9,
        AuthMode::Register => 12 + 2 * app.auth.challenges.len() as u16,
    };
    let area = centered_rect(50, 0, 60, height, frame.area());
    frame.render_widget(AuthPanel::new(&app.auth, app.theme), area);
}

fn render_hub(frame: &mut ratatui::Frame, app: &App) {
    let app_layout = AppLayout::new(frame.area());

    render_header(frame, app, app_layout.header);

    match app.tab {
        Tab::Hub => render_home(frame, app, app_layout.main),
        Tab::Levels => render_levels(frame, app, app_layout.main),
        Tab::Lessons => render_lessons(frame, app, app_layout.main),
        Tab::Typing => render_typing(frame, app, &app_layout),
        Tab::Posts => render_posts(frame, app, app_layout.main),
    }

    if let Some(sidebar) = app_layout.sidebar {
        if app.tab == Tab::Typing && app.lesson.is_some() {
            let target = app.lesson.as_ref().map_or(1, |l| l.target_wpm);
            frame.render_widget(
                StatsPanel::new(&app.typing, target, app.profile.as_ref(), app.theme),
                sidebar,
            );
        } else {
            render_profile_card(frame, app, sidebar);
        }
    }

    render_footer(frame, app, app_layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let mut spans = vec![Span::styled(
        " ThunderType ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let style = if *tab == app.tab {
            Style::default()
                .fg(colors.bg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg()).bg(colors.header_bg())
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, tab.title()), style));
    }
    if let Some(profile) = &app.profile {
        spans.push(Span::styled(
            format!(
                "  {} | Level {} | {} coins | {}",
                profile.username, profile.level, profile.coins, profile.tier
            ),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(colors.header_bg()))
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let hints: &[&str] = if app.composing {
        &["[Enter] post", "[Esc] cancel"]
    } else {
        match app.tab {
            Tab::Hub => &["[Enter] practice", "[Tab] next tab", "[o] logout", "[q] quit"],
            Tab::Levels => &["[j/k] move", "[Enter] start", "[Tab] next tab", "[q] quit"],
            Tab::Lessons => &[
                "[j/k] move",
                "[Enter] view lesson",
                "[s] start practice",
                "[q] quit",
            ],
            Tab::Typing => match app.typing.phase() {
                SessionPhase::Finished => &["[r] retry", "[n] next level", "[Esc] levels"],
                _ => &["[Esc] levels", "[Tab] next tab", "type the text above"],
            },
            Tab::Posts => &["[c] compose", "[j/k] move", "[l] like", "[h] heart", "[q] quit"],
        }
    };
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_profile_card(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let label = Style::default().fg(colors.fg());
    let lines = match &app.profile {
        Some(p) => vec![
            Line::from(Span::styled(
                p.username.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Level:    {}", p.level)).style(label),
            Line::from(format!("Best WPM: {}", p.wpm)).style(label),
            Line::from(format!("Accuracy: {}%", p.accuracy)).style(label),
            Line::from(format!("Coins:    {}", p.coins)).style(label),
            Line::from(format!("Tier:     {}", p.tier)).style(label),
            Line::from(format!("Cleared:  {}", p.completed_levels.len())).style(label),
            Line::from(""),
            Line::from(format!("Member since {}", p.created_at.format("%Y-%m-%d")))
                .style(Style::default().fg(colors.text_pending())),
        ],
        None => vec![Line::from("No profile")],
    };
    let card = Paragraph::new(lines).block(
        Block::bordered()
            .title(" Profile ")
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(card, area);
}

fn render_home(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let (name, wpm, level, coins) = app.profile.as_ref().map_or(
        ("Typist".to_string(), 0, 1, 0),
        |p| (p.username.clone(), p.wpm, p.level, p.coins),
    );
    let stat = |value: u32, label: &str| {
        vec![
            Span::styled(
                format!("  {value}"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {label}  "), Style::default().fg(colors.fg())),
        ]
    };
    let mut stats = stat(wpm, "WPM");
    stats.extend(stat(level, "Level"));
    stats.extend(stat(coins, "Coins"));

    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome back, {name}!"),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(stats),
    ])
    .block(Block::bordered().border_style(Style::default().fg(colors.border())));
    frame.render_widget(welcome, layout[0]);

    let recent = &app.posts[..app.posts.len().min(5)];
    frame.render_widget(PostFeed::new(recent, "Recent Activity", app.theme), layout[1]);
}

fn render_levels(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let levels = app.visible_levels();
    let completed = app.profile.as_ref().map(|p| &p.completed_levels);
    frame.render_widget(
        LevelList::new(
            "Typing Levels (1-500)",
            &levels,
            app.level_cursor,
            app.profile_level(),
            completed,
            app.theme,
        ),
        area,
    );
}

fn render_lessons(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let levels = app.visible_levels();
    let completed = app.profile.as_ref().map(|p| &p.completed_levels);
    frame.render_widget(
        LevelList::new(
            "Typing Lessons",
            &levels,
            app.level_cursor,
            app.profile_level(),
            completed,
            app.theme,
        ),
        layout[0],
    );

    let lines = match (&app.lesson_preview, app.selected_level()) {
        (Some(lesson), _) => vec![
            Line::from(Span::styled(
                format!("Lesson for Level {}", lesson.level),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(lesson.instructions.clone(), Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                lesson.text.clone(),
                Style::default().fg(colors.text_correct()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Master this level to reach {} WPM.", lesson.target_wpm),
                Style::default().fg(colors.text_pending()),
            )),
            Line::from(Span::styled(
                "[s] Start Practice for this Lesson",
                Style::default().fg(colors.accent()),
            )),
        ],
        (None, Some(level)) => describe_level(app, level),
        (None, None) => vec![Line::from("Select a level to view its lesson.")],
    };
    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(" Lesson ")
                .border_style(Style::default().fg(colors.border())),
        );
    frame.render_widget(preview, layout[1]);
}

fn describe_level(app: &App, level: LevelDescriptor) -> Vec<Line<'static>> {
    let colors = &app.theme.colors;
    let status = if level.is_unlocked(app.profile_level()) {
        Span::styled("[Enter] View Lesson", Style::default().fg(colors.accent()))
    } else {
        Span::styled("Locked", Style::default().fg(colors.error()))
    };
    vec![
        Line::from(Span::styled(
            level.title(),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Master this level to reach {} WPM.", level.target_wpm)),
        Line::from(format!("Required Level: {}", level.required_level)),
        Line::from(""),
        Line::from(status),
    ]
}

fn render_typing(frame: &mut ratatui::Frame, app: &App, app_layout: &AppLayout) {
    let colors = &app.theme.colors;
    let area = app_layout.main;

    if app.typing.phase() == SessionPhase::Finished {
        if let (Some(result), Some(verdict)) = (&app.last_result, &app.last_progression) {
            let card = centered_rect(80, 80, 50, 14, area);
            frame.render_widget(Dashboard::new(result, verdict, app.theme), card);
            return;
        }
    }

    let Some(lesson) = &app.lesson else {
        let idle = Paragraph::new("Press Enter to practice your current level.")
            .style(Style::default().fg(colors.text_pending()))
            .block(Block::bordered().border_style(Style::default().fg(colors.border())));
        frame.render_widget(idle, area);
        return;
    };

    let show_progress = app_layout.tier.show_progress_bar(area.height);
    let compact_stats = app_layout.sidebar.is_none();

    let mut constraints = Vec::new();
    if compact_stats {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(5));
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut idx = 0;
    if compact_stats {
        let live = app.typing.live();
        let text = format!(
            " WPM: {} / {} | Acc: {}% | Errors: {} | {:.0}s",
            live.wpm,
            target_wpm(lesson.level),
            live.accuracy,
            app.typing.error_count(),
            live.elapsed_secs
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                text,
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            rows[idx],
        );
        idx += 1;
    }

    frame.render_widget(
        TypingArea::new(&app.typing, &lesson.instructions, app.theme),
        rows[idx],
    );
    idx += 1;

    if show_progress {
        frame.render_widget(
            ProgressBar::new(
                "Progress",
                app.typing.typed().len(),
                app.typing.target().len(),
                app.theme,
            ),
            rows[idx],
        );
    }
}

fn render_posts(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let (before, at, after) = app.composer.render_parts();
    let mut spans = vec![Span::styled(before, Style::default().fg(colors.fg()))];
    if app.composing {
        spans.push(Span::styled(
            at.map_or_else(|| " ".to_string(), |c| c.to_string()),
            Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
        ));
    } else if let Some(c) = at {
        spans.push(Span::raw(c.to_string()));
    }
    spans.push(Span::styled(after, Style::default().fg(colors.fg())));
    if app.composer.is_empty() && !app.composing {
        spans = vec![Span::styled(
            "Write a new post... (press c)",
            Style::default().fg(colors.text_pending()),
        )];
    }

    let border = if app.composing {
        colors.border_focused()
    } else {
        colors.border()
    };
    let composer = Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .title(format!(" New post {}/{} ", app.composer.len(), MAX_POST_CHARS))
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(composer, layout[0]);

    let feed = PostFeed::new(&app.posts, "Community Posts", app.theme);
    let feed = match &app.session {
        Some(session) => feed.interactive(app.post_cursor, &session.account_id),
        None => feed,
    };
    frame.render_widget(feed, layout[1]);
}
