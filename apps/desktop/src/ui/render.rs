//! Screen rendering.

use crate::app::App;
use crate::commands::catalog::page_lessons;
use crate::commands::leaderboard::weekly_rows;
use crate::commands::settings::theme_label;
use crate::commands::shop::inventory_text;
use crate::navigation::{Page, Screen};
use crate::state::{Anim, AppState};
use crossterm::style::{Attribute, Color, ContentStyle, Print, PrintStyledContent, StyledContent};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use lesson_core::theme::rgb;
use lesson_core::{LessonHost, Severity, Theme, SHOP_ITEMS};
use std::io::{self, Write};

/// Columns a page title travels while sliding in.
const PAGE_SLIDE_COLUMNS: f64 = 8.0;
/// Columns the toast travels while sliding in.
const TOAST_SLIDE_COLUMNS: f64 = 24.0;

const PROMPT: &str = "› ";

const HELP: &[(&str, &str)] = &[
    ("learn | practice | stories", "browse lessons"),
    ("leaderboard | shop | settings", "other pages"),
    ("open <number|id>", "start a lesson"),
    ("buy <number|id>", "buy a shop item"),
    ("theme", "switch light/dark"),
    ("reload", "rescan the lessons folder"),
    ("quit", "leave"),
];

/// A run of text in one style.
pub type Span = StyledContent<String>;
/// One screen row.
pub type Row = Vec<Span>;

fn span(text: impl Into<String>, hex: &str, bold: bool) -> Span {
    let mut style = ContentStyle::new();
    style.foreground_color = rgb(hex).map(|(r, g, b)| Color::Rgb { r, g, b });
    if bold {
        style.attributes.set(Attribute::Bold);
    }
    StyledContent::new(style, text.into())
}

fn plain(text: impl Into<String>) -> Span {
    StyledContent::new(ContentStyle::new(), text.into())
}

/// The row without styling.
pub fn row_text(row: &[Span]) -> String {
    row.iter().map(|s| s.content().as_str()).collect()
}

/// Draws the app to a terminal, or as plain text when output is not a TTY.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    interactive: bool,
}

impl Renderer {
    /// `interactive` enables colours and in-place redraws.
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    /// Draw one frame: status, toast, body and the prompt holding `input`.
    pub fn draw<W: Write>(&self, out: &mut W, app: &App, input: &str) -> io::Result<()> {
        let rows = self.rows(app);
        if self.interactive {
            queue!(out, cursor::MoveTo(0, 0))?;
            for row in rows {
                for span in row {
                    queue!(out, PrintStyledContent(span))?;
                }
                queue!(out, Clear(ClearType::UntilNewLine), cursor::MoveToNextLine(1))?;
            }
            queue!(out, Print(PROMPT), Print(input), Clear(ClearType::FromCursorDown))?;
        } else {
            for row in &rows {
                writeln!(out, "{}", row_text(row))?;
            }
            write!(out, "{PROMPT}{input}")?;
        }
        out.flush()
    }

    /// Every row above the prompt.
    pub fn rows(&self, app: &App) -> Vec<Row> {
        let mut rows = vec![self.status_line(app), self.toast_line(app.state()), Row::new()];
        rows.extend(self.body(app));
        rows
    }

    /// Screen name and animated counters.
    pub fn status_line(&self, app: &App) -> Row {
        let state = app.state();
        let t = state.theme();
        let slide = state.animations.value(Anim::PageSlide).unwrap_or(1.0);
        let indent = " ".repeat(((1.0 - slide) * PAGE_SLIDE_COLUMNS).round().max(0.0) as usize);

        let title = match (state.nav.screen(), app.view()) {
            (Screen::Lesson { .. }, Some(view)) => view.title().to_string(),
            _ => {
                let page = state.nav.last_page();
                format!("{} {}", page.icon(), page.name())
            }
        };

        vec![
            span("🦉 QuadroLingo", t.green, true),
            plain(format!("  {indent}")),
            span(title, t.text, true),
            plain("   "),
            span(format!("💎 {}", state.displayed(Anim::Gems)), t.blue, true),
            plain("  "),
            span(format!("⭐ {}", state.displayed(Anim::Xp)), t.orange, true),
        ]
    }

    /// The visible toast, sliding in from the right.
    pub fn toast_line(&self, state: &AppState) -> Row {
        let Some(toast) = state.toast.visible() else {
            return Row::new();
        };
        let t = state.theme();
        let slide = state.animations.value(Anim::ToastSlide).unwrap_or(1.0);
        let pad = " ".repeat(((1.0 - slide) * TOAST_SLIDE_COLUMNS).round().max(0.0) as usize);
        vec![
            plain(pad),
            span(toast.message.as_str(), severity_color(&t, toast.severity), true),
        ]
    }

    /// Everything below the status lines.
    pub fn body(&self, app: &App) -> Vec<Row> {
        let state = app.state();
        let t = state.theme();
        let width = app.config().surface_width;

        if let Some(view) = app.view() {
            return view
                .render(state)
                .lines
                .into_iter()
                .map(|line| vec![span(line.text, line.color, line.bold)])
                .collect();
        }

        let active = state.nav.last_page();
        let mut rows = vec![
            self.nav_bar(&t, active),
            vec![span("─".repeat(width), t.border, false)],
        ];

        if app.show_help() {
            rows.extend(self.help(&t));
            rows.push(Row::new());
        }

        rows.push(vec![span(active.subtitle(), t.muted, false)]);
        rows.push(vec![span(active.name(), t.text, true)]);
        rows.push(Row::new());

        match active {
            Page::Learn | Page::Practice | Page::Stories => rows.extend(self.catalog_page(app, &t, active)),
            Page::Leaderboard => rows.extend(self.leaderboard_page(state, &t)),
            Page::Shop => rows.extend(self.shop_page(state, &t)),
            Page::Settings => rows.extend(self.settings_page(app, &t)),
        }

        rows.push(Row::new());
        rows.push(vec![span("Type `help` for commands.", t.muted, false)]);
        rows
    }

    fn nav_bar(&self, t: &Theme, active: Page) -> Row {
        let mut row = Row::new();
        for (i, &page) in Page::ALL.iter().enumerate() {
            if i > 0 {
                row.push(plain("  "));
            }
            let label = format!("{} {}", page.icon(), page.name());
            if page == active {
                row.push(span(format!("[{label}]"), t.green_dark, true));
            } else {
                row.push(span(label, t.muted, false));
            }
        }
        row
    }

    fn help(&self, t: &Theme) -> Vec<Row> {
        HELP.iter()
            .map(|(command, what)| {
                vec![
                    plain("  "),
                    span(format!("{command:<32}"), t.blue, true),
                    span(*what, t.muted, false),
                ]
            })
            .collect()
    }

    fn catalog_page(&self, app: &App, t: &Theme, page: Page) -> Vec<Row> {
        let state = app.state();
        let entries = page_lessons(app.catalog(), page);
        let category = page.category().unwrap_or_default();
        if entries.is_empty() {
            return vec![vec![span(
                format!(
                    "No '{category}' lessons found. Add .md files to ./lessons with category: {category}, then type `reload`."
                ),
                t.muted,
                false,
            )]];
        }

        let mut rows = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            let d = &entry.descriptor;
            let mut row = vec![
                plain(format!("{:>3}. {} ", i + 1, d.icon)),
                span(d.title.as_str(), t.text, true),
            ];
            if !d.subtitle.is_empty() {
                row.push(plain("  "));
                row.push(span(d.subtitle.as_str(), t.muted, false));
            }
            if let Some(done) = state.profile.completion(&d.id) {
                let when = done
                    .last_completed_at()
                    .map(|at| format!(" · {}", at.format("%Y-%m-%d")))
                    .unwrap_or_default();
                row.push(plain("  "));
                row.push(span(format!("✓ {}×{when}", done.times), t.green, false));
            }
            rows.push(row);
        }
        rows.push(Row::new());
        rows.push(vec![span("Type `open <number>` to start.", t.muted, false)]);
        rows
    }

    fn leaderboard_page(&self, state: &AppState, t: &Theme) -> Vec<Row> {
        weekly_rows(state.profile.xp)
            .into_iter()
            .map(|row| {
                let text = format!("{:>3}. {:<8}{:>6} XP", row.rank, row.name, row.xp);
                if row.is_user {
                    vec![span(text, t.green_dark, true)]
                } else {
                    vec![span(text, t.text, false)]
                }
            })
            .collect()
    }

    fn shop_page(&self, state: &AppState, t: &Theme) -> Vec<Row> {
        let mut rows = vec![
            vec![
                plain("💎 Balance: "),
                span(state.profile.gems.to_string(), t.blue, true),
            ],
            Row::new(),
        ];
        for (i, item) in SHOP_ITEMS.iter().enumerate() {
            let status = if state.has_item(item.id) {
                span("Owned", t.muted, true)
            } else if state.profile.gems >= item.price {
                span(format!("{}💎", item.price), t.green, true)
            } else {
                span(format!("{}💎", item.price), t.red, false)
            };
            rows.push(vec![
                plain(format!("{:>3}. {} ", i + 1, item.icon)),
                span(item.name, t.text, true),
                plain("  "),
                status,
            ]);
            rows.push(vec![plain("       "), span(item.description, t.muted, false)]);
        }
        rows.push(Row::new());
        rows.push(vec![span("Inventory", t.text, true)]);
        rows.push(vec![span(inventory_text(&state.profile), t.muted, false)]);
        rows
    }

    fn settings_page(&self, app: &App, t: &Theme) -> Vec<Row> {
        let current = app.state().profile.settings.theme;
        let mut rows = vec![
            vec![span("Appearance", t.text, true)],
            vec![
                plain("Theme: "),
                span(theme_label(current), t.blue, true),
                plain("   "),
                span(
                    format!("type `theme` to switch to {}", theme_label(current.toggled())),
                    t.muted,
                    false,
                ),
            ],
            vec![span(
                format!("Theme is saved to {}", app.config().data_file.display()),
                t.muted,
                false,
            )],
            Row::new(),
            vec![span("Lessons", t.text, true)],
            vec![plain(format!(
                "{} loaded from {}",
                app.catalog().len(),
                app.config().lessons_dir.display()
            ))],
        ];

        let skipped = app.catalog().diagnostics();
        if !skipped.is_empty() {
            rows.push(vec![span(format!("{} skipped:", skipped.len()), t.orange, true)]);
            for err in skipped {
                rows.push(vec![span(format!("  • {err}"), t.muted, false)]);
            }
        }
        rows
    }
}

fn severity_color(t: &Theme, severity: Severity) -> &'static str {
    match severity {
        Severity::Info => t.blue,
        Severity::Success => t.green,
        Severity::Warn => t.orange,
        Severity::Error => t.red,
    }
}
