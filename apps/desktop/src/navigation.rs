//! Pages and the current screen.

/// Top-level pages, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Learn,
    Practice,
    Stories,
    Leaderboard,
    Shop,
    Settings,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Learn,
        Page::Practice,
        Page::Stories,
        Page::Leaderboard,
        Page::Shop,
        Page::Settings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Page::Learn => "Learn",
            Page::Practice => "Practice",
            Page::Stories => "Stories",
            Page::Leaderboard => "Leaderboard",
            Page::Shop => "Shop",
            Page::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Learn => "📚",
            Page::Practice => "🎯",
            Page::Stories => "📖",
            Page::Leaderboard => "🏆",
            Page::Shop => "🛍️",
            Page::Settings => "⚙️",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Page::Learn => "Install more lessons in ./lessons",
            Page::Practice => "Drills & review",
            Page::Stories => "Reading & mini-stories",
            Page::Leaderboard => "This week",
            Page::Shop => "Earn gems by completing lessons",
            Page::Settings => "Customize the look & feel",
        }
    }

    /// Lesson category listed on this page, for catalog pages.
    pub fn category(self) -> Option<&'static str> {
        match self {
            Page::Learn => Some("learn"),
            Page::Practice => Some("practice"),
            Page::Stories => Some("stories"),
            _ => None,
        }
    }

    /// Match a typed page name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|page| page.name().eq_ignore_ascii_case(name))
    }
}

/// What fills the content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Page(Page),
    Lesson { id: String },
}

/// Current screen plus the page to come back to from a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    last_page: Page,
    screen: Screen,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            last_page: Page::Learn,
            screen: Screen::Page(Page::Learn),
        }
    }
}

impl Navigation {
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn last_page(&self) -> Page {
        self.last_page
    }

    pub fn show_page(&mut self, page: Page) {
        self.last_page = page;
        self.screen = Screen::Page(page);
    }

    pub fn enter_lesson(&mut self, id: impl Into<String>) {
        self.screen = Screen::Lesson { id: id.into() };
    }

    pub fn return_to_page(&mut self) {
        self.screen = Screen::Page(self.last_page);
    }

    pub fn in_lesson(&self) -> bool {
        matches!(self.screen, Screen::Lesson { .. })
    }
}
