use tramas_core::Section;

/// Top-level screen the application is currently displaying.
///
/// Used to dispatch `update()` to the right screen-drawing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppScreen {
    /// Landing page with an overview of the research.
    Intro,
    /// One of the three family timelines.
    Timeline(Section),
    /// The grouped, filterable image gallery.
    Gallery,
    /// Credits and sourcing notes.
    About,
}

impl Default for AppScreen {
    fn default() -> Self {
        Self::Intro
    }
}

impl AppScreen {
    /// Navigation order of the screens in the top bar.
    pub(crate) const ALL: [AppScreen; 6] = [
        AppScreen::Intro,
        AppScreen::Timeline(Section::Panceri),
        AppScreen::Timeline(Section::Pompeia),
        AppScreen::Timeline(Section::Scavino),
        AppScreen::Gallery,
        AppScreen::About,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Intro => "Início",
            Self::Timeline(section) => section.title(),
            Self::Gallery => "Galeria",
            Self::About => "Sobre",
        }
    }
}
