#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Search,
    Home,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Search => "Plant Search",
            Screen::Home => "My Plants",
        }
    }
}

/// What a key press asks of the search controller.
#[derive(Debug, PartialEq)]
pub enum Action {
    QueryChanged(String),
    Submit,
    Quit,
}
