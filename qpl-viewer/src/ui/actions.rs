// Actions the viewer can perform in response to input

/// All possible actions that can be triggered in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Page navigation, with an optional vim-style count
    NextPage(usize),
    PreviousPage(usize),
    FirstPage,
    LastPage,

    // Search input
    StartSearch,
    SubmitSearch,
    CancelSearch,
    ClearSearch,
    /// Forward the key to the search input
    EditSearch,

    // Page size
    IncreasePageSize,
    DecreasePageSize,

    // Overlays
    ToggleHelp,
    ToggleDebug,
}

impl Action {
    /// Whether a count prefix ("3n") changes the action
    pub fn accepts_count(&self) -> bool {
        matches!(self, Action::NextPage(_) | Action::PreviousPage(_))
    }

    /// Replace the count on counted actions
    pub fn with_count(self, count: usize) -> Self {
        match self {
            Action::NextPage(_) => Action::NextPage(count),
            Action::PreviousPage(_) => Action::PreviousPage(count),
            other => other,
        }
    }
}
