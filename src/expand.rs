/// View state of one expandable card. Nothing backs it but the card itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandState {
    #[default]
    Collapsed,
    Expanded,
}

impl ExpandState {
    pub fn toggled(self) -> Self {
        match self {
            ExpandState::Collapsed => ExpandState::Expanded,
            ExpandState::Expanded => ExpandState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == ExpandState::Expanded
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpandState::Collapsed => "Show Details",
            ExpandState::Expanded => "Show Less",
        }
    }
}

/// Independent toggle per card index.
#[derive(Debug, Clone, Default)]
pub struct CardStates(Vec<ExpandState>);

impl CardStates {
    pub fn new(count: usize) -> Self {
        CardStates(vec![ExpandState::Collapsed; count])
    }

    pub fn get(&self, index: usize) -> ExpandState {
        self.0.get(index).copied().unwrap_or_default()
    }

    /// Flip one card; returns its new state. Out-of-range indexes are ignored.
    pub fn toggle(&mut self, index: usize) -> ExpandState {
        match self.0.get_mut(index) {
            Some(state) => {
                *state = state.toggled();
                *state
            }
            None => ExpandState::Collapsed,
        }
    }
}
