//! Tab identifiers for the TUI application.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Calculator,
    Sensitivity,
    Guide,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Calculator, TabId::Sensitivity, TabId::Guide];

    pub fn name(&self) -> &'static str {
        match self {
            TabId::Calculator => "Calculator",
            TabId::Sensitivity => "Sensitivity",
            TabId::Guide => "Guide",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TabId::Calculator => 0,
            TabId::Sensitivity => 1,
            TabId::Guide => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
