//! Navigation and focus utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    /// Detail page for one container id.
    Detail,
}

/// Dashboard section receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Focus {
    Filters,
    Performance,
    #[default]
    List,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Filters => "Filters",
            Focus::Performance => "Performance",
            Focus::List => "Containers",
        }
    }

    pub fn all() -> &'static [Focus] {
        &[Focus::Filters, Focus::Performance, Focus::List]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Focus {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        assert_eq!(Focus::List.next(), Focus::Filters);
        assert_eq!(Focus::Filters.previous(), Focus::List);
        assert_eq!(Focus::Filters.next(), Focus::Performance);
    }
}
