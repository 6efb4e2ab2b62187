//! Declarative builder for TUI shortcuts

use super::Shortcut;

/// Builder for creating shortcut lists with common patterns
#[derive(Default)]
pub struct ShortcutsBuilder {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add Tab / Shift-Tab for moving between fields
    pub fn with_field_navigation(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("Tab", "Next Field"));
        self.shortcuts.push(Shortcut::new("S-Tab", "Prev Field"));
        self
    }

    /// Add ←/→ for cycling select fields
    pub fn with_select(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("←/→", "Change Option"));
        self
    }

    /// Add Esc for quit
    pub fn with_quit(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("Esc", "Quit"));
        self
    }

    /// Add a single custom shortcut
    pub fn add(mut self, key: &str, description: &str) -> Self {
        self.shortcuts.push(Shortcut::new(key, description));
        self
    }

    /// Build the shortcuts vector
    pub fn build(self) -> Vec<Shortcut> {
        self.shortcuts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_navigation_shortcuts() {
        let shortcuts = ShortcutsBuilder::new().with_field_navigation().build();

        assert_eq!(shortcuts.len(), 2);
        assert!(shortcuts.iter().any(|s| s.key == "Tab"));
        assert!(shortcuts.iter().any(|s| s.key == "S-Tab"));
    }

    #[test]
    fn test_full_form_shortcuts() {
        let shortcuts = ShortcutsBuilder::new()
            .with_field_navigation()
            .with_select()
            .add("C-s", "Submit")
            .with_quit()
            .build();

        assert_eq!(shortcuts.len(), 5);
        assert_eq!(shortcuts.last().map(|s| s.key.as_str()), Some("Esc"));
    }

    #[test]
    fn test_empty_shortcuts() {
        let shortcuts = ShortcutsBuilder::new().build();

        assert_eq!(shortcuts.len(), 0);
    }
}
