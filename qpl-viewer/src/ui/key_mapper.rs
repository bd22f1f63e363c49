// Maps keyboard input to actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::ui::actions::Action;

/// Which widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Keys drive the table
    Browse,
    /// Keys edit the search box
    Search,
}

/// Maps keyboard input to actions based on the input mode
pub struct KeyMapper {
    /// Static mappings that don't depend on mode
    global_mappings: HashMap<(KeyCode, KeyModifiers), Action>,

    /// Mode-specific mappings
    mode_mappings: HashMap<InputMode, HashMap<(KeyCode, KeyModifiers), Action>>,

    /// Vim-style count buffer for page moves
    count_buffer: String,
}

impl KeyMapper {
    pub fn new() -> Self {
        let mut mapper = Self {
            global_mappings: HashMap::new(),
            mode_mappings: HashMap::new(),
            count_buffer: String::new(),
        };

        mapper.init_global_mappings();
        mapper.init_browse_mappings();
        mapper.init_search_mappings();
        mapper
    }

    /// Initialize mappings that work regardless of mode
    fn init_global_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        self.global_mappings
            .insert((F(1), Mod::NONE), Action::ToggleHelp);
        self.global_mappings
            .insert((F(5), Mod::NONE), Action::ToggleDebug);

        // Force quit
        self.global_mappings
            .insert((Char('c'), Mod::CONTROL), Action::Quit);
        self.global_mappings
            .insert((Char('C'), Mod::CONTROL), Action::Quit);
    }

    fn init_browse_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Char('q'), Mod::NONE), Action::Quit);

        // Paging
        for key in [Char('n'), Right, PageDown] {
            mappings.insert((key, Mod::NONE), Action::NextPage(1));
        }
        for key in [Char('p'), Left, PageUp] {
            mappings.insert((key, Mod::NONE), Action::PreviousPage(1));
        }
        mappings.insert((Char('g'), Mod::NONE), Action::FirstPage);
        mappings.insert((Home, Mod::NONE), Action::FirstPage);
        mappings.insert((End, Mod::NONE), Action::LastPage);

        // Terminals disagree on whether shifted characters carry SHIFT
        for modifiers in [Mod::NONE, Mod::SHIFT] {
            mappings.insert((Char('G'), modifiers), Action::LastPage);
            mappings.insert((Char('+'), modifiers), Action::IncreasePageSize);
            mappings.insert((Char('?'), modifiers), Action::ToggleHelp);
        }
        mappings.insert((Char('='), Mod::NONE), Action::IncreasePageSize);
        mappings.insert((Char('-'), Mod::NONE), Action::DecreasePageSize);

        // Search
        mappings.insert((Char('/'), Mod::NONE), Action::StartSearch);
        mappings.insert((Esc, Mod::NONE), Action::ClearSearch);

        self.mode_mappings.insert(InputMode::Browse, mappings);
    }

    fn init_search_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();
        mappings.insert((Enter, Mod::NONE), Action::SubmitSearch);
        mappings.insert((Esc, Mod::NONE), Action::CancelSearch);

        self.mode_mappings.insert(InputMode::Search, mappings);
    }

    /// Map a key event to an action for the given mode
    pub fn map_key(&mut self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        // Digits start a count in browse mode ("3n" moves three pages)
        if mode == InputMode::Browse {
            if let KeyCode::Char(c) = key.code {
                if c.is_ascii_digit() && key.modifiers.is_empty() {
                    // A leading zero is not a count
                    if c != '0' || !self.count_buffer.is_empty() {
                        self.count_buffer.push(c);
                    }
                    return None;
                }
            }
        }

        let action = self.map_key_internal(key, mode);

        if !self.count_buffer.is_empty() {
            let count = self.count_buffer.parse::<usize>().ok();
            self.count_buffer.clear();
            if let (Some(action), Some(count)) = (action, count) {
                if action.accepts_count() {
                    return Some(action.with_count(count));
                }
            }
        }

        action
    }

    /// Internal key mapping without count handling
    fn map_key_internal(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        let key_combo = (key.code, key.modifiers);

        if let Some(action) = self.global_mappings.get(&key_combo) {
            return Some(*action);
        }

        if let Some(action) = self
            .mode_mappings
            .get(&mode)
            .and_then(|mappings| mappings.get(&key_combo))
        {
            return Some(*action);
        }

        match mode {
            // Everything unmapped goes to the input widget
            InputMode::Search => Some(Action::EditSearch),
            InputMode::Browse => None,
        }
    }

    /// Clear any pending state (like count buffer)
    pub fn clear_pending(&mut self) {
        self.count_buffer.clear();
    }

    /// Check if we're collecting a count
    pub fn is_collecting_count(&self) -> bool {
        !self.count_buffer.is_empty()
    }

    /// Get the current count buffer for display
    pub fn get_count_buffer(&self) -> &str {
        &self.count_buffer
    }
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}
