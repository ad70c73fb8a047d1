use crate::home::HomeController;
use crate::model::{LoadingState, PlantSummary};
use crate::tui::action::Screen;
use ratatui::widgets::ListState;
use unicode_width::UnicodeWidthStr;

pub struct AppState {
    pub screen: Screen,
    pub loading: LoadingState,
    pub home: HomeController,

    // UI State
    pub results_state: ListState,
    pub home_state: ListState,
    pub message: String,

    // Input Buffer (cursor counts chars, not bytes)
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Search,
            loading: LoadingState::Idle,
            home: HomeController::new(),
            results_state: ListState::default(),
            home_state: ListState::default(),
            message: "Type a species name and press Enter.".to_string(),
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn results(&self) -> &[PlantSummary] {
        match &self.loading {
            LoadingState::Success(list) => &list.data,
            _ => &[],
        }
    }

    pub fn set_loading(&mut self, loading: LoadingState) {
        self.message = match &loading {
            LoadingState::Idle => self.message.clone(),
            LoadingState::Loading => "Searching...".to_string(),
            LoadingState::Success(list) if list.is_empty() => "No plants found.".to_string(),
            LoadingState::Success(list) => format!("{} plants found.", list.len()),
            LoadingState::Error(_) => "Search failed.".to_string(),
        };
        self.loading = loading;
        let selection = if self.results().is_empty() { None } else { Some(0) };
        self.results_state.select(selection);
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Search => Screen::Home,
            Screen::Home => Screen::Search,
        };
        if self.screen == Screen::Home {
            self.clamp_home_selection();
        }
    }

    fn active_len(&self) -> usize {
        match self.screen {
            Screen::Search => self.results().len(),
            Screen::Home => self.home.len(),
        }
    }

    fn active_list(&mut self) -> &mut ListState {
        match self.screen {
            Screen::Search => &mut self.results_state,
            Screen::Home => &mut self.home_state,
        }
    }

    pub fn next(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let list = self.active_list();
        let i = match list.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        list.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let list = self.active_list();
        let i = match list.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        list.select(Some(i));
    }

    pub fn selected_result(&self) -> Option<&PlantSummary> {
        self.results_state
            .selected()
            .and_then(|idx| self.results().get(idx))
    }

    pub fn selected_saved(&self) -> Option<&PlantSummary> {
        self.home_state
            .selected()
            .and_then(|idx| self.home.plants().get(idx))
    }

    pub fn save_selected(&mut self) {
        let Some(plant) = self.selected_result().cloned() else {
            self.message = "Nothing selected.".to_string();
            return;
        };
        let name = plant.common_name.clone();
        self.message = if self.home.save(plant) {
            format!("Saved {}.", name)
        } else {
            format!("{} is already saved.", name)
        };
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_saved().map(|p| p.id)
            && let Some(removed) = self.home.remove(id)
        {
            self.message = format!("Removed {}.", removed.common_name);
        }
        self.clamp_home_selection();
    }

    fn clamp_home_selection(&mut self) {
        let len = self.home.len();
        if len == 0 {
            self.home_state.select(None);
        } else {
            let current = self.home_state.selected().unwrap_or(0);
            self.home_state.select(Some(current.min(len - 1)));
        }
    }

    // --- INPUT HELPERS ---
    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len())
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }
    /// Terminal columns taken by the text left of the cursor.
    pub fn cursor_column(&self) -> u16 {
        let width = self.input_buffer[..self.byte_index()].width();
        u16::try_from(width).unwrap_or(u16::MAX)
    }
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.input_buffer.insert(index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlantList;

    fn results(n: u64) -> LoadingState {
        LoadingState::Success(PlantList::new(
            (0..n)
                .map(|id| PlantSummary::new(id, &format!("Plant {}", id), vec![]))
                .collect(),
        ))
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = AppState::new();
        state.set_loading(results(3));
        assert_eq!(state.results_state.selected(), Some(0));

        state.next(); // 1
        state.next(); // 2
        assert_eq!(state.results_state.selected(), Some(2));

        state.next(); // Wrap to 0
        assert_eq!(state.results_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = AppState::new();
        state.set_loading(results(3));

        state.previous(); // Wrap to last (2)
        assert_eq!(state.results_state.selected(), Some(2));

        state.previous(); // 1
        assert_eq!(state.results_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = AppState::new();
        state.set_loading(LoadingState::Loading);

        state.next();
        state.previous();
        assert_eq!(state.results_state.selected(), None);
    }

    #[test]
    fn test_error_clears_selection() {
        let mut state = AppState::new();
        state.set_loading(results(2));
        state.set_loading(LoadingState::Error("network error: reset".to_string()));
        assert_eq!(state.results_state.selected(), None);
        assert_eq!(state.message, "Search failed.");
    }

    #[test]
    fn test_save_then_remove_from_home() {
        let mut state = AppState::new();
        state.set_loading(results(2));
        state.next();
        state.save_selected();
        state.save_selected();
        assert_eq!(state.home.len(), 1);
        assert_eq!(state.message, "Plant 1 is already saved.");

        state.toggle_screen();
        assert_eq!(state.screen, Screen::Home);
        assert_eq!(state.home_state.selected(), Some(0));

        state.remove_selected();
        assert!(state.home.is_empty());
        assert_eq!(state.home_state.selected(), None);
    }

    #[test]
    fn test_cursor_clamping() {
        let mut state = AppState::new();
        state.input_buffer = "abc".to_string();
        state.cursor_position = 0;

        state.move_cursor_right();
        state.move_cursor_right();
        state.move_cursor_right();
        state.move_cursor_right(); // Should stay 3
        assert_eq!(state.cursor_position, 3);

        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left(); // Should stay 0
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_multibyte_input_editing() {
        let mut state = AppState::new();
        for c in "añil".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.move_cursor_left();
        state.delete_char(); // removes 'ñ'
        assert_eq!(state.input_buffer, "ail");
        state.enter_char('ñ');
        assert_eq!(state.input_buffer, "añil");
    }

    #[test]
    fn test_cursor_column_uses_display_width() {
        let mut state = AppState::new();
        for c in "植物 ok".chars() {
            state.enter_char(c);
        }
        assert_eq!(state.cursor_column(), 7);
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        assert_eq!(state.cursor_column(), 4);
        state.move_cursor_left();
        assert_eq!(state.cursor_column(), 2);
    }
}
