use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::domain::{DomainError, Recipe, RecipeRequest};

/// What the result pane shows.
///
/// `Loading`, `Loaded`, and `Failed` are distinct on purpose: a failed round
/// trip lands in `Failed` with its message instead of leaving the pane blank
/// forever.
#[derive(Debug)]
pub enum DisplayState {
    Idle,
    Loading,
    Loaded(Recipe),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Ingredients,
    Cuisine,
}

/// A single-line text field with a character-based cursor.
#[derive(Debug, Default)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.value.remove(at);
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }
}

/// Form state: the two input fields, focus, the display state, and the
/// request sequencing needed to keep superseded round trips from clobbering
/// newer results.
pub struct App {
    ingredients: InputField,
    cuisine: InputField,
    focus: Focus,
    display: DisplayState,
    scroll: u16,
    /// Token of the most recently issued request. Completions carrying any
    /// other token are stale and dropped.
    inflight: Option<u64>,
    next_token: u64,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            ingredients: InputField::default(),
            cuisine: InputField::default(),
            focus: Focus::Ingredients,
            display: DisplayState::Idle,
            scroll: 0,
            inflight: None,
            next_token: 0,
            should_quit: false,
        }
    }

    pub fn ingredients(&self) -> &InputField {
        &self.ingredients
    }

    pub fn cuisine(&self) -> &InputField {
        &self.cuisine
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn focused_field(&mut self) -> &mut InputField {
        match self.focus {
            Focus::Ingredients => &mut self.ingredients,
            Focus::Cuisine => &mut self.cuisine,
        }
    }

    /// Route one key press. Returns a `(token, request)` pair when the key
    /// started a new generation; the caller owns the actual round trip.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<(u64, RecipeRequest)> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => return self.begin_submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Focus::Ingredients => Focus::Cuisine,
                    Focus::Cuisine => Focus::Ingredients,
                };
            }
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(5),
            KeyCode::Char(c) => self.focused_field().insert(c),
            KeyCode::Backspace => self.focused_field().backspace(),
            KeyCode::Left => self.focused_field().move_left(),
            KeyCode::Right => self.focused_field().move_right(),
            _ => {}
        }
        None
    }

    /// Start a generation unless one is already in flight.
    ///
    /// While `Loading` the submit action is a no-op: no request is created,
    /// no state changes. This replaces the unguarded last-resolved-wins race
    /// a double click would otherwise cause.
    pub fn begin_submit(&mut self) -> Option<(u64, RecipeRequest)> {
        if matches!(self.display, DisplayState::Loading) {
            debug!("Submit ignored: a request is already in flight");
            return None;
        }

        self.next_token += 1;
        self.inflight = Some(self.next_token);
        self.display = DisplayState::Loading;
        self.scroll = 0;

        let request = RecipeRequest::new(self.ingredients.value(), self.cuisine.value());
        Some((self.next_token, request))
    }

    /// Apply the outcome of a round trip. Stale completions (token mismatch)
    /// are dropped so a superseded request can never overwrite the result of
    /// a newer one.
    pub fn on_completion(&mut self, token: u64, result: Result<Recipe, DomainError>) {
        if self.inflight != Some(token) {
            debug!("Dropping stale completion (token {token})");
            return;
        }

        self.inflight = None;
        self.display = match result {
            Ok(recipe) => DisplayState::Loaded(recipe),
            Err(e) => DisplayState::Failed(e.to_string()),
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut app = App::new();
        type_text(&mut app, "chicken, rice");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Thai");

        assert_eq!(app.ingredients().value(), "chicken, rice");
        assert_eq!(app.cuisine().value(), "Thai");
    }

    #[test]
    fn enter_starts_a_request_with_both_field_values() {
        let mut app = App::new();
        type_text(&mut app, "chicken, rice");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Thai");

        let (token, request) = app.handle_key(key(KeyCode::Enter)).expect("submission");
        assert_eq!(token, 1);
        assert_eq!(request.ingredients(), "chicken, rice");
        assert_eq!(request.cuisine(), "Thai");
        assert!(matches!(app.display(), DisplayState::Loading));
    }

    #[test]
    fn empty_fields_still_submit() {
        let mut app = App::new();
        let (_, request) = app.handle_key(key(KeyCode::Enter)).expect("submission");
        assert_eq!(request.ingredients(), "");
        assert_eq!(request.cuisine(), "");
    }

    #[test]
    fn submit_while_loading_is_a_no_op() {
        let mut app = App::new();
        let first = app.begin_submit();
        assert!(first.is_some());

        let second = app.begin_submit();
        assert!(second.is_none(), "no second request while one is in flight");
        assert!(matches!(app.display(), DisplayState::Loading));
    }

    #[test]
    fn successful_completion_loads_the_recipe() {
        let mut app = App::new();
        let (token, _) = app.begin_submit().expect("submission");

        app.on_completion(token, Ok(Recipe::new("# Pad Thai")));
        match app.display() {
            DisplayState::Loaded(recipe) => assert_eq!(recipe.markdown(), "# Pad Thai"),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn failed_completion_shows_the_error() {
        let mut app = App::new();
        let (token, _) = app.begin_submit().expect("submission");

        app.on_completion(token, Err(DomainError::completion("boom")));
        match app.display() {
            DisplayState::Failed(message) => assert!(message.contains("boom")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut app = App::new();
        let (first, _) = app.begin_submit().expect("first submission");
        app.on_completion(first, Ok(Recipe::new("old")));

        let (second, _) = app.begin_submit().expect("second submission");
        assert!(second > first);

        // A late duplicate of the first round trip must not win.
        app.on_completion(first, Ok(Recipe::new("stale")));
        assert!(matches!(app.display(), DisplayState::Loading));

        app.on_completion(second, Ok(Recipe::new("fresh")));
        match app.display() {
            DisplayState::Loaded(recipe) => assert_eq!(recipe.markdown(), "fresh"),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn retry_is_possible_after_failure() {
        let mut app = App::new();
        let (token, _) = app.begin_submit().expect("submission");
        app.on_completion(token, Err(DomainError::completion("down")));

        assert!(app.begin_submit().is_some());
        assert!(matches!(app.display(), DisplayState::Loading));
    }

    #[test]
    fn editing_handles_multibyte_characters() {
        let mut app = App::new();
        type_text(&mut app, "crème");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.ingredients().value(), "crè");

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.ingredients().value(), "creè");
    }

    #[test]
    fn escape_quits() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
