use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, DisplayState, Focus, InputField};
use super::markdown;

const INGREDIENTS_PLACEHOLDER: &str = "What products should be in the dish?";
const CUISINE_PLACEHOLDER: &str = "What cuisine should the recipe belong to?";

pub fn render(frame: &mut Frame, app: &App) {
    let [title_area, ingredients_area, cuisine_area, help_area, result_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("Generate a recipe")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .centered(),
        title_area,
    );

    render_input(
        frame,
        ingredients_area,
        " Ingredients ",
        INGREDIENTS_PLACEHOLDER,
        app.ingredients(),
        app.focus() == Focus::Ingredients,
    );
    render_input(
        frame,
        cuisine_area,
        " Cuisine ",
        CUISINE_PLACEHOLDER,
        app.cuisine(),
        app.focus() == Focus::Cuisine,
    );

    frame.render_widget(
        Paragraph::new("Tab: switch field | Enter: generate | PgUp/PgDn: scroll | Esc: quit")
            .style(Style::default().add_modifier(Modifier::DIM))
            .centered(),
        help_area,
    );

    render_result(frame, result_area, app);
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    placeholder: &str,
    field: &InputField,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::bordered().title(title).border_style(border_style);
    let inner = block.inner(area);

    let paragraph = if field.value().is_empty() {
        Paragraph::new(Span::styled(
            placeholder,
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(field.value())
    };
    frame.render_widget(paragraph.block(block), area);

    if focused && inner.width > 0 {
        // Cursor position is char-based; wide glyphs will be slightly off,
        // which is acceptable for a single-line field.
        let max_x = inner.right().saturating_sub(1);
        let x = (inner.x + field.cursor() as u16).min(max_x);
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let text: Text = match app.display() {
        DisplayState::Idle => Line::from(Span::styled(
            "Fill in the fields and press Enter.",
            dim,
        ))
        .into(),
        DisplayState::Loading => Line::from(Span::styled("Generating recipe...", dim)).into(),
        DisplayState::Loaded(recipe) if recipe.is_empty() => Line::from(Span::styled(
            "The model returned an empty response.",
            dim,
        ))
        .into(),
        DisplayState::Loaded(recipe) => Text::from(markdown::render_markdown(recipe.markdown())),
        DisplayState::Failed(message) => Text::from(vec![
            Line::from(Span::styled(
                format!("Generation failed: {message}"),
                Style::default().fg(Color::Red),
            )),
            Line::default(),
            Line::from(Span::styled("Press Enter to retry.", dim)),
        ]),
    };

    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((app.scroll(), 0))
            .block(Block::bordered().title(" Your recipe ")),
        area,
    );
}
