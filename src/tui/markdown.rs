use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Render Markdown source into styled ratatui lines.
///
/// Covers the constructs chat models actually emit for recipes: headings,
/// paragraphs, ordered and unordered lists, inline code, fenced code blocks,
/// emphasis, and rules. Anything else falls through as plain text.
pub fn render_markdown(source: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::default();
    for event in Parser::new(source) {
        renderer.handle(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    in_heading: bool,
    in_code_block: bool,
    /// One entry per open list; `Some(n)` carries the next ordered number.
    list_stack: Vec<Option<u64>>,
}

impl Renderer {
    fn handle(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self
                .spans
                .push(Span::styled(code.into_string(), self.style().fg(Color::Yellow))),
            Event::SoftBreak => self.spans.push(Span::raw(" ")),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(8),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } => {
                self.blank_line();
                self.in_heading = true;
            }
            Tag::List(start) => self.list_stack.push(start),
            Tag::Item => {
                self.flush_line();
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                self.spans.push(Span::raw(format!("{indent}{marker}")));
            }
            Tag::CodeBlock(_) => {
                self.blank_line();
                self.in_code_block = true;
            }
            Tag::BlockQuote => {
                self.flush_line();
                self.spans.push(Span::raw("> "));
            }
            Tag::Strong => self.bold += 1,
            Tag::Emphasis => self.italic += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush_line();
                self.in_heading = false;
                self.blank_line();
            }
            TagEnd::Paragraph => {
                self.flush_line();
                // Inside a list a paragraph is the item body; the item itself
                // decides line breaks.
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item | TagEnd::BlockQuote => self.flush_line(),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            // Code block text arrives with embedded newlines; preserve them,
            // including blank lines inside the block.
            let mut first = true;
            for line in text.split('\n') {
                if !first {
                    self.flush_line_keep_empty();
                }
                first = false;
                if !line.is_empty() {
                    self.spans.push(Span::styled(
                        line.to_string(),
                        Style::default().fg(Color::Gray),
                    ));
                }
            }
            return;
        }

        self.spans.push(Span::styled(text.to_string(), self.style()));
    }

    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.in_heading {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn flush_line(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(Line::from(spans));
        }
    }

    fn flush_line_keep_empty(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    /// Insert a separator line, collapsing runs of blanks.
    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(text_of).collect()
    }

    #[test]
    fn heading_is_bold() {
        let lines = render_markdown("# Pad Thai");
        assert_eq!(texts(&lines), vec!["Pad Thai"]);
        assert!(lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn paragraphs_are_separated_by_a_blank_line() {
        let lines = render_markdown("First paragraph.\n\nSecond paragraph.");
        assert_eq!(
            texts(&lines),
            vec!["First paragraph.", "", "Second paragraph."]
        );
    }

    #[test]
    fn soft_break_becomes_a_space() {
        let lines = render_markdown("one\ntwo");
        assert_eq!(texts(&lines), vec!["one two"]);
    }

    #[test]
    fn unordered_list_gets_bullets() {
        let lines = render_markdown("- rice\n- egg");
        assert_eq!(texts(&lines), vec!["- rice", "- egg"]);
    }

    #[test]
    fn ordered_list_numbers_continue() {
        let lines = render_markdown("1. heat the pan\n2. fry everything");
        assert_eq!(texts(&lines), vec!["1. heat the pan", "2. fry everything"]);
    }

    #[test]
    fn code_block_lines_are_preserved() {
        let lines = render_markdown("```\nsalt\n\npepper\n```");
        assert_eq!(texts(&lines), vec!["salt", "", "pepper"]);
    }

    #[test]
    fn strong_text_is_bold() {
        let lines = render_markdown("mix **well** now");
        assert_eq!(texts(&lines), vec!["mix well now"]);
        let strong = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "well")
            .expect("strong span");
        assert!(strong.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn empty_source_renders_no_lines() {
        assert!(render_markdown("").is_empty());
    }
}
