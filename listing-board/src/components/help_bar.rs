use listing_core::{Component, Keybindings, format_key_for_display};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings,
}

impl<A> Component<A> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: HelpBarProps<'_>) {
        let keys = props.keybindings;
        let mut spans = Vec::new();
        for command in keys.commands() {
            let Some(key) = keys.first_key(command) else {
                continue;
            };
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format_key_for_display(key),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {command}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
