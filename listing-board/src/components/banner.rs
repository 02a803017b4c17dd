//! Page banner: the logo mark next to a subtitle

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Text,
    widgets::Paragraph,
};

use listing_core::Component;

pub const LOGO: &str = "⌂ Globomantics";

/// Subtitle source: nested content wins over the fallback text.
#[derive(Debug, Clone, Default)]
pub struct BannerProps<'a> {
    pub content: Option<Text<'a>>,
    pub text: Option<&'a str>,
}

impl<'a> BannerProps<'a> {
    pub fn with_content(content: impl Into<Text<'a>>) -> Self {
        Self {
            content: Some(content.into()),
            text: None,
        }
    }

    pub fn with_text(text: &'a str) -> Self {
        Self {
            content: None,
            text: Some(text),
        }
    }

    /// What the subtitle slot shows; `None` leaves it blank.
    pub fn subtitle(self) -> Option<Text<'a>> {
        self.content.or_else(|| self.text.map(Text::raw))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Banner;

impl Banner {
    pub const HEIGHT: u16 = 1;
}

impl<A> Component<A> for Banner {
    type Props<'a> = BannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: BannerProps<'_>) {
        let [logo_area, subtitle_area] =
            Layout::horizontal([Constraint::Ratio(5, 12), Constraint::Ratio(7, 12)]).areas(area);

        frame.render_widget(
            Paragraph::new(LOGO).style(Style::default().fg(Color::Cyan).bold()),
            logo_area,
        );

        if let Some(subtitle) = props.subtitle() {
            let style = Style::default().fg(Color::Rgb(255, 127, 80)).italic();
            frame.render_widget(Paragraph::new(subtitle).style(style), subtitle_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    #[test]
    fn test_content_wins_over_text() {
        let props = BannerProps {
            content: Some(Text::from(Line::from("nested"))),
            text: Some("fallback"),
        };
        assert_eq!(props.subtitle(), Some(Text::from("nested")));
    }

    #[test]
    fn test_text_fallback_and_empty() {
        assert_eq!(
            BannerProps::with_text("Hallo Text!").subtitle(),
            Some(Text::raw("Hallo Text!"))
        );
        assert_eq!(BannerProps::default().subtitle(), None);
    }
}
