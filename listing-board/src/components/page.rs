//! The listing page: banners, title, counter, table and help bar
//!
//! Rendering is a pure function of props. Key events become actions through
//! the key bindings; Ctrl+C always quits.

use listing_core::{Component, EventKind, Keybindings};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use super::{Banner, BannerProps, HelpBar, HelpBarProps, ListingTable, ListingTableProps};
use crate::action::Action;
use crate::keymap;
use crate::state::ListingsState;

pub const TAGLINE: &str = "Providing houses all over the world";
pub const GREETING: &str = "Hallo Text!";
pub const TITLE: &str = "Houses currently on the market";
pub const LOADING: &str = "Loading listings...";

pub struct PageProps<'a> {
    pub state: &'a ListingsState,
    pub keybindings: &'a Keybindings,
}

#[derive(Default)]
pub struct Page {
    pub table: ListingTable,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Page {
    type Props<'a> = PageProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            _ if event.is_interrupt() => Some(Action::Quit),
            EventKind::Key(key) => match props.keybindings.command_for(key) {
                Some(keymap::ADD) => Some(Action::ListingAddDemo),
                Some(keymap::INCREMENT) => Some(Action::CounterIncrement),
                Some(keymap::QUIT) => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PageProps<'_>) {
        let state = props.state;
        let [
            tagline_area,
            greeting_area,
            _,
            title_area,
            counter_area,
            table_area,
            loading_area,
            help_area,
        ] = Layout::vertical([
            Constraint::Length(Banner::HEIGHT),
            Constraint::Length(Banner::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let tagline = BannerProps::with_content(Line::from(TAGLINE).bold());
        Component::<Action>::render(&mut Banner, frame, tagline_area, tagline);
        Component::<Action>::render(
            &mut Banner,
            frame,
            greeting_area,
            BannerProps::with_text(GREETING),
        );

        frame.render_widget(
            Paragraph::new(TITLE).style(Style::default().fg(Color::White).bold()),
            title_area,
        );
        frame.render_widget(Paragraph::new(format!("Counter: {}", state.counter)), counter_area);

        Component::<Action>::render(
            &mut self.table,
            frame,
            table_area,
            ListingTableProps {
                listings: &state.listings,
            },
        );

        if state.is_loading() {
            frame.render_widget(
                Paragraph::new(LOADING).style(Style::default().fg(Color::DarkGray).italic()),
                loading_area,
            );
        }

        Component::<Action>::render(
            &mut HelpBar,
            frame,
            help_area,
            HelpBarProps {
                keybindings: props.keybindings,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::seed_listings;
    use crate::reducer::reducer;
    use crate::state::IdPolicy;
    use listing_core::testing::{TestHarness, ctrl_key, key_event};
    use listing_core::{assert_emitted, assert_not_emitted, count_emitted};

    fn press(page: &mut Page, harness: &TestHarness<ListingsState, Action>, event: EventKind) {
        let keybindings = keymap::default_keybindings();
        let props = PageProps {
            state: &harness.state,
            keybindings: &keybindings,
        };
        for action in page.handle_event(&event, props) {
            harness.emit(action);
        }
    }

    #[test]
    fn test_keys_map_to_actions() {
        let mut page = Page::new();
        let mut harness = TestHarness::new(ListingsState::default());

        for k in ["a", "i", "+", "q", "z"] {
            press(&mut page, &harness, key_event(k));
        }

        let emitted = harness.drain_emitted();
        assert_eq!(
            emitted,
            vec![
                Action::ListingAddDemo,
                Action::CounterIncrement,
                Action::CounterIncrement,
                Action::Quit,
            ]
        );
        assert_eq!(count_emitted!(emitted, Action::CounterIncrement), 2);
    }

    #[test]
    fn test_add_defers_id_to_reducer() {
        let mut page = Page::new();
        let mut harness = TestHarness::new(ListingsState::new(IdPolicy::NextFree));
        reducer(&mut harness.state, Action::ListingsLoad);
        reducer(&mut harness.state, Action::ListingsDidLoad(seed_listings()));

        // both presses are mapped before either is applied
        press(&mut page, &harness, key_event("a"));
        press(&mut page, &harness, key_event("a"));
        let emitted = harness.drain_emitted();
        assert_not_emitted!(emitted, Action::ListingAdd(_));
        assert_eq!(count_emitted!(emitted, Action::ListingAddDemo), 2);

        for action in emitted {
            reducer(&mut harness.state, action);
        }
        let ids: Vec<u32> = harness.state.listings.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut page = Page::new();
        let mut harness = TestHarness::new(ListingsState::default());

        press(&mut page, &harness, EventKind::Key(ctrl_key('c')));

        let emitted = harness.drain_emitted();
        assert_emitted!(emitted, Action::Quit);
        assert_eq!(emitted.len(), 1);
    }
}
