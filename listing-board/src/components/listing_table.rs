//! Listing table: header plus one memoized row per record

use std::sync::Arc;

use listing_core::{Component, MemoStats};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Row, Table},
};

use super::listing_row::ListingRows;
use crate::state::ListingRecord;

pub const HEADERS: [&str; 3] = ["Address", "Country", "Asking Price"];

pub struct ListingTableProps<'a> {
    pub listings: &'a [Arc<ListingRecord>],
}

#[derive(Default)]
pub struct ListingTable {
    rows: ListingRows,
}

impl ListingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_stats(&self) -> MemoStats {
        self.rows.stats()
    }
}

impl<A> Component<A> for ListingTable {
    type Props<'a> = ListingTableProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ListingTableProps<'_>) {
        let rows: Vec<Row<'static>> = props
            .listings
            .iter()
            .map(|record| self.rows.row(record))
            .collect();
        self.rows.evict_missing(props.listings);

        let header = Row::new(HEADERS).style(Style::default().fg(Color::Cyan).bold());
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(50),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::Rgb(80, 80, 100))),
        );

        frame.render_widget(table, area);
    }
}
