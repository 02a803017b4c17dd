//! Table rows for listing records, memoized per record id

use std::collections::HashSet;
use std::sync::Arc;

use listing_core::{MemoCache, MemoStats};
use ratatui::widgets::{Cell, Row};

use crate::currency;
use crate::state::ListingRecord;

/// Row input compared field by field; the id is the cache key.
#[derive(Debug, Clone)]
pub struct RowProps(pub Arc<ListingRecord>);

impl PartialEq for RowProps {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.0, &other.0);
        Arc::ptr_eq(a, b)
            || (a.address == b.address && a.country == b.country && a.price == b.price)
    }
}

/// `[address, country, formatted price]`
pub fn render_row(record: &ListingRecord) -> Row<'static> {
    Row::new([
        Cell::from(record.address.clone()),
        Cell::from(record.country.clone()),
        Cell::from(currency::format(record.price)),
    ])
}

/// Row renderer that only rebuilds a row when its record's fields change.
#[derive(Default)]
pub struct ListingRows {
    cache: MemoCache<u32, RowProps, Row<'static>>,
}

impl ListingRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&mut self, record: &Arc<ListingRecord>) -> Row<'static> {
        self.cache
            .render(record.id, RowProps(Arc::clone(record)), |props| {
                render_row(&props.0)
            })
            .clone()
    }

    /// Drop cached rows whose id is no longer listed.
    pub fn evict_missing(&mut self, listings: &[Arc<ListingRecord>]) -> usize {
        let live: HashSet<u32> = listings.iter().map(|record| record.id).collect();
        self.cache.retain(|id| live.contains(id))
    }

    pub fn stats(&self) -> MemoStats {
        self.cache.stats()
    }
}
