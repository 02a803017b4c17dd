//! Actions for the listing board
//!
//! Naming convention:
//! - Prefix names the area: `ListingsLoad`, `ListingAdd`, `CounterIncrement`
//! - "Did" marks an async result: `ListingsDidLoad`

use listing_core::ActionSummary;

use crate::state::{ListingRecord, Listings};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Listings =====
    /// Intent: start the initial load (mount hook)
    ListingsLoad,

    /// Result: the simulated fetch completed
    ListingsDidLoad(Listings),

    /// The listing view is going away; later writes are dropped
    ListingsUnmount,

    /// Append one record at the end
    ListingAdd(ListingRecord),

    /// Append the demo record; its id is picked when the action is applied
    ListingAddDemo,

    // ===== Counter =====
    CounterIncrement,

    // ===== Global =====
    /// Exit the application (handled by the runtime, not the reducer)
    Quit,
}

impl listing_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::ListingsLoad => "ListingsLoad",
            Action::ListingsDidLoad(_) => "ListingsDidLoad",
            Action::ListingsUnmount => "ListingsUnmount",
            Action::ListingAdd(_) => "ListingAdd",
            Action::ListingAddDemo => "ListingAddDemo",
            Action::CounterIncrement => "CounterIncrement",
            Action::Quit => "Quit",
        }
    }
}

/// Concise log lines for data-carrying actions
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::ListingsDidLoad(records) => {
                format!("ListingsDidLoad {{ records: {} }}", records.len())
            }
            Action::ListingAdd(record) => {
                format!("ListingAdd {{ id: {}, address: {:?} }}", record.id, record.address)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::Action as _;
    use std::sync::Arc;

    #[test]
    fn test_summary_hides_record_payloads() {
        let records: Listings = vec![
            Arc::new(ListingRecord::new(1, "a", "b", 1.0)),
            Arc::new(ListingRecord::new(2, "c", "d", 2.0)),
        ]
        .into();
        assert_eq!(
            Action::ListingsDidLoad(records).summary(),
            "ListingsDidLoad { records: 2 }"
        );
        assert_eq!(
            Action::ListingAdd(ListingRecord::demo(3)).summary(),
            "ListingAdd { id: 3, address: \"32 Valley Way, New York\" }"
        );
        assert_eq!(Action::CounterIncrement.summary(), "CounterIncrement");
    }

    #[test]
    fn test_names() {
        assert_eq!(Action::ListingsLoad.name(), "ListingsLoad");
        assert_eq!(Action::ListingAddDemo.name(), "ListingAddDemo");
        assert_eq!(Action::Quit.name(), "Quit");
    }
}
