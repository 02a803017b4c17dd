pub mod banner;
pub mod help_bar;
pub mod listing_row;
pub mod listing_table;
pub mod page;

pub use listing_core::Component;

pub use banner::{Banner, BannerProps, LOGO};
pub use help_bar::{HelpBar, HelpBarProps};
pub use listing_row::{ListingRows, RowProps, render_row};
pub use listing_table::{HEADERS, ListingTable, ListingTableProps};
pub use page::{Page, PageProps};
