pub mod format;
pub mod table;

pub use format::{format_date, format_price};
pub use table::{Align, Table};
