//! Display formatters: prices, percentages, magnitudes, date labels.

pub mod num;
pub mod time;

pub use num::{
    format_axis_price, format_large_number, format_percentage, format_price, PLACEHOLDER,
};
pub use time::{format_chart_date, format_update_time, parse_instant};
