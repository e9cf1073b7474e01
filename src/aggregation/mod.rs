pub mod config;
pub mod daily;
pub mod weekly;

pub use config::ValidRanges;
pub use daily::average_for_day;
pub use weekly::weekly_average;
