pub mod controller;
pub mod loop_worker;
pub mod trigger;

pub use controller::LoggingController;
pub use trigger::HourlyTrigger;
