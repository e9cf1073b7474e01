//! Screen navigation state.
//!
//! The device cycles four views with two buttons (previous/next, wrapping at
//! both ends) plus a refresh action. Drawing is the presentation layer's
//! job; this module only decides which view is active and what data backs
//! it. Refresh is re-requesting the view: results are never cached.

use serde::{Deserialize, Serialize};

use crate::models::{AverageResult, SensorSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Current,
    TodayAverage,
    YesterdayAverage,
    WeeklyAverage,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Current
    }
}

impl Screen {
    pub fn next(self) -> Self {
        match self {
            Screen::Current => Screen::TodayAverage,
            Screen::TodayAverage => Screen::YesterdayAverage,
            Screen::YesterdayAverage => Screen::WeeklyAverage,
            Screen::WeeklyAverage => Screen::Current,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Current => Screen::WeeklyAverage,
            Screen::TodayAverage => Screen::Current,
            Screen::YesterdayAverage => Screen::TodayAverage,
            Screen::WeeklyAverage => Screen::YesterdayAverage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Current => "Current",
            Screen::TodayAverage => "Today",
            Screen::YesterdayAverage => "Yesterday",
            Screen::WeeklyAverage => "Week",
        }
    }
}

/// Data backing one screen at the moment it was requested.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum ScreenView {
    /// Live reading; an invalid sample must be shown as an explicit error
    /// state, never as stale numbers.
    Live(SensorSample),
    /// A trailing average, possibly the explicit no-data marker.
    Average(AverageResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Screen; 4] = [
        Screen::Current,
        Screen::TodayAverage,
        Screen::YesterdayAverage,
        Screen::WeeklyAverage,
    ];

    #[test]
    fn next_cycles_forward_with_wraparound() {
        let mut screen = Screen::Current;
        let mut visited = Vec::new();
        for _ in 0..4 {
            visited.push(screen);
            screen = screen.next();
        }
        assert_eq!(visited, ALL);
        assert_eq!(screen, Screen::Current);
    }

    #[test]
    fn prev_is_the_inverse_of_next() {
        for screen in ALL {
            assert_eq!(screen.next().prev(), screen);
            assert_eq!(screen.prev().next(), screen);
        }
    }
}
