use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily study streak embedded on the user document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreakState {
    pub current: u32,
    #[serde(default)]
    pub last_study_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn studied_on(&self, day: NaiveDate) -> bool {
        self.last_study_date == Some(day)
    }
}
