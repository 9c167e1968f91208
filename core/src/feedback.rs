//! Audio feedback categories for key presses.

use crate::keycodes::{KeyCodeTable, LINE_FEED};
use serde::{Deserialize, Serialize};

/// Key click sound to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Space,
    Return,
    Delete,
    Standard,
}

/// Map a key code to its click category. Total; unknown codes are `Standard`.
pub fn classify(code: i32, codes: &KeyCodeTable) -> FeedbackCategory {
    if code == codes.space() {
        FeedbackCategory::Space
    } else if code == codes.done() || code == LINE_FEED {
        FeedbackCategory::Return
    } else if code == codes.delete() {
        FeedbackCategory::Delete
    } else {
        FeedbackCategory::Standard
    }
}
