//! Text shown alongside the reveal

use crate::types::Stage;

impl Stage {
    /// Status line while a run is animating
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            Stage::Spinning => Some("Shuffling items..."),
            Stage::Slowing => Some("Making final selection..."),
            Stage::Result => Some("Preparing result..."),
            Stage::Idle | Stage::Celebration => None,
        }
    }
}

/// Label of the single control that starts or repeats a pick
pub fn control_label(stage: Stage, candidate_count: usize, has_selection: bool) -> &'static str {
    if candidate_count == 0 {
        "No items to select"
    } else if stage.is_active() {
        "Selecting..."
    } else if has_selection {
        "Pick Again"
    } else {
        "Choose For Me"
    }
}

/// Footer under the winning item
pub fn selection_summary(candidate_count: usize) -> String {
    match candidate_count {
        1 => "Selected from 1 option".to_string(),
        n => format!("Selected from {} options", n),
    }
}

/// Header over the picker
pub fn ready_summary(candidate_count: usize) -> String {
    match candidate_count {
        1 => "1 item ready for random selection".to_string(),
        n => format!("{} items ready for random selection", n),
    }
}
