use std::path::PathBuf;

/// Wheel travel in points that counts as one notch.
const SCROLL_POINTS_PER_NOTCH: f32 = 50.0;

#[derive(Default)]
pub struct UiState {
    pub file_path: Option<PathBuf>,
    pub log_messages: Vec<String>,
    pub show_about: bool,
    /// Scroll travel not yet turned into whole notches.
    scroll_accum: f32,
}

impl UiState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Feed smooth scroll input, returning whole notches to apply.
    pub fn take_scroll_notches(&mut self, delta: f32) -> i32 {
        self.scroll_accum += delta;
        let notches = (self.scroll_accum / SCROLL_POINTS_PER_NOTCH).trunc();
        self.scroll_accum -= notches * SCROLL_POINTS_PER_NOTCH;
        notches as i32
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_accum = 0.0;
    }
}
