//! Hover tooltip showing a file's description.

use serde::Serialize;

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Position {
    /// A position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Identifies one scheduled auto-hide. Only the latest token is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Tooltip state with a single pending auto-hide timer.
#[derive(Debug, Default)]
pub struct TooltipController {
    visible: bool,
    text: String,
    position: Position,
    pending: Option<TimerToken>,
    issued: u64,
}

impl TooltipController {
    /// A hidden tooltip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `description` at `position` and return the token for the new
    /// auto-hide timer. Any earlier pending timer is superseded.
    pub fn hover_enter(&mut self, description: &str, position: Position) -> TimerToken {
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.pending = Some(token);
        self.text = description.to_string();
        self.position = position;
        self.visible = true;
        token
    }

    /// Hide immediately and clear the text.
    pub fn hover_leave(&mut self, position: Position) {
        self.visible = false;
        self.text.clear();
        self.position = position;
    }

    /// An auto-hide timer elapsed. Returns whether it was current and hid
    /// the tooltip.
    pub fn timer_fired(&mut self, token: TimerToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        self.visible = false;
        true
    }

    /// Hide and forget any pending timer.
    pub fn reset(&mut self) {
        self.visible = false;
        self.text.clear();
        self.pending = None;
    }

    /// Whether the tooltip is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the tooltip was last placed.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The pending auto-hide timer, if any.
    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }
}
