//! Render-only square annotations.

/// A highlight the view draws on top of a square.
///
/// Overlays never live on the board; they are derived from game state for
/// each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// The currently selected piece.
    Selected,
    /// An empty square the selected piece may move to.
    Move,
    /// An occupied square the selected piece may capture on.
    Capture,
    /// A king that is currently attacked.
    Check,
}

impl Overlay {
    /// Returns the marker drawn for this overlay in plain text views.
    pub const fn marker(self) -> char {
        match self {
            Overlay::Selected => '[',
            Overlay::Move => '*',
            Overlay::Capture => 'x',
            Overlay::Check => '!',
        }
    }
}
