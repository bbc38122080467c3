//! Animated terminal playback of daily rankings.

pub mod layout;
pub mod render;
pub mod state;
pub mod terminal;

pub use layout::Layout;
pub use render::{frame_text, Renderer};
pub use state::{Action, Control, Playback};
pub use terminal::run;
