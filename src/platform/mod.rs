//! Platform abstraction layer
//!
//! The simulation never touches the browser directly. Front ends implement:
//! - `Surface`: the 2D drawing primitives the renderer needs
//! - `Frontend`: score/time readouts, arena visibility, key subscription
//!   and the end-of-session notification

use crate::sim::Rect;

/// Sprite images the renderer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Hero,
    Villain,
}

/// 2D drawing target
pub trait Surface {
    /// Erase the whole arena
    fn clear(&mut self, width: f32, height: f32);
    /// Draw a sprite image scaled into `rect`; a missing image draws nothing
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    /// Fill `rect` with a CSS color
    fn fill_rect(&mut self, rect: Rect, color: &str);
}

/// Write-only UI sink plus the input subscription switch
pub trait Frontend {
    fn set_score_text(&mut self, text: &str);
    fn set_time_text(&mut self, text: &str);
    /// Running shows the arena and hides the start control; idle does the reverse
    fn set_arena_visible(&mut self, visible: bool);
    /// Acquire (`true`) or release (`false`) keyboard listeners
    fn set_key_listening(&mut self, listening: bool);
    /// Blocking end-of-session notice; returns once acknowledged
    fn notify_game_over(&mut self, message: &str);
}
