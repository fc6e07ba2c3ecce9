//! Animation system for smooth member moves.
//!
//! A [`Tween`] describes one move and does nothing until it is started in a
//! [`TweenGroup`]; the group is advanced once per frame with the frame
//! timestamp.

/// Easing curves.
pub mod easing;
mod group;
/// Unstarted tween descriptions.
pub mod tween;

pub use easing::EasingFunction;
pub use group::{TweenGroup, TweenId};
pub use tween::{Destination, Tween};
