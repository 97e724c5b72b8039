//! Input handling for the space scene
//!
//! - [`RocketController`] turns key presses into [`ActorCommand`](starfolio_core::ActorCommand)s
//! - [`PointerPicker`] turns cursor movement and clicks into per-body
//!   [`PointerEvent`](starfolio_core::PointerEvent)s

mod pointer;
mod rocket_controller;

pub use pointer::PointerPicker;
pub use rocket_controller::RocketController;
