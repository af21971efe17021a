//! Presentation subsystem.
//!
//! ```text
//! MintStatus → mode.rs (RenderMode + available Action) → view.rs (text / JSON)
//! ```
//!
//! No state is kept here; every frame is derived from the status alone.

pub mod mode;
pub mod view;

pub use mode::{Action, RenderMode};
pub use view::View;
