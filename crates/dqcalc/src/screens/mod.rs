pub mod calculator;
pub mod guide;
pub mod sensitivity;

use crate::components::Component;

/// Trait for full screen views
pub trait Screen: Component {
    /// Get the screen title
    fn title(&self) -> &str;
}
