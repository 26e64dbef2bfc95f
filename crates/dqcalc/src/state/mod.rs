mod app_state;
mod form;
mod sensitivity;
mod tabs;

pub use app_state::*;
pub use form::*;
pub use sensitivity::*;
pub use tabs::*;
