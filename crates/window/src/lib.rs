//! Fixed-capacity sample window and its snapshot publisher.

pub mod shared;
pub mod window;

pub use shared::{SharedWindow, WindowReader};
pub use window::SlidingWindow;
