pub mod pan;
pub mod viewport;

pub use pan::{Bounds, Pan};
pub use viewport::{visible_ids, Rect};
