pub mod draw;
pub mod transform;

pub use draw::{draw_line, draw_polyline, fill_ellipse, fill_polygon};
