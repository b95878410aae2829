mod builder;
mod records;
mod shape;

pub use builder::{BuildConfig, BuildReport, FrameMasks, ShapeTally, create_masks_from_annotations};
pub use records::{AnnotationEntry, ShapeRecord, parse_annotations, read_annotations};
pub use shape::{Draw, Ellipse, Polygon, Polyline, Shape, ShapeKind, SkipReason, SkippedShape};
