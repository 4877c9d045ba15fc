pub type Real = f64;

// Cross-section lines live in the plane of the two projection axes.
pub type Point = cgmath::Point2<Real>;
pub type Vector = cgmath::Vector2<Real>;
