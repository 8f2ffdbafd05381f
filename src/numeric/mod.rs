pub mod integrate;
pub mod spline;
