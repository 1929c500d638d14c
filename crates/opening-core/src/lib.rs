pub mod line;
pub mod model;
pub mod notation;
