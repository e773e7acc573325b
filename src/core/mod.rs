pub mod filters;
pub mod grid;
pub mod ops;
