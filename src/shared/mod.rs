pub mod names;
pub mod signing;
