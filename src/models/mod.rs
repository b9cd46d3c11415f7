pub mod smoking;
pub mod workout;
