pub mod date_range;
pub mod frequency;
pub mod location;
