pub mod effects;
pub mod sums;
pub mod token;
