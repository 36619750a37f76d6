pub mod smart;
pub mod usage;
