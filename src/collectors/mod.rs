pub mod device;
pub mod smartctl;
pub mod tools;
