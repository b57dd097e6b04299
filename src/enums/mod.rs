pub mod detail;
pub mod load;
pub mod tables;
