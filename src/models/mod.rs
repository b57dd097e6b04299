pub mod bronze;
pub mod gold;
