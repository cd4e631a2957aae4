pub mod compatibility;
