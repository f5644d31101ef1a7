pub mod balance;
pub mod complete;
pub mod config;
pub mod generate;
pub mod lookup;
