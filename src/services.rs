pub mod day;
pub mod favorites;
pub mod tasks;
pub mod transfer;
