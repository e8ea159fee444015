pub mod clock;
pub mod favorite;
pub mod history;
pub mod store;
pub mod task;
