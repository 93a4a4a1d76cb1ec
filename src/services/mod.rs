pub mod discovery;
pub mod history_store;
pub mod providers;
pub mod takeout;
