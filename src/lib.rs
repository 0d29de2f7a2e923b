pub mod api;
pub mod cache;
pub mod dashboard;
pub mod debounce;
pub mod gui;
pub mod logging;
pub mod query;
pub mod session;
pub mod settings;
pub mod stores;
pub mod task;
