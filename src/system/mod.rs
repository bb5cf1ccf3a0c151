pub mod collector;
pub mod gpu;
pub mod history;
pub mod platform;
pub mod snapshot;
pub mod source;
