pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod probe;
pub mod record;
pub mod runtime;
pub mod sampler;
pub mod state;
pub mod system;
pub mod ui;
pub mod visual;
