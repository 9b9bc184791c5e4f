// Library target shared by the binary, the integration tests and the
// criterion benchmarks. main.rs only wires the terminal to `app::App`.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod session;
pub mod store;
pub mod ui;
