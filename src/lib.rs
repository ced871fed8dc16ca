pub mod app;
pub mod cmd;
pub mod config;
pub mod log;
pub mod peripheral;
pub mod report;
pub mod tracing;
pub mod util;

extern crate lazy_static;

#[cfg(any(test, feature = "testlib"))]
pub mod testlib;
