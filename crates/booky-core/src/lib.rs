pub mod app;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod io;
pub mod models;
pub mod navigation;
pub mod paths;
pub mod screen;
pub mod session;
pub mod template;
pub mod types;

pub use error::{BookyError, Result};
