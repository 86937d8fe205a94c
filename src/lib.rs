// Crate root library declaration and module exports.
pub mod calendars;
pub mod cli;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod model;
