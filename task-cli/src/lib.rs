pub mod config;
pub mod console;
pub mod input;
pub mod menu;

pub use menu::{App, MenuOption};
