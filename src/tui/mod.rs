pub mod app;
pub mod blink;
pub mod detail;
pub mod field;
pub mod help;
pub mod input;
pub mod regex_cache;
pub mod render;
pub mod search;
pub mod status;
pub mod table;
pub mod theme;

pub use app::run;
