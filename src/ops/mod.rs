pub mod add_line;
pub mod dates;
pub mod filter;
pub mod tags;
pub mod validate;
