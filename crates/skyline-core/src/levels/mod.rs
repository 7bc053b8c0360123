pub mod catalog;
pub mod defs;
