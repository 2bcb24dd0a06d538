// cli/mod.rs
pub mod menu;
pub mod scenario;
