// simulation_engine/mod.rs
pub mod grid;
pub mod vehicles;
