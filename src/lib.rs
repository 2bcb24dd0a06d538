//! Auto-driving car simulation.
//!
//! Cars are placed on a bounded integer grid, each with a heading and a
//! pre-assigned command string (`F` forward, `L` left, `R` right). The
//! simulation advances all cars in lockstep rounds, one command per car per
//! round, and marks cars that end a round on the same cell as collided.
//! Collisions are terminal: a collided car never moves again.
//!
//! The engine lives in [`simulation_engine`]; the interactive menu and the
//! scenario-file loader in [`cli`] are a thin harness on top of it.

pub mod cli;
pub mod simulation_engine;

pub use simulation_engine::grid::{FieldBounds, Grid};
pub use simulation_engine::vehicles::{CollisionRecord, Command, Heading, Turn, Vehicle};
