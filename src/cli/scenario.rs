use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::simulation_engine::grid::Grid;
use crate::simulation_engine::vehicles::{Heading, Vehicle};

/// One car as declared in a scenario file. Heading uses the wire literal
/// (`N`, `E`, `S`, `W`), commands the literal symbol string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub heading: char,
    pub commands: String,
}

/// A complete scripted scenario: field dimensions plus the cars to place,
/// in placement order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub vehicles: Vec<VehicleSpec>,
}

/// Failure to load or interpret a scenario file.
#[derive(Debug)]
pub enum ScenarioError {
    Io(io::Error),
    Json(serde_json::Error),
    UnknownHeading { vehicle: String, symbol: char },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(err) => write!(f, "cannot read scenario file: {}", err),
            ScenarioError::Json(err) => write!(f, "scenario file is not valid JSON: {}", err),
            ScenarioError::UnknownHeading { vehicle, symbol } => {
                write!(f, "car {} has unknown heading '{}'", vehicle, symbol)
            }
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io(err) => Some(err),
            ScenarioError::Json(err) => Some(err),
            ScenarioError::UnknownHeading { .. } => None,
        }
    }
}

impl From<io::Error> for ScenarioError {
    fn from(err: io::Error) -> Self {
        ScenarioError::Io(err)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(err: serde_json::Error) -> Self {
        ScenarioError::Json(err)
    }
}

impl Scenario {
    /// Loads a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Builds the field and places every declared car in order. Placement
    /// follows the engine's normal rules: out-of-bounds or already-taken
    /// start cells are silently dropped. An unknown heading symbol is a file
    /// error, not an engine concern.
    pub fn build_grid(&self) -> Result<Grid, ScenarioError> {
        let mut grid = Grid::new(self.width, self.height);
        for spec in &self.vehicles {
            let heading =
                Heading::from_symbol(spec.heading).ok_or_else(|| ScenarioError::UnknownHeading {
                    vehicle: spec.name.clone(),
                    symbol: spec.heading,
                })?;
            grid.add_vehicle(Vehicle::new(
                spec.name.clone(),
                spec.x,
                spec.y,
                heading,
                &spec.commands,
            ));
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_grid_from_json() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "width": 10,
                "height": 10,
                "vehicles": [
                    { "name": "A", "x": 1, "y": 2, "heading": "N", "commands": "FFR" }
                ]
            }"#,
        )
        .unwrap();

        let grid = scenario.build_grid().unwrap();
        assert_eq!(grid.vehicles().len(), 1);
        assert_eq!(grid.vehicles()[0].status_text(), "A, (1, 2) N, FFR");
    }

    #[test]
    fn unknown_heading_is_an_error() {
        let scenario = Scenario {
            width: 5,
            height: 5,
            vehicles: vec![VehicleSpec {
                name: "A".to_string(),
                x: 0,
                y: 0,
                heading: 'Q',
                commands: "F".to_string(),
            }],
        };

        let err = scenario.build_grid().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::UnknownHeading { symbol: 'Q', .. }
        ));
    }

    #[test]
    fn placement_rules_still_apply() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "width": 5,
                "height": 5,
                "vehicles": [
                    { "name": "A", "x": 2, "y": 2, "heading": "N", "commands": "" },
                    { "name": "B", "x": 2, "y": 2, "heading": "S", "commands": "" },
                    { "name": "C", "x": 9, "y": 9, "heading": "E", "commands": "" }
                ]
            }"#,
        )
        .unwrap();

        let grid = scenario.build_grid().unwrap();
        assert_eq!(grid.vehicles().len(), 1);
        assert_eq!(grid.vehicles()[0].name, "A");
    }
}
