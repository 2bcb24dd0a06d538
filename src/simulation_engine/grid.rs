use std::collections::HashMap;

use crate::simulation_engine::vehicles::Vehicle;

/// Dimensions of the simulation field. `Copy` on purpose: the grid snapshots
/// its bounds before each mutable sweep so cars can consult them while the
/// vehicle collection is being mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub width: i32,
    pub height: i32,
}

impl FieldBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }
}

/// The simulation field: fixed bounds plus the cars placed on it, kept in
/// insertion order. The grid is the sole owner of its cars and the only
/// caller of their mutating operations.
#[derive(Debug)]
pub struct Grid {
    bounds: FieldBounds,
    vehicles: Vec<Vehicle>,
}

impl Grid {
    /// Creates an empty field of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            bounds: FieldBounds::new(width, height),
            vehicles: Vec::new(),
        }
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    /// True iff `(x, y)` lies inside the field.
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// The placed cars, in insertion order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Places a car on the field. The car is silently dropped when its start
    /// cell is out of bounds or already taken by a previously added car; the
    /// collection is left unchanged in both cases. First come, first served:
    /// the check runs against current positions at add time only.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        if !self.is_within_bounds(vehicle.x, vehicle.y) {
            log::warn!(
                "cannot add {}: ({}, {}) is outside the {}x{} field",
                vehicle.name,
                vehicle.x,
                vehicle.y,
                self.bounds.width,
                self.bounds.height
            );
            return;
        }

        if let Some(occupant) = self
            .vehicles
            .iter()
            .find(|other| other.position() == vehicle.position())
        {
            log::warn!(
                "cannot add {}: ({}, {}) is taken by {}",
                vehicle.name,
                vehicle.x,
                vehicle.y,
                occupant.name
            );
            return;
        }

        self.vehicles.push(vehicle);
    }

    /// Runs the simulation to completion.
    ///
    /// The round count is the longest command queue at call time. Each round,
    /// every active car with pending commands executes exactly one command in
    /// insertion order; only after the whole sweep are cars grouped by cell,
    /// and every group of two or more marks its not-yet-collided occupants as
    /// collided at this round. Already-collided occupants still count as
    /// collided-with for the newcomers, but their own records stay untouched.
    pub fn run_simulation(&mut self) {
        let max_steps = self
            .vehicles
            .iter()
            .map(|vehicle| vehicle.remaining_commands())
            .max()
            .unwrap_or(0);

        let bounds = self.bounds;

        for step in 1..=max_steps {
            for vehicle in &mut self.vehicles {
                if vehicle.has_pending_commands() && !vehicle.is_collided() {
                    vehicle.execute_next_command(bounds);
                }
            }

            self.resolve_collisions(step);
        }

        log::info!(
            "simulation finished after {} rounds with {} cars ({} collided)",
            max_steps,
            self.vehicles.len(),
            self.vehicles.iter().filter(|v| v.is_collided()).count()
        );
    }

    /// Groups all cars by cell and marks fresh collisions for round `step`.
    /// Every car participates in the grouping, moved or not this round.
    fn resolve_collisions(&mut self, step: usize) {
        let mut occupancy: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            occupancy.entry(vehicle.position()).or_default().push(index);
        }

        let mut fresh_marks = Vec::new();
        for group in occupancy.values().filter(|group| group.len() > 1) {
            for &index in group {
                if self.vehicles[index].is_collided() {
                    continue;
                }
                let others: Vec<String> = group
                    .iter()
                    .filter(|&&other| other != index)
                    .map(|&other| self.vehicles[other].name.clone())
                    .collect();
                fresh_marks.push((index, others));
            }
        }

        for (index, others) in fresh_marks {
            log::debug!(
                "{} collides with {} at step {}",
                self.vehicles[index].name,
                others.join(","),
                step
            );
            self.vehicles[index].mark_collision(step, others);
        }
    }

    /// One display line per car, in insertion order. Stable across repeated
    /// calls: nothing in the report path mutates the field.
    pub fn status_report(&self) -> Vec<String> {
        self.vehicles
            .iter()
            .map(|vehicle| format!("- {}", vehicle.status_text()))
            .collect()
    }
}
