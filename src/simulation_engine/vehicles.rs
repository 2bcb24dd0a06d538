use std::collections::VecDeque;
use std::fmt;

use crate::simulation_engine::grid::FieldBounds;

/// Compass heading of a car. The four variants form a fixed clockwise cycle
/// (North → East → South → West → North); anything else is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Parses a heading from its wire symbol (`N`, `E`, `S`, `W`).
    pub fn from_symbol(symbol: char) -> Option<Heading> {
        match symbol {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }

    /// The wire symbol for this heading.
    pub fn symbol(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    /// The heading after one quarter-turn.
    pub fn turned(self, turn: Turn) -> Heading {
        match turn {
            Turn::Right => match self {
                Heading::North => Heading::East,
                Heading::East => Heading::South,
                Heading::South => Heading::West,
                Heading::West => Heading::North,
            },
            Turn::Left => match self {
                Heading::North => Heading::West,
                Heading::West => Heading::South,
                Heading::South => Heading::East,
                Heading::East => Heading::North,
            },
        }
    }

    /// Unit displacement of one forward move along this heading.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::South => (0, -1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Quarter-turn direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// A single movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    TurnLeft,
    TurnRight,
}

impl Command {
    /// Parses a command from its wire symbol (`F`, `L`, `R`). Unknown symbols
    /// yield `None`; the caller decides what to do with them.
    pub fn from_symbol(symbol: char) -> Option<Command> {
        match symbol {
            'F' => Some(Command::Forward),
            'L' => Some(Command::TurnLeft),
            'R' => Some(Command::TurnRight),
            _ => None,
        }
    }
}

/// Record of a car's one and only collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionRecord {
    /// 1-based simulation round at which the collision happened.
    pub step: usize,
    /// Names of the other occupants of the cell, in grid insertion order.
    pub with: Vec<String>,
}

/// A car on the simulation field.
///
/// The command queue keeps the raw symbols handed in at construction: an
/// unknown symbol still occupies a queue slot, is popped on its round, and is
/// ignored. This matters for the round count, which is derived from queue
/// lengths before any validation happens.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    commands: VecDeque<char>,
    collision: Option<CollisionRecord>,
}

impl Vehicle {
    /// Creates a car with its full initial state. `commands` is consumed
    /// front-to-back, one symbol per simulation round.
    pub fn new(name: impl Into<String>, x: i32, y: i32, heading: Heading, commands: &str) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            heading,
            commands: commands.chars().collect(),
            collision: None,
        }
    }

    /// Current cell.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Number of not-yet-executed command symbols.
    pub fn remaining_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    pub fn is_collided(&self) -> bool {
        self.collision.is_some()
    }

    pub fn collision(&self) -> Option<&CollisionRecord> {
        self.collision.as_ref()
    }

    /// Rotates the heading one quarter-turn through the N→E→S→W cycle.
    pub fn change_direction(&mut self, turn: Turn) {
        self.heading = self.heading.turned(turn);
    }

    /// Advances one cell along the current heading. A candidate cell outside
    /// the field is absorbed silently and the car stays put.
    pub fn advance(&mut self, bounds: FieldBounds) {
        let (dx, dy) = self.heading.offset();
        let (new_x, new_y) = (self.x + dx, self.y + dy);

        if !bounds.contains(new_x, new_y) {
            log::debug!(
                "{} cannot move to ({}, {}): out of bounds",
                self.name,
                new_x,
                new_y
            );
            return;
        }

        self.x = new_x;
        self.y = new_y;
    }

    /// Pops and executes the front command symbol. An empty queue or a
    /// collided car is a no-op; an unknown symbol is consumed and ignored.
    /// Exactly one symbol leaves the queue per call otherwise.
    pub fn execute_next_command(&mut self, bounds: FieldBounds) {
        if self.collision.is_some() {
            return;
        }
        let Some(symbol) = self.commands.pop_front() else {
            return;
        };

        match Command::from_symbol(symbol) {
            Some(Command::Forward) => self.advance(bounds),
            Some(Command::TurnLeft) => self.change_direction(Turn::Left),
            Some(Command::TurnRight) => self.change_direction(Turn::Right),
            None => {}
        }
    }

    /// Marks the car as collided at `step` with the given cars. The record is
    /// written at most once; later calls leave the first record intact.
    pub fn mark_collision(&mut self, step: usize, with: Vec<String>) {
        if self.collision.is_some() {
            return;
        }
        self.collision = Some(CollisionRecord { step, with });
    }

    /// One-line status. An active car reports position, heading, and the
    /// remaining command symbols (omitted when none are left); a collided
    /// car's report supersedes all of that with the collision details.
    pub fn status_text(&self) -> String {
        if let Some(record) = &self.collision {
            return format!(
                "{}, collides with {} at ({}, {}) at step {}",
                self.name,
                record.with.join(","),
                self.x,
                self.y,
                record.step
            );
        }

        let mut status = format!("{}, ({}, {}) {}", self.name, self.x, self.y, self.heading);
        if !self.commands.is_empty() {
            status.push_str(", ");
            status.extend(self.commands.iter());
        }
        status
    }
}
