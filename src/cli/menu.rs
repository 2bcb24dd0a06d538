use std::io::{self, BufRead, Write};

use crate::simulation_engine::grid::Grid;
use crate::simulation_engine::vehicles::{Heading, Vehicle};

/// Stages of the interactive session. The menu walks this machine until the
/// user exits; the simulation engine knows nothing about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    InitialField,
    FieldOptions,
    AddCar,
    Simulation,
    SimulationFinished,
}

/// Line-based interactive menu over arbitrary input/output streams, so the
/// test suite can drive a whole session from a canned transcript.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs the session until the user exits or the input stream ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Auto Driving Car Simulation!\n")?;

        let mut stage = Stage::InitialField;
        let mut grid: Option<Grid> = None;

        loop {
            let next = match stage {
                Stage::InitialField => self.initial_field(&mut grid)?,
                Stage::FieldOptions => self.field_options()?,
                Stage::AddCar => self.add_car(&mut grid)?,
                Stage::Simulation => self.simulation(&mut grid)?,
                Stage::SimulationFinished => self.simulation_finished()?,
            };

            match next {
                Some(next_stage) => stage = next_stage,
                None => break,
            }
        }

        writeln!(self.output, "Thank you for running the simulation. Goodbye!")?;
        Ok(())
    }

    fn initial_field(&mut self, grid: &mut Option<Grid>) -> io::Result<Option<Stage>> {
        let Some(line) = self.prompt(
            "Please enter the width and height of the simulation field in x y format: ",
        )?
        else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();
        let parsed = match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), None) => w
                .parse::<i32>()
                .ok()
                .zip(h.parse::<i32>().ok()),
            _ => None,
        };

        match parsed {
            Some((width, height)) => {
                *grid = Some(Grid::new(width, height));
                writeln!(
                    self.output,
                    "You have created a field of {} x {}.",
                    width, height
                )?;
                Ok(Some(Stage::FieldOptions))
            }
            None => {
                writeln!(
                    self.output,
                    "Invalid input. Please enter valid integers for width and height."
                )?;
                Ok(Some(Stage::InitialField))
            }
        }
    }

    fn field_options(&mut self) -> io::Result<Option<Stage>> {
        writeln!(self.output, "Please choose from the following options: ")?;
        writeln!(self.output, "[1] Add a car to field")?;
        writeln!(self.output, "[2] Run simulation")?;

        let Some(choice) = self.prompt("")? else {
            return Ok(None);
        };

        match choice.trim() {
            "1" => Ok(Some(Stage::AddCar)),
            "2" => Ok(Some(Stage::Simulation)),
            _ => {
                writeln!(self.output, "Invalid input.")?;
                Ok(Some(Stage::FieldOptions))
            }
        }
    }

    fn add_car(&mut self, grid: &mut Option<Grid>) -> io::Result<Option<Stage>> {
        let Some(grid) = grid.as_mut() else {
            return Ok(Some(Stage::InitialField));
        };

        let Some(name) = self.prompt("Please enter the name of the car: ")? else {
            return Ok(None);
        };
        let name = name.trim().to_string();

        let Some(position_line) = self.prompt(&format!(
            "Please enter the initial position of car {} in x y Direction format: ",
            name
        ))?
        else {
            return Ok(None);
        };

        let Some(commands) = self.prompt(&format!(
            "Please enter the commands for car {}: ",
            name
        ))?
        else {
            return Ok(None);
        };

        match parse_position(&position_line) {
            Some((x, y, heading)) => {
                grid.add_vehicle(Vehicle::new(name, x, y, heading, commands.trim()));
            }
            None => {
                writeln!(
                    self.output,
                    "Invalid input. Please enter valid integers for initial position."
                )?;
                return Ok(Some(Stage::FieldOptions));
            }
        }

        if !grid.is_empty() {
            writeln!(self.output, "Your current list of cars are: ")?;
            self.print_report(grid)?;
        }
        Ok(Some(Stage::FieldOptions))
    }

    fn simulation(&mut self, grid: &mut Option<Grid>) -> io::Result<Option<Stage>> {
        let Some(grid) = grid.as_mut() else {
            return Ok(Some(Stage::InitialField));
        };

        grid.run_simulation();
        if !grid.is_empty() {
            writeln!(self.output, "After simulation, the result is: ")?;
            self.print_report(grid)?;
        }
        Ok(Some(Stage::SimulationFinished))
    }

    fn simulation_finished(&mut self) -> io::Result<Option<Stage>> {
        writeln!(self.output, "Please choose from the following options: ")?;
        writeln!(self.output, "[1] Start over")?;
        writeln!(self.output, "[2] Exit")?;

        let Some(choice) = self.prompt("")? else {
            return Ok(None);
        };

        match choice.trim() {
            "1" => Ok(Some(Stage::InitialField)),
            "2" => Ok(None),
            _ => {
                writeln!(self.output, "Invalid input.")?;
                Ok(Some(Stage::SimulationFinished))
            }
        }
    }

    fn print_report(&mut self, grid: &Grid) -> io::Result<()> {
        for line in grid.status_report() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    /// Writes a prompt and reads one line. `None` means the input stream
    /// ended, which exits the session.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        if !text.is_empty() {
            write!(self.output, "{}", text)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Parses an `x y Direction` line. The heading symbol must be one of the wire
/// literals `N`, `E`, `S`, `W`; anything else is malformed input here, before
/// any engine entity exists.
fn parse_position(line: &str) -> Option<(i32, i32, Heading)> {
    let mut parts = line.split_whitespace();
    let (x, y, heading) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let x = x.parse::<i32>().ok()?;
    let y = y.parse::<i32>().ok()?;
    let mut symbols = heading.chars();
    let heading = Heading::from_symbol(symbols.next()?)?;
    if symbols.next().is_some() {
        return None;
    }

    Some((x, y, heading))
}
