use proptest::prelude::*;

use car_simulation::{FieldBounds, Grid, Heading, Turn, Vehicle};

fn heading_strategy() -> impl Strategy<Value = Heading> {
    prop_oneof![
        Just(Heading::North),
        Just(Heading::East),
        Just(Heading::South),
        Just(Heading::West),
    ]
}

/// Command strings over the wire vocabulary plus a junk symbol, which the
/// engine must consume and ignore.
fn commands_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![Just('F'), Just('L'), Just('R'), Just('X')],
        0..24,
    )
    .prop_map(|symbols| symbols.into_iter().collect())
}

proptest! {
    #[test]
    fn right_then_left_returns_to_start(heading in heading_strategy()) {
        prop_assert_eq!(heading.turned(Turn::Right).turned(Turn::Left), heading);
        prop_assert_eq!(heading.turned(Turn::Left).turned(Turn::Right), heading);
    }

    #[test]
    fn four_quarter_turns_close_the_cycle(heading in heading_strategy()) {
        let mut current = heading;
        for _ in 0..4 {
            current = current.turned(Turn::Right);
        }
        prop_assert_eq!(current, heading);
    }

    #[test]
    fn moves_never_leave_the_field(
        width in 1i32..12,
        height in 1i32..12,
        seed_x in 0i32..144,
        seed_y in 0i32..144,
        heading in heading_strategy(),
        commands in commands_strategy(),
    ) {
        let bounds = FieldBounds::new(width, height);
        let (start_x, start_y) = (seed_x % width, seed_y % height);

        let mut car = Vehicle::new("Prop", start_x, start_y, heading, &commands);
        while car.has_pending_commands() {
            car.execute_next_command(bounds);
            let (x, y) = car.position();
            prop_assert!(bounds.contains(x, y), "car escaped to ({}, {})", x, y);
        }
    }

    #[test]
    fn empty_queue_never_mutates(
        start_x in 0i32..10,
        start_y in 0i32..10,
        heading in heading_strategy(),
        calls in 1usize..8,
    ) {
        let bounds = FieldBounds::new(10, 10);
        let mut car = Vehicle::new("Prop", start_x, start_y, heading, "");

        for _ in 0..calls {
            car.execute_next_command(bounds);
        }

        prop_assert_eq!(car.position(), (start_x, start_y));
        prop_assert_eq!(car.heading, heading);
    }

    #[test]
    fn collided_car_is_fully_frozen(
        start_x in 0i32..10,
        start_y in 0i32..10,
        heading in heading_strategy(),
        commands in commands_strategy(),
        calls in 1usize..8,
    ) {
        let bounds = FieldBounds::new(10, 10);
        let mut car = Vehicle::new("Prop", start_x, start_y, heading, &commands);
        car.mark_collision(1, vec!["Other".to_string()]);

        let queue_len = car.remaining_commands();
        for _ in 0..calls {
            car.execute_next_command(bounds);
        }

        prop_assert_eq!(car.position(), (start_x, start_y));
        prop_assert_eq!(car.heading, heading);
        prop_assert_eq!(car.remaining_commands(), queue_len);
        prop_assert_eq!(car.collision().unwrap().step, 1);
    }

    /// Command consumption accounting: a car that never collides consumes its
    /// whole queue; a car that collides at round `s` has executed exactly one
    /// command in every round up to `s` and none after.
    #[test]
    fn commands_consumed_match_rounds_survived(
        specs in proptest::collection::vec(
            (0i32..8, 0i32..8, heading_strategy(), commands_strategy()),
            1..6,
        ),
    ) {
        let mut grid = Grid::new(8, 8);
        for (index, (x, y, heading, commands)) in specs.iter().enumerate() {
            grid.add_vehicle(Vehicle::new(
                format!("Car{}", index),
                *x,
                *y,
                *heading,
                commands,
            ));
        }

        let initial: Vec<usize> = grid
            .vehicles()
            .iter()
            .map(|car| car.remaining_commands())
            .collect();

        grid.run_simulation();

        for (car, &initial_len) in grid.vehicles().iter().zip(&initial) {
            let consumed = initial_len - car.remaining_commands();
            match car.collision() {
                Some(record) => {
                    prop_assert_eq!(consumed, initial_len.min(record.step));
                }
                None => prop_assert_eq!(consumed, initial_len),
            }
        }
    }
}
