// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use retroclass_app::{
    Coord, Gender, Person, SeatCommand, SeatingSession, SeatingState, Seed, format_roster,
    parse_roster_table, parse_roster_text,
};
use retroclass_testkit::{RosterFaker, demo_roster, grid_with_locks, seat_names};

fn trio() -> Vec<Person> {
    vec![
        Person::new("Alex", Gender::Male, Some(1)),
        Person::new("Bao", Gender::Male, Some(1)),
        Person::new("Cho", Gender::Female, Some(2)),
    ]
}

fn name(value: &str) -> Option<String> {
    Some(value.to_owned())
}

#[test]
fn seed_42_places_trio_reproducibly() -> Result<()> {
    let seed = Seed::parse("42");
    assert_eq!(seed, Some(Seed::Number(42)));

    let mut state = SeatingState::empty(2, 2)?;
    state.set_roster(trio());
    assert_eq!(state.shuffle(seed.as_ref()), 3);
    assert_eq!(
        seat_names(&state),
        vec![name("Cho"), None, name("Bao"), name("Alex")]
    );

    let mut again = SeatingState::empty(2, 2)?;
    again.set_roster(trio());
    again.shuffle(seed.as_ref());
    assert_eq!(seat_names(&again), seat_names(&state));
    Ok(())
}

#[test]
fn seed_43_gives_a_different_permutation() -> Result<()> {
    let mut state = SeatingState::empty(2, 2)?;
    state.set_roster(trio());
    state.shuffle(Seed::parse("43").as_ref());
    assert_eq!(
        seat_names(&state),
        vec![None, name("Cho"), name("Alex"), name("Bao")]
    );
    Ok(())
}

#[test]
fn text_seeds_are_reproducible() -> Result<()> {
    let seed = Seed::parse("2025-2학기");
    let mut first = SeatingState::empty(4, 4)?;
    first.set_roster(demo_roster());
    first.shuffle(seed.as_ref());

    let mut second = SeatingState::empty(4, 4)?;
    second.set_roster(demo_roster());
    second.shuffle(seed.as_ref());

    assert_eq!(seat_names(&first), seat_names(&second));
    assert_eq!(seat_names(&first).iter().flatten().count(), 16);
    Ok(())
}

#[test]
fn locked_seat_keeps_alex_for_any_seed() -> Result<()> {
    for raw in ["1", "42", "eventA", "2025", "zzz"] {
        let mut state = SeatingState::empty(2, 2)?;
        state.set_roster(trio());
        state.place(Coord::new(0, 0), Some(trio()[0].clone()))?;
        state.toggle_lock(Coord::new(0, 0))?;

        state.shuffle(Seed::parse(raw).as_ref());
        assert_eq!(
            state.occupant(Coord::new(0, 0))?.map(|p| p.name.as_str()),
            Some("Alex"),
            "seed {raw}"
        );
    }
    Ok(())
}

#[test]
fn five_people_three_open_seats_places_first_three() -> Result<()> {
    let mut state = grid_with_locks(2, 2, &[Coord::new(1, 1)])?;
    state.set_roster(
        ["P1", "P2", "P3", "P4", "P5"]
            .into_iter()
            .map(|n| Person::new(n, Gender::Unknown, None))
            .collect(),
    );

    assert_eq!(state.shuffle(Some(&Seed::Number(8))), 3);
    let mut placed: Vec<String> = seat_names(&state).into_iter().flatten().collect();
    placed.sort();
    assert_eq!(placed, vec!["P1", "P2", "P3"]);
    assert!(state.occupant(Coord::new(1, 1))?.is_none());
    Ok(())
}

#[test]
fn seven_people_three_groups() {
    let mut state = SeatingState::default();
    state.set_roster(RosterFaker::new(3).roster(7));
    assert!(state.auto_assign_groups(3));
    let groups: Vec<u32> = state.roster().iter().filter_map(|p| p.group).collect();
    assert_eq!(groups, vec![1, 2, 3, 1, 2, 3, 1]);
}

#[test]
fn pasted_text_and_table_import_together() -> Result<()> {
    let mut people = parse_roster_table(&[
        vec!["name", "gender", "group"],
        vec!["Hana", "F", "4"],
    ]);
    people.extend(parse_roster_text("Alex (m) 1\nBao, 남자, 2\n\n"));

    let mut session = SeatingSession::default();
    session.dispatch(SeatCommand::ApplyRoster(people))?;
    assert_eq!(
        session.seating.roster(),
        &[
            Person::new("Hana", Gender::Female, Some(4)),
            Person::new("Alex", Gender::Male, Some(1)),
            Person::new("Bao", Gender::Male, Some(2)),
        ]
    );
    Ok(())
}

#[test]
fn faker_rosters_survive_format_and_parse() {
    let mut faker = RosterFaker::new(99);
    let people = faker.roster(40);
    assert_eq!(parse_roster_text(&format_roster(&people)), people);
}

#[test]
fn session_walkthrough_matches_page_flow() -> Result<()> {
    let mut session = SeatingSession::default();
    session.dispatch(SeatCommand::ApplyRoster(demo_roster()))?;
    session.dispatch(SeatCommand::Shuffle(Seed::parse("1024")))?;
    let shuffled = seat_names(&session.seating);
    assert_eq!(shuffled.iter().flatten().count(), 16);

    session.dispatch(SeatCommand::ToggleLock(Coord::new(0, 0)))?;
    session.dispatch(SeatCommand::Shuffle(Seed::parse("other")))?;
    assert_eq!(seat_names(&session.seating)[0], shuffled[0]);

    let before_resize = seat_names(&session.seating);
    session.dispatch(SeatCommand::Resize { rows: 5, cols: 4 })?;
    let after_resize = seat_names(&session.seating);
    assert_eq!(after_resize[..16], before_resize[..]);
    assert!(after_resize[16..].iter().all(Option::is_none));

    session.dispatch(SeatCommand::Reset)?;
    assert!(seat_names(&session.seating).iter().all(Option::is_none));
    assert_eq!(session.seating.roster().len(), 16);
    Ok(())
}
