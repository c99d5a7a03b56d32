//! Behaviour-driven step definitions driving the tour CLI scenarios.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::helpers::{StubProviders, TEST_TOKEN, Workspace};
use crate::tour::run_tour_with;
use crate::{ARG_INTERESTS, Cli, CliError, Command};

struct TourWorld {
    workspace: Workspace,
    locations: RefCell<Option<Utf8PathBuf>>,
    user_distances: RefCell<Option<Utf8PathBuf>>,
    unroutable: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl TourWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            locations: RefCell::new(None),
            user_distances: RefCell::new(None),
            unroutable: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, extra: &str) -> Vec<String> {
        let mut argv = vec!["itinera".to_owned(), "tour".to_owned()];
        if let Some(path) = self.locations.borrow().as_ref() {
            argv.extend(["--locations".to_owned(), path.to_string()]);
        }
        if let Some(path) = self.user_distances.borrow().as_ref() {
            argv.extend(["--user-distances".to_owned(), path.to_string()]);
        }
        argv.extend(["--mapbox-token".to_owned(), TEST_TOKEN.to_owned()]);
        argv.extend(extra.split_whitespace().map(str::to_owned));
        argv
    }

    fn output(&self) -> String {
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }
}

#[fixture]
fn world() -> TourWorld {
    TourWorld::new()
}

#[given("the sample data files exist on disk")]
fn sample_data_exists(#[from(world)] world: &TourWorld) {
    world
        .locations
        .replace(Some(world.workspace.write_catalogue()));
    world
        .user_distances
        .replace(Some(world.workspace.write_user_distances()));
}

#[given("no route reaches {title}")]
fn no_route_reaches(#[from(world)] world: &TourWorld, title: String) {
    world
        .unroutable
        .borrow_mut()
        .push(title.trim_matches('"').to_owned());
}

#[when("I run the tour command with {flags}")]
fn run_tour_command(#[from(world)] world: &TourWorld, flags: String) {
    let invocation = world.build_command_line(flags.trim_matches('"'));
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let factory = StubProviders {
        unroutable: world.unroutable.borrow().clone(),
    };
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Tour(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_tour_with(args, &factory, &mut *buffer)
        }
        other => panic!("expected tour command, found {other:?}"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &TourWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the output contains {text}")]
fn output_contains(#[from(world)] world: &TourWorld, text: String) {
    let expected = text.trim_matches('"');
    let stdout = world.output();
    assert!(stdout.contains(expected), "missing {expected:?} in:\n{stdout}");
}

#[then("the output does not contain {text}")]
fn output_lacks(#[from(world)] world: &TourWorld, text: String) {
    let unexpected = text.trim_matches('"');
    let stdout = world.output();
    assert!(!stdout.contains(unexpected), "unexpected {unexpected:?} in:\n{stdout}");
}

#[then("the command fails naming the interests option")]
fn command_fails_on_interests(#[from(world)] world: &TourWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::InvalidArgument { field, value, .. } => {
            assert_eq!(*field, ARG_INTERESTS);
            assert_eq!(value, "karaoke");
        }
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

macro_rules! register_tour_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/tour_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: TourWorld) {
            let _ = world;
        }
    };
}

register_tour_scenario!(tour_with_directions, "directions for every leg");
register_tour_scenario!(
    tour_survives_missing_route,
    "a leg without a route does not stop the walk"
);
register_tour_scenario!(
    tour_without_directions,
    "precomputed distances without directions"
);
register_tour_scenario!(tour_rejects_unknown_interest, "unknown interests are rejected");
