//! Behavioural tests for walking a `Tour` forwards and backwards.

use std::cell::RefCell;

use itinera_core::user_distances::default_origin;
use itinera_core::{Category, Leg, Location, Tour};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct TourWorld {
    tour: RefCell<Option<Tour>>,
    leg: RefCell<Option<Leg>>,
}

#[fixture]
fn world() -> TourWorld {
    TourWorld::default()
}

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

#[given("a tour over three stops")]
fn given_three_stops(world: &TourWorld) {
    let stops = ["One", "Two", "Three"]
        .into_iter()
        .map(|title| Location::new(title, 18.1, 120.6, Category::Landmarks))
        .collect();
    world.tour.replace(Some(Tour::new(default_origin(), stops)));
}

#[given("an empty tour")]
fn given_empty_tour(world: &TourWorld) {
    world
        .tour
        .replace(Some(Tour::new(default_origin(), Vec::new())));
}

#[when("I step forward {count} times")]
fn when_step_forward(world: &TourWorld, count: usize) {
    let mut tour = world.tour.borrow_mut();
    let tour = tour.as_mut().expect("tour should be set up");
    let mut leg = None;
    for _ in 0..count {
        leg = tour.next();
    }
    world.leg.replace(leg);
}

#[when("I step back once")]
fn when_step_back(world: &TourWorld) {
    let mut tour = world.tour.borrow_mut();
    let tour = tour.as_mut().expect("tour should be set up");
    world.leg.replace(tour.previous());
}

#[then("the current leg runs from {from} to {to}")]
fn then_leg_runs(world: &TourWorld, from: String, to: String) {
    let leg = world.leg.borrow();
    let leg = leg.as_ref().expect("a leg should be available");
    assert_eq!(leg.from.title, unquote(&from));
    assert_eq!(leg.to.title, unquote(&to));
}

#[then("the tour is at the origin")]
fn then_at_origin(world: &TourWorld) {
    let tour = world.tour.borrow();
    assert!(tour.as_ref().is_some_and(Tour::at_origin));
}

#[then("the tour is not at the origin")]
fn then_not_at_origin(world: &TourWorld) {
    let tour = world.tour.borrow();
    assert!(tour.as_ref().is_some_and(|tour| !tour.at_origin()));
}

#[then("no leg is available")]
fn then_no_leg(world: &TourWorld) {
    assert!(world.leg.borrow().is_none());
    let tour = world.tour.borrow();
    assert_eq!(tour.as_ref().map(Tour::progress), Some((0, 0)));
}

#[scenario(path = "tests/features/tour_navigation.feature", index = 0)]
fn forward_wraps_to_origin(world: TourWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/tour_navigation.feature", index = 1)]
fn backward_wraps_to_last_stop(world: TourWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/tour_navigation.feature", index = 2)]
fn empty_tour_stays_put(world: TourWorld) {
    let _ = world;
}
