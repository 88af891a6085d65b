/// Screen views
///
/// Pure functions from game state to widgets. Nothing in here mutates the
/// session; every interaction is turned into a `Message`.

pub mod screens;
