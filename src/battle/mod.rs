pub mod ai;
pub mod controller;
pub mod move_effects;
pub mod rng;
pub mod selection;
pub mod state;
pub mod targeting;
pub mod view;

#[cfg(test)]
mod tests;
