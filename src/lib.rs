//! Simulation core for a top-down arena shooter.
//!
//! The core is a pure, RNG-injected `tick` over an owned [`entities::GameState`].
//! Renderers read a [`snapshot::RenderSnapshot`]; they never write back.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod motion;
pub mod snapshot;
pub mod spawner;
pub mod store;
