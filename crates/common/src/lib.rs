//! Shared types used by every flightsim crate.

mod types;

pub use types::{RigidBody, Transform};
