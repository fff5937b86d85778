//! Puzzle core: disks, towers, the solver and the playback state machine.
//! Nothing in here knows about windows or rendering.

pub mod animation;
pub mod disk;
pub mod error;
pub mod executor;
pub mod layout;
pub mod solver;
pub mod tower;
