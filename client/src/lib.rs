//! Math Monsters: walk the path, meet monsters, beat them with arithmetic.
//!
//! The modules here are the platform-independent game core. The browser front end in the
//! binary owns the window, the GPU and the DOM, and drives [`session::Session`] once
//! per animation frame.

pub mod combat;
pub mod config;
pub mod input;
pub mod math;
pub mod monster;
pub mod particles;
pub mod player;
pub mod scene;
pub mod session;
pub mod world;
