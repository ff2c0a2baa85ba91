//! **mazer** is a perfect-maze generation, solving and visualisation library.
//!
//! A `Grid` of walled cells is carved into a perfect maze (a spanning tree
//! of passages - exactly one route between any two cells) by the randomized
//! recursive backtracker, then solved entrance-to-exit by a depth-first
//! search. Both phases stream draw events through an injected `Renderer`,
//! so the algorithms run headless in tests and paint images in the driver.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod renderers;
pub mod units;
