//! Periodic cell library
//!
//! This library provides the geometric primitives that electronic-structure codes need to
//! deal with periodic boundary conditions (lattice vectors, reciprocal vectors, minimum image
//! reduction and cutoff-driven image enumeration), together with two small numerical kernels:
//! recursive Cartesian/pure polynomial generation and a dense point-charge potential sum.

pub mod cell;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod moments;
pub mod nucpot;

pub use cell::{Cell, CellParameters, ImageRanges, smart_wrap};
pub use error::{CellError, Result};
pub use interfaces::Space;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
