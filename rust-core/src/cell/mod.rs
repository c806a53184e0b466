// Cell module: the lattice geometry core
// This module provides the periodic cell, coordinate transforms, minimum image reduction and
// cutoff-driven enumeration of periodic images

// ======================== MODULE DECLARATIONS ========================
pub mod cell_construction;
pub mod cell_images;
pub mod unit_cell;

mod _tests_unit_cell;

// ======================== CELL STRUCTURE ========================
pub use unit_cell::Cell;            // struct - periodic cell with 0..=3 active lattice vectors
// Cell impl methods:
//   new(vectors: &[Vector3<f64>]) -> Result<Cell>              - constructs cell, completes basis to rank 3
//   from_matrix(matrix: &DMatrix<f64>) -> Result<Cell>          - constructs cell from a k×3 matrix of rows
//   empty() -> Cell                                             - cell without periodic directions
//   update(&mut self, vectors: &[Vector3<f64>]) -> Result<()>   - atomically replaces the lattice vectors
//   nvec(&self) -> usize                                        - number of periodic directions
//   volume(&self) -> f64                                        - length/area/volume of the active cell (1 for nvec=0)
//   rvecs(&self) / gvecs(&self) -> &Matrix3<f64>                - completed real/reciprocal basis (rows)
//   basis(&self, space: Space) -> &Matrix3<f64>                 - basis of the given space
//   active_rvecs(&self) / active_gvecs(&self) -> Vec<Vector3<f64>> - first nvec rows
//   lengths(&self, space) / spacings(&self, space) -> &[f64]     - vector norms / inter-plane distances
//   rlengths, glengths, rspacings, gspacings                    - shorthands for the above
//   is_orthogonal(&self) -> bool                                - active vectors mutually perpendicular
//   to_frac(&self, cart) / to_cart(&self, frac) -> Vector3<f64> - coordinate transforms
//   g_lincomb(&self, coeffs: &[f64]) -> Result<Vector3<f64>>     - combination of reciprocal vectors
//   dot_rvecs(&self, cart) -> Vector3<f64>                      - dot products with the lattice vectors
//   add_rvec(&self, delta: &mut Vector3<f64>, r: &[i64]) -> Result<()> - adds an integer lattice translation

// ======================== PARAMETRIC CONSTRUCTION ========================
pub use cell_construction::CellParameters; // struct - lattice lengths and angles (radians)
// Cell impl methods:
//   from_parameters(lengths: &[f64], angles: &[f64]) -> Result<Cell> - builds 0D/1D/2D/3D cells from parameters
//   parameters(&self) -> CellParameters                         - recovers lengths and angles

// ======================== PERIODIC IMAGES ========================
pub use cell_images::{
    ImageIter,                      // struct - row-major odometer over ImageRanges
    ImageRanges,                    // struct - half-open integer ranges per active axis (len saturates, try_len checks)
    smart_wrap,                     // fn(i: i64, shape: i64, pbc: bool) -> Option<i64> - wraps one grid index
};
// Cell impl methods:
//   mic(&self, delta: &mut Vector3<f64>)                        - minimum image reduction in place
//   mic_distance(&self, a, b) -> f64                            - norm of the minimum image of b - a
//   get_ranges_rcut(&self, delta, rcut) -> Result<ImageRanges>  - conservative translation ranges for a cutoff
//   select_inside(&self, origin, center, rcut, ranges, shape, pbc, indexes) -> Result<usize> - selects images within rcut
