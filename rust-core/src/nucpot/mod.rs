// Nucpot module: electrostatic potential of point charges on a set of grid points

// ======================== MODULE DECLARATIONS ========================
pub mod grid_potential;


// ======================== POTENTIAL EVALUATION ========================
pub use grid_potential::compute_grid_nucpot; // fn(charges, coordinates, points, output) -> Result<()> - dense Coulomb sum per point
