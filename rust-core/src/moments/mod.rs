// Moments module: recursive polynomial generators for basis-function angular parts

// ======================== MODULE DECLARATIONS ========================
pub mod polynomials;


// ======================== POLYNOMIAL GENERATORS ========================
pub use polynomials::{
    fill_cartesian_polynomials,     // fn(output: &mut [f64], lmax: usize) -> Result<Option<usize>> - monomials x^a y^b z^c, seeded with (x, y, z)
    fill_pure_polynomials,          // fn(output: &mut [f64], lmax: usize) -> Result<Option<usize>> - regular solid harmonics, seeded with (z, x, y)
    fill_pure_polynomials_array,    // fn(output: &mut [f64], lmax: usize, nrep: usize, stride: usize) -> Result<Option<usize>> - pure polynomials for many rows
    fill_radial_polynomials,        // fn(output: &mut [f64], lmax: usize) -> Result<Option<usize>> - powers r, r^2, ..., r^lmax
};

// ======================== SHELL SIZES ========================
pub use polynomials::{
    get_ncart,                      // fn(l: usize) -> usize - Cartesian functions in shell l
    get_ncart_cumul,                // fn(lmax: usize) -> usize - Cartesian functions in shells 0..=lmax
    get_npure,                      // fn(l: usize) -> usize - pure functions in shell l
    get_npure_cumul,                // fn(lmax: usize) -> usize - pure functions in shells 0..=lmax
};
