// Constants

// Tolerances
pub const LATTICE_TOLERANCE: f64 = 1e-10; // Rank detection and orthogonality checks

// Minimum image search
pub const MIC_SEARCH_RADIUS: i64 = 1; // Half-width of the integer neighborhood per active axis
