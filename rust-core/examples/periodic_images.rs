/// Example walking through the periodic cell API
///
/// Builds a few cells, reduces a displacement with the minimum image convention and lists the
/// periodic images of a grid point that fall inside a cutoff sphere.
use nalgebra::Vector3;
use periodic_cell::moments::{fill_pure_polynomials, get_npure_cumul};
use periodic_cell::Cell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Periodic cell walkthrough ===\n");

    // Example 1: A monoclinic cell from its parameters
    println!("1. Cell from lengths and angles:");
    let cell = Cell::from_parameters(&[4.0, 5.0, 6.0], &[90f64.to_radians(), 100f64.to_radians(), 90f64.to_radians()])?;
    println!("   Volume: {:.4}", cell.volume());
    println!("   Real spacings: {:?}", cell.rspacings());
    let params = cell.parameters();
    println!("   Recovered lengths: {:?}\n", params.lengths);

    // Example 2: A slab (two periodic directions)
    println!("2. Two-dimensional slab:");
    let slab = Cell::new(&[Vector3::new(3.0, 0.0, 0.0), Vector3::new(1.5, 2.6, 0.0)])?;
    println!("   Area: {:.4}", slab.volume());
    println!("   Completed third row: {:?}\n", slab.rvecs().row(2));

    // Example 3: Minimum image
    println!("3. Minimum image convention:");
    let mut delta = Vector3::new(7.3, -4.4, 2.0);
    cell.mic(&mut delta);
    println!("   Reduced displacement: [{:.3}, {:.3}, {:.3}]\n", delta.x, delta.y, delta.z);

    // Example 4: Images within a cutoff
    println!("4. Images within a cutoff:");
    let origin = Vector3::new(0.5, 0.5, 0.5);
    let center = Vector3::zeros();
    let rcut = 7.0;
    let ranges = cell.get_ranges_rcut(&(center - origin), rcut)?;
    let mut indexes = vec![0i64; ranges.len() * cell.nvec()];
    let n = cell.select_inside(&origin, &center, rcut, &ranges, &[8, 10, 12], &[true; 3], &mut indexes)?;
    println!("   {} of {} candidates inside rcut = {}", n, ranges.len(), rcut);
    for image in indexes[..3 * n].chunks(3).take(5) {
        println!("   grid index {:?}", image);
    }
    println!();

    // Example 5: Solid harmonics
    println!("5. Pure polynomials up to l = 2:");
    let mut output = vec![0.0; get_npure_cumul(2) - 1];
    output[..3].copy_from_slice(&[0.5, 0.2, -0.1]);
    fill_pure_polynomials(&mut output, 2)?;
    println!("   {:?}", output);

    Ok(())
}
