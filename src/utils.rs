// utils.rs
use ndarray::{Array1, Array2};

/// Print a labelled 2D array as a matrix.
/// # Arguments
///     `label`: str, heading line.
///     `a`: Array2, matrix to print.
pub fn print_array2(label: &str, a: &Array2<f64>) {
    println!("{}:", label);
    let (nr, nc) = a.dim();
    for i in 0..nr {
        for j in 0..nc {
            print!("{:>14.8}", a[(i, j)]);
        }
        println!();
    }
}

/// Print a labelled 1D array as a row.
/// # Arguments
///     `label`: str, heading line.
///     `a`: Array1, vector to print.
pub fn print_array1(label: &str, a: &Array1<f64>) {
    println!("{}:", label);
    for x in a.iter() {
        print!("{:>14.8}", x);
    }
    println!();
}

/// Print a banner line of = characters with a centered title.
/// # Arguments
///     `title`: str, text placed in the middle of the banner.
pub fn print_banner(title: &str) {
    let width: usize = 100;
    let pad = width.saturating_sub(title.len());
    let left = "=".repeat(pad / 2);
    let right = "=".repeat(pad - pad / 2);
    println!("{}{}{}", left, title, right);
}
