// basis.rs
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::molecule::Molecule;

/// A primitive Gaussian exp(-a r^2). The stored coefficient is the
/// contraction coefficient multiplied by the s-type primitive normalization
/// (2a/pi)^(3/4), so integrals never re-normalize.
#[derive(Debug, Clone, Copy)]
pub struct Primitive {
    pub exponent: f64,
    pub coefficient: f64,
}

/// A contracted s-type Gaussian centered on an atom.
#[derive(Debug, Clone)]
pub struct BasisFunction {
    pub center: [f64; 3],
    pub primitives: Vec<Primitive>,
}

/// One shell of a basis-set document, as stored on disk.
#[derive(Debug, Deserialize)]
pub struct ShellData {
    pub angular_momentum: u32,
    pub exponents: Vec<f64>,
    pub coefficients: Vec<f64>,
}

/// A named basis-set document, keyed by element symbol.
#[derive(Debug, Deserialize)]
pub struct BasisDocument {
    pub name: String,
    pub version: String,
    pub elements: HashMap<String, Vec<ShellData>>,
}

/// Path of the on-disk document for a basis-set name.
fn basis_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("basis")
        .join(format!("{}.json", name.to_lowercase()))
}

/// Load a basis-set document by name from the basis/ store. Read once at
/// startup; an unknown name is fatal.
/// # Arguments
///     `name`: str, basis-set name, e.g. "6-21G".
pub fn load_basis(name: &str) -> BasisDocument {
    let path = basis_path(name);
    let src = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Unknown basis set \"{}\" (no document at {}).", name, path.display()));
    serde_json::from_str(&src)
        .unwrap_or_else(|e| panic!("Malformed basis-set document {}: {}.", path.display(), e))
}

/// Expand a basis-set document onto a molecule. Functions are ordered by
/// atom, then by the document's shell order for that element; every matrix
/// and tensor downstream is indexed against this ordering. A missing element
/// entry or a shell beyond s-type is fatal.
/// # Arguments
///     `doc`: BasisDocument, the loaded basis-set definition.
///     `mol`: Molecule, atoms to center the shells on.
pub fn expand_basis(doc: &BasisDocument, mol: &Molecule) -> Vec<BasisFunction> {
    let mut functions = Vec::new();
    for atom in &mol.atoms {
        let shells = doc
            .elements
            .get(&atom.symbol)
            .unwrap_or_else(|| panic!("Basis set {} has no entry for element {}.", doc.name, atom.symbol));
        for shell in shells {
            if shell.angular_momentum != 0 {
                panic!("Only s-type shells are supported, got l = {}.", shell.angular_momentum);
            }
            let primitives = shell
                .exponents
                .iter()
                .zip(shell.coefficients.iter())
                .map(|(&e, &c)| Primitive {
                    exponent: e,
                    coefficient: c * (2.0 * e / std::f64::consts::PI).powf(0.75),
                })
                .collect();
            functions.push(BasisFunction { center: atom.position, primitives });
        }
    }
    functions
}
