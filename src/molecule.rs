// molecule.rs

/// Conversion factor used when the input geometry is given in Angstrom.
const BOHR_PER_ANGSTROM: f64 = 1.8897259886;

/// A single atom: element symbol, nuclear charge, and position in Bohr.
/// Immutable once constructed.
pub struct Atom {
    pub symbol: String,
    pub charge: u32,
    pub position: [f64; 3],
}

/// An ordered list of atoms. The atom order fixes the basis-function order
/// and with it the index convention of every matrix and tensor downstream.
pub struct Molecule {
    pub atoms: Vec<Atom>,
}

/// Map an element symbol to its nuclear charge.
/// # Arguments
///     `symbol`: str, element symbol as written in the input geometry.
fn nuclear_charge(symbol: &str) -> u32 {
    match symbol {
        "H" => 1,
        "He" => 2,
        "Li" => 3,
        "Be" => 4,
        "B" => 5,
        "C" => 6,
        "N" => 7,
        "O" => 8,
        "F" => 9,
        "Ne" => 10,
        _ => panic!("Element symbol \"{}\" is not recognized.", symbol),
    }
}

impl Molecule {
    /// Build a molecule from atom strings of the form "H 0.0 0.0 2.0".
    /// Coordinates are converted to Bohr when `unit` is "angstrom".
    /// # Arguments
    ///     `lines`: [String], one atom per entry, "symbol x y z".
    ///     `unit`: str, "bohr" or "angstrom".
    pub fn from_strings(lines: &[String], unit: &str) -> Self {
        let scale = match unit {
            "bohr" => 1.0,
            "angstrom" => BOHR_PER_ANGSTROM,
            _ => panic!("Unit must be \"bohr\" or \"angstrom\", got \"{}\".", unit),
        };

        let mut atoms = Vec::with_capacity(lines.len());
        for line in lines {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 4 {
                panic!("Atom string \"{}\" must be \"symbol x y z\".", line);
            }
            let symbol = parts[0].to_string();
            let charge = nuclear_charge(&symbol);
            let x: f64 = parts[1].parse().expect("Failed to parse x coordinate");
            let y: f64 = parts[2].parse().expect("Failed to parse y coordinate");
            let z: f64 = parts[3].parse().expect("Failed to parse z coordinate");
            atoms.push(Atom { symbol, charge, position: [x * scale, y * scale, z * scale] });
        }
        Self { atoms }
    }

    /// Total electron count of the neutral system, \sum_i Z_i.
    pub fn n_electrons(&self) -> usize {
        self.atoms.iter().map(|a| a.charge as usize).sum()
    }

    /// Number of doubly occupied spatial orbitals. The electron count must be
    /// even; a closed-shell reference is undefined otherwise.
    pub fn n_occupied(&self) -> usize {
        let n = self.n_electrons();
        assert!(n % 2 == 0, "Closed-shell occupation requires an even electron count, got {}.", n);
        n / 2
    }

    /// Nuclear-nuclear repulsion energy.
    /// E_nn = \sum_{i<j} Z_i Z_j / |R_i - R_j|.
    pub fn nuclear_repulsion(&self) -> f64 {
        let n = self.atoms.len();
        let mut e = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let a = &self.atoms[i];
                let b = &self.atoms[j];
                let dx = a.position[0] - b.position[0];
                let dy = a.position[1] - b.position[1];
                let dz = a.position[2] - b.position[2];
                let r = (dx * dx + dy * dy + dz * dz).sqrt();
                e += (a.charge as f64) * (b.charge as f64) / r;
            }
        }
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn h2(d: f64) -> Molecule {
        let lines = vec!["H 0.0 0.0 0.0".to_string(), format!("H 0.0 0.0 {}", d)];
        Molecule::from_strings(&lines, "bohr")
    }

    #[test]
    fn h2_electron_count() {
        let mol = h2(2.0);
        assert_eq!(mol.n_electrons(), 2);
        assert_eq!(mol.n_occupied(), 1);
    }

    #[test]
    fn nuclear_repulsion_is_inverse_distance() {
        // Two unit charges at distance d repel with exactly 1/d.
        let mol = h2(2.0);
        assert_abs_diff_eq!(mol.nuclear_repulsion(), 0.5, epsilon = 1e-15);
        let mol = h2(1.4);
        assert_abs_diff_eq!(mol.nuclear_repulsion(), 1.0 / 1.4, epsilon = 1e-15);
    }

    #[test]
    fn angstrom_geometry_is_converted() {
        let lines = vec!["H 0.0 0.0 0.0".to_string(), "H 0.0 0.0 1.0".to_string()];
        let mol = Molecule::from_strings(&lines, "angstrom");
        assert_abs_diff_eq!(mol.atoms[1].position[2], 1.8897259886, epsilon = 1e-10);
    }

    #[test]
    #[should_panic]
    fn odd_electron_count_is_rejected() {
        let lines = vec![
            "H 0.0 0.0 0.0".to_string(),
            "H 0.0 0.0 1.5".to_string(),
            "H 0.0 0.0 3.0".to_string(),
        ];
        Molecule::from_strings(&lines, "bohr").n_occupied();
    }

    #[test]
    #[should_panic]
    fn unknown_element_is_rejected() {
        let lines = vec!["Xx 0.0 0.0 0.0".to_string()];
        Molecule::from_strings(&lines, "bohr");
    }
}
