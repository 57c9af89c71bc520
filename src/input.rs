// input.rs
use rlua::{Lua, Table, Value};
use std::fs;

// Storage for mol info.
pub struct MolOptions {
    pub basis: String,
    pub unit: String,
    pub r_list: Vec<f64>,
    pub geoms: Vec<Vec<String>>,
}

// Storage for SCF info.
pub struct ScfOptions {
    pub iterations: usize,
    pub seed: u64,
    pub reference: Option<f64>,
}

// Storage for output options.
pub struct WriteOptions {
    pub verbose: bool,
}

/// Storage for input file parameters.
pub struct Input {
    pub mol: MolOptions,
    pub scf: ScfOptions,
    pub write: WriteOptions,
}

/// Read input parameters from a lua file and assign to an Input object.
/// # Arguments
///     `path`: str, file path to input file.
pub fn load_input(path: &str) -> Input {
    let src = fs::read_to_string(path).unwrap();
    let lua = Lua::new();

    lua.load(&src).exec().unwrap();
    let globals = lua.globals();

    // Table headers.
    let mol_tbl: Table = globals.get("mol").unwrap();
    let scf_tbl: Table = globals.get("scf").unwrap();
    let write_tbl: Table = globals.get("write").unwrap();

    // Mol table.
    let basis: String = mol_tbl.get("basis").unwrap();
    let unit: String = mol_tbl.get("unit").unwrap();
    // Allow mol.r to be a number or table.
    let r_val: Value = mol_tbl.get("r").unwrap();
    let mut r_list: Vec<f64> = Vec::new();
    match r_val {
        // For a number simply add to r_list.
        Value::Number(x) => r_list.push(x),
        // For a table of r iterate over all values and add to r_list.
        Value::Table(t) => {
            for item in t.sequence_values::<f64>() {
                let r = item.unwrap();
                r_list.push(r);
            }
        }
        _ => {
            eprintln!("Number or table required by mol.r");
            std::process::exit(1);
        }
    }
    // Allow mol.atoms to be either a lua table or function.
    let atoms_val: Value = mol_tbl.get("atoms").unwrap();
    let geoms: Vec<Vec<String>> = match atoms_val {
        // If atoms is a lua table we have a static geometry and can duplicate
        // this geometry across all r (which for static geometry should be 1 value).
        Value::Table(t) => {
            let static_atoms = t.sequence_values::<String>().map(|x| x.unwrap()).collect::<Vec<_>>();
            vec![static_atoms; r_list.len()]
        }
        // If atoms is a lua function which returns a table we have a dynamic geometry.
        Value::Function(f) => {
            let mut out = Vec::with_capacity(r_list.len());
            for &r in &r_list {
                let tbl: Table = f.call(r).unwrap();
                let atoms = tbl.sequence_values::<String>().map(|x| x.unwrap()).collect::<Vec<_>>();
                out.push(atoms);
            }
            out
        }
        _ => {
            eprintln!("Table or function required by mol.atoms");
            std::process::exit(1);
        }
    };
    let mol = MolOptions { basis, unit, r_list, geoms };

    // SCF table. The iteration count is a fixed repetition count, not a
    // convergence budget; the seed defaults to 42 and is always printed by
    // the binary so runs can be reproduced.
    let iterations: usize = scf_tbl.get("iterations").unwrap();
    let seed: u64 = scf_tbl.get::<_, Option<u64>>("seed").unwrap().unwrap_or(42);
    let reference: Option<f64> = scf_tbl.get("reference").unwrap();
    let scf = ScfOptions { iterations, seed, reference };

    // Write table.
    let verbose: bool = write_tbl.get("verbose").unwrap();
    let write = WriteOptions { verbose };

    Input { mol, scf, write }
}
