// main.rs
use std::time::Instant;

use rhf_rs::basis::{expand_basis, load_basis};
use rhf_rs::input::load_input;
use rhf_rs::integrals::build_ao_data;
use rhf_rs::molecule::Molecule;
use rhf_rs::scf::scf_cycle;
use rhf_rs::utils::{print_array1, print_array2, print_banner};

fn main() {
    let t_total = Instant::now();
    let input_path = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("Usage: cargo run <input.lua>");
            std::process::exit(1);
        }
    };

    let input = load_input(&input_path);
    // The basis-set document is read once at startup and reused per geometry.
    let doc = load_basis(&input.mol.basis);

    println!("Running RHF for {} geometries...", input.mol.r_list.len());
    println!("Basis set: {} (version {})", doc.name, doc.version);
    println!("SCF: {} fixed iterations, seed {}", input.scf.iterations, input.scf.seed);

    let mut e_last = f64::NAN;
    for (i, r) in input.mol.r_list.iter().copied().enumerate() {
        print_banner(&format!(" R = {} ", r));

        let molecule = Molecule::from_strings(&input.mol.geoms[i], &input.mol.unit);
        let basis = expand_basis(&doc, &molecule);

        let t_int = Instant::now();
        let ao = build_ao_data(&molecule, &basis);
        let d_int = t_int.elapsed();

        println!("{} basis functions, {} electrons", ao.nbf, ao.nelec);

        let t_scf = Instant::now();
        let state = scf_cycle(&ao, input.scf.iterations, input.scf.seed, input.write.verbose);
        let d_scf = t_scf.elapsed();

        if input.write.verbose {
            print_array2("Overlap matrix S", &ao.s);
            print_array2("MO coefficients C", &state.c);
        }
        print_array1("Orbital energies", &state.eps);

        println!("Integral assembly time: {:?}", d_int);
        println!("SCF time: {:?}", d_scf);
        println!("E(elec): {}", state.e_elec);
        println!("E(nuc):  {}", ao.enuc);
        println!("E(RHF):  {}", state.e);

        e_last = state.e;
    }

    // Trailing consistency check against the reference energy of the last
    // geometry; a deviation is fatal.
    if let Some(reference) = input.scf.reference {
        if (e_last - reference).abs() > 1e-8 {
            eprintln!("Final energy {} deviates from reference {} by more than 1e-8.", e_last, reference);
            std::process::exit(1);
        }
        println!("Final energy matches the reference {} to within 1e-8.", reference);
    }

    println!("\nTotal wall time: {:?}", t_total.elapsed());
}
