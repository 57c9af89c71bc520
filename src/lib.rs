pub mod basis;
pub mod input;
pub mod integrals;
pub mod maths;
pub mod molecule;
pub mod scf;
pub mod utils;

use ndarray::Array2;
pub type Array4 = ndarray::Array<f64, ndarray::Ix4>; // 4D Array for two-electron tensors

// Struct for storing AO integrals. Built once by integrals::build_ao_data and
// read-only for the rest of the pipeline.
pub struct AoData {
    pub s: Array2<f64>, // AO overlap matrix
    pub t: Array2<f64>, // Kinetic-energy matrix
    pub v: Array2<f64>, // Nuclear-attraction matrix, summed over all nuclei
    pub h: Array2<f64>, // One electron core Hamiltonian, h = t + v
    pub eri_j: Array4,  // Coulomb tensor J[p,q,r,s] = (pq|rs) in chemist's notation
    pub eri_k: Array4,  // Exchange tensor K[p,q,r,s] = J[p,r,q,s]
    pub q: Array4,      // RHF effective two-electron tensor Q = 2J - K
    pub enuc: f64,      // Nuclear-nuclear repulsion energy
    pub nbf: usize,     // Number of basis functions
    pub nelec: usize,   // Number of electrons
}
