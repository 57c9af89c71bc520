// integrals.rs
use std::f64::consts::PI;

use ndarray::{Array2, Axis};
use ndarray::parallel::prelude::*;

use crate::basis::BasisFunction;
use crate::molecule::{Atom, Molecule};
use crate::{AoData, Array4};

/// Boys function F_0(t) = 1/2 sqrt(pi/t) erf(sqrt(t)), with the Taylor
/// expansion 1 - t/3 + t^2/10 near t = 0 where the closed form is 0/0.
fn boys0(t: f64) -> f64 {
    if t < 1e-12 {
        1.0 - t / 3.0 + t * t / 10.0
    } else {
        0.5 * (PI / t).sqrt() * libm::erf(t.sqrt())
    }
}

/// Squared distance between two points.
fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Exponent-weighted center of the Gaussian product theorem,
/// P = (a A + b B) / (a + b).
fn product_center(a: f64, ca: &[f64; 3], b: f64, cb: &[f64; 3]) -> [f64; 3] {
    let p = a + b;
    [
        (a * ca[0] + b * cb[0]) / p,
        (a * ca[1] + b * cb[1]) / p,
        (a * ca[2] + b * cb[2]) / p,
    ]
}

/// Overlap integral <a|b> between two contracted s-type Gaussians.
/// # Arguments
///     `a`: BasisFunction, bra function.
///     `b`: BasisFunction, ket function.
pub fn overlap(a: &BasisFunction, b: &BasisFunction) -> f64 {
    let rab2 = dist2(&a.center, &b.center);
    let mut acc = 0.0;
    for pa in &a.primitives {
        for pb in &b.primitives {
            let p = pa.exponent + pb.exponent;
            let mu = pa.exponent * pb.exponent / p;
            acc += pa.coefficient * pb.coefficient * (PI / p).powf(1.5) * (-mu * rab2).exp();
        }
    }
    acc
}

/// Kinetic-energy integral <a| -1/2 laplacian |b> between two contracted
/// s-type Gaussians: T = mu (3 - 2 mu R_AB^2) (pi/p)^{3/2} exp(-mu R_AB^2)
/// per primitive pair, with p = a + b and mu = ab/p.
/// # Arguments
///     `a`: BasisFunction, bra function.
///     `b`: BasisFunction, ket function.
pub fn kinetic(a: &BasisFunction, b: &BasisFunction) -> f64 {
    let rab2 = dist2(&a.center, &b.center);
    let mut acc = 0.0;
    for pa in &a.primitives {
        for pb in &b.primitives {
            let p = pa.exponent + pb.exponent;
            let mu = pa.exponent * pb.exponent / p;
            acc += pa.coefficient
                * pb.coefficient
                * mu
                * (3.0 - 2.0 * mu * rab2)
                * (PI / p).powf(1.5)
                * (-mu * rab2).exp();
        }
    }
    acc
}

/// Nuclear-attraction integral <a| sum_C -Z_C/|r - R_C| |b> summed over every
/// atom: per primitive pair and nucleus,
/// -Z_C (2 pi / p) exp(-mu R_AB^2) F_0(p |P - R_C|^2).
/// # Arguments
///     `a`: BasisFunction, bra function.
///     `b`: BasisFunction, ket function.
///     `atoms`: [Atom], nuclei whose attraction potentials are summed.
pub fn nuclear_attraction(a: &BasisFunction, b: &BasisFunction, atoms: &[Atom]) -> f64 {
    let rab2 = dist2(&a.center, &b.center);
    let mut acc = 0.0;
    for pa in &a.primitives {
        for pb in &b.primitives {
            let p = pa.exponent + pb.exponent;
            let mu = pa.exponent * pb.exponent / p;
            let pc = product_center(pa.exponent, &a.center, pb.exponent, &b.center);
            let pref = pa.coefficient * pb.coefficient * (2.0 * PI / p) * (-mu * rab2).exp();
            for atom in atoms {
                acc -= pref * (atom.charge as f64) * boys0(p * dist2(&pc, &atom.position));
            }
        }
    }
    acc
}

/// Two-electron Coulomb repulsion integral (ab|cd) in chemist's notation:
/// per primitive quadruple,
/// 2 pi^{5/2} / (p q sqrt(p + q)) exp(-mu_ab R_AB^2 - mu_cd R_CD^2)
/// F_0(p q / (p + q) |P - Q|^2).
/// # Arguments
///     `a`, `b`: BasisFunction, first charge distribution a(r1) b(r1).
///     `c`, `d`: BasisFunction, second charge distribution c(r2) d(r2).
pub fn coulomb(a: &BasisFunction, b: &BasisFunction, c: &BasisFunction, d: &BasisFunction) -> f64 {
    let rab2 = dist2(&a.center, &b.center);
    let rcd2 = dist2(&c.center, &d.center);
    let mut acc = 0.0;
    for pa in &a.primitives {
        for pb in &b.primitives {
            let p = pa.exponent + pb.exponent;
            let mu_ab = pa.exponent * pb.exponent / p;
            let pab = product_center(pa.exponent, &a.center, pb.exponent, &b.center);
            let cab = pa.coefficient * pb.coefficient * (-mu_ab * rab2).exp();
            for pc in &c.primitives {
                for pd in &d.primitives {
                    let q = pc.exponent + pd.exponent;
                    let mu_cd = pc.exponent * pd.exponent / q;
                    let pcd = product_center(pc.exponent, &c.center, pd.exponent, &d.center);
                    let ccd = pc.coefficient * pd.coefficient * (-mu_cd * rcd2).exp();
                    let t = p * q / (p + q) * dist2(&pab, &pcd);
                    acc += cab * ccd * 2.0 * PI.powf(2.5) / (p * q * (p + q).sqrt()) * boys0(t);
                }
            }
        }
    }
    acc
}

/// Assemble every AO integral the SCF needs. The one-electron matrices are
/// filled over the lower triangle and mirrored; the Coulomb tensor is
/// evaluated directly for every quadruple (rayon over the leading axis, one
/// independent element per quadruple); K is the exact index permutation
/// K[p,q,r,s] = J[p,r,q,s] and Q = 2J - K. Everything is computed exactly
/// once and never mutated afterward.
/// # Arguments
///     `mol`: Molecule, supplies nuclei and electron count.
///     `basis`: [BasisFunction], the expanded basis in its fixed order.
pub fn build_ao_data(mol: &Molecule, basis: &[BasisFunction]) -> AoData {
    let n = basis.len();

    let mut s = Array2::<f64>::zeros((n, n));
    let mut t = Array2::<f64>::zeros((n, n));
    let mut v = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let sij = overlap(&basis[i], &basis[j]);
            let tij = kinetic(&basis[i], &basis[j]);
            let vij = nuclear_attraction(&basis[i], &basis[j], &mol.atoms);
            s[(i, j)] = sij;
            s[(j, i)] = sij;
            t[(i, j)] = tij;
            t[(j, i)] = tij;
            v[(i, j)] = vij;
            v[(j, i)] = vij;
        }
    }
    let h = &t + &v;

    let mut eri_j = Array4::zeros((n, n, n, n));
    eri_j
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(p, mut jp)| {
            for q in 0..n {
                for r in 0..n {
                    for w in 0..n {
                        jp[(q, r, w)] = coulomb(&basis[p], &basis[q], &basis[r], &basis[w]);
                    }
                }
            }
        });

    let mut eri_k = Array4::zeros((n, n, n, n));
    for p in 0..n {
        for q in 0..n {
            for r in 0..n {
                for w in 0..n {
                    eri_k[(p, q, r, w)] = eri_j[(p, r, q, w)];
                }
            }
        }
    }

    let q = &eri_j * 2.0 - &eri_k;

    AoData {
        s,
        t,
        v,
        h,
        eri_j,
        eri_k,
        q,
        enuc: mol.nuclear_repulsion(),
        nbf: n,
        nelec: mol.n_electrons(),
    }
}
