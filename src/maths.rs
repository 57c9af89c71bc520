// maths.rs
use ndarray::{Array1, Array2};
use ndarray_linalg::{Eigh, UPLO};

/// Loewdin symmetric orthogonalizer X = S^{-1/2} of a real symmetric
/// positive-definite matrix. A numerically singular S makes the inverse
/// square root blow up and the run abort downstream; there is no null-space
/// projection here.
/// # Arguments
///     `s`: Array2, symmetric matrix, only the lower triangle is referenced.
pub fn loewdin_x(s: &Array2<f64>) -> Array2<f64> {
    // S = U \Lambda U^T
    let (lambdas, u) = s.eigh(UPLO::Lower).unwrap();
    // \Lambda^{-1/2}
    let invsqrt: Array1<f64> = lambdas.mapv(|x| 1.0 / x.sqrt());
    let d = Array2::from_diag(&invsqrt);
    // X = U \Lambda^{-1/2} U^T
    u.dot(&d).dot(&u.t())
}

/// Solve the real symmetric generalized eigenproblem F C = S C e via the
/// Loewdin orthogonalizer, with eigenvalues in ascending order. The
/// symmetric solver is used throughout; F and S must be symmetric.
/// # Arguments
///     `f`: Array2, symmetric matrix, only the lower triangle is referenced.
///     `s`: Array2, symmetric metric matrix, only the lower triangle is
///     referenced.
pub fn general_evp(f: &Array2<f64>, s: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    // X = S^{-1/2}
    let x = loewdin_x(s);
    // \tilde{F} = X^T F X.
    let ft = x.t().dot(f).dot(&x);
    // \tilde{F} U = U \epsilon.
    let (epsilon, u) = ft.eigh(UPLO::Lower).unwrap();
    // C = X U.
    let c = x.dot(&u);
    (epsilon, c)
}
