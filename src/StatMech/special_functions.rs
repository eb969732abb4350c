//! Special functions and energy-grid helpers used by the statistical mechanics models:
//! modified Bessel functions I0 and I1 (polynomial approximations, Abramowitz & Stegun 9.8),
//! the complete elliptic integral of the first kind by the arithmetic-geometric mean,
//! and the discrete density-of-states convolution on a shared uniform energy grid.
use super::modes::StatMechError;
use std::f64::consts::PI;

/// AGM iteration stops when |A − G| falls below this
pub const AGM_TOLERANCE: f64 = 1e-6;

/// e^(−|x|)·I0(x), the exponentially scaled modified Bessel function of order zero.
/// Finite for every finite x.
pub fn besseli0e(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 3.75 {
        let y = (x / 3.75).powi(2);
        let i0 = 1.0
            + y * (3.5156229
                + y * (3.0899424 + y * (1.2067492 + y * (0.2659732 + y * (0.360768e-1 + y * 0.45813e-2)))));
        i0 * (-ax).exp()
    } else {
        let y = 3.75 / ax;
        (0.39894228
            + y * (0.1328592e-1
                + y * (0.225319e-2
                    + y * (-0.157565e-2
                        + y * (0.916281e-2
                            + y * (-0.2057706e-1
                                + y * (0.2635537e-1 + y * (-0.1647633e-1 + y * 0.392377e-2))))))))
            / ax.sqrt()
    }
}

/// e^(−|x|)·I1(x), the exponentially scaled modified Bessel function of order one
pub fn besseli1e(x: f64) -> f64 {
    let ax = x.abs();
    let ans = if ax < 3.75 {
        let y = (x / 3.75).powi(2);
        let i1 = ax
            * (0.5
                + y * (0.87890594
                    + y * (0.51498869 + y * (0.15084934 + y * (0.2658733e-1 + y * (0.301532e-2 + y * 0.32411e-3))))));
        i1 * (-ax).exp()
    } else {
        let y = 3.75 / ax;
        let tail = 0.2282967e-1 + y * (-0.2895312e-1 + y * (0.1787654e-1 - y * 0.420059e-2));
        let poly = 0.39894228
            + y * (-0.3988024e-1 + y * (-0.362018e-2 + y * (0.163801e-2 + y * (-0.1031555e-1 + y * tail))));
        poly / ax.sqrt()
    };
    if x < 0.0 { -ans } else { ans }
}

/// modified Bessel function of the first kind, order zero
pub fn besseli0(x: f64) -> f64 {
    besseli0e(x) * x.abs().exp()
}

/// modified Bessel function of the first kind, order one
pub fn besseli1(x: f64) -> f64 {
    besseli1e(x) * x.abs().exp()
}

/// complete elliptic integral of the first kind K(k) for modulus 0 <= k < 1
pub fn cellipk(k: f64) -> f64 {
    let mut A = 1.0;
    let mut G = ((1.0 - k) * (1.0 + k)).sqrt();
    while (A - G).abs() > AGM_TOLERANCE {
        let (A0, G0) = (A, G);
        A = 0.5 * (A0 + G0);
        G = (A0 * G0).sqrt();
    }
    PI / 2.0 / A
}

/// Checks that `Elist` is a usable energy grid: at least two finite points, starting at or
/// above zero, strictly increasing with a uniform spacing. Returns the spacing dE.
pub fn check_energy_grid(Elist: &[f64]) -> Result<f64, StatMechError> {
    if Elist.len() < 2 {
        return Err(StatMechError::Domain(format!(
            "energy grid needs at least 2 points, got {}",
            Elist.len()
        )));
    }
    if Elist.iter().any(|E| !E.is_finite()) || Elist[0] < 0.0 {
        return Err(StatMechError::Domain(
            "energy grid must be finite and non-negative".to_string(),
        ));
    }
    let dE = Elist[1] - Elist[0];
    if dE <= 0.0 {
        return Err(StatMechError::Domain("energy grid must be strictly increasing".to_string()));
    }
    for (i, pair) in Elist.windows(2).enumerate() {
        if ((pair[1] - pair[0]) - dE).abs() > 1e-6 * dE {
            return Err(StatMechError::Domain(format!(
                "energy grid must be uniform: step {} at index {} differs from {}",
                pair[1] - pair[0],
                i,
                dE
            )));
        }
    }
    Ok(dE)
}

/// Convolves two densities of states evaluated on the same grid `Elist`:
/// rho[r] = Σ_{s<=r} rho2[r−s]·rho1[r]·dE.
/// An operand without any positive entry is treated as absent, so the other one is returned
/// unchanged, and two absent operands give zeros.
pub fn convolve(rho1: &[f64], rho2: &[f64], Elist: &[f64]) -> Result<Vec<f64>, StatMechError> {
    let dE = check_energy_grid(Elist)?;
    let size = Elist.len();
    if rho1.len() != size || rho2.len() != size {
        return Err(StatMechError::Domain(format!(
            "densities of states must match the energy grid length {}, got {} and {}",
            size,
            rho1.len(),
            rho2.len()
        )));
    }
    let found1 = rho1.iter().any(|rho| *rho > 0.0);
    let found2 = rho2.iter().any(|rho| *rho > 0.0);
    let rho = match (found1, found2) {
        (true, true) => (0..size)
            .map(|r| {
                let partial: f64 = rho2[..=r].iter().sum();
                partial * rho1[r] * dE
            })
            .collect(),
        (true, false) => rho1.to_vec(),
        (false, true) => rho2.to_vec(),
        (false, false) => vec![0.0; size],
    };
    Ok(rho)
}
