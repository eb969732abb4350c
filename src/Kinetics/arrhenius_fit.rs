//! Least-squares fit of modified Arrhenius parameters to rate coefficient data.
//!
//! ln k = ln A + n·ln(T/T0) − Ea/(R·T) is linear in (ln A, n, Ea), so the fit is a
//! single linear least-squares solve (SVD) on the design matrix [1, ln(T/T0), −1/(R·T)].
use super::rate_models::{Arrhenius, KineticsError, R, RateCalculator, RateConditions, RateModel};
use log::debug;
use nalgebra::{DMatrix, DVector};

/// fit A, n, Ea to (T, k) points; T0 is the reference temperature of the result
pub fn fit_arrhenius(Tdata: &[f64], kdata: &[f64], T0: f64) -> Result<Arrhenius, KineticsError> {
    if Tdata.len() != kdata.len() {
        return Err(KineticsError::Construction(format!(
            "Tdata and kdata lengths differ: {} vs {}",
            Tdata.len(),
            kdata.len()
        )));
    }
    if Tdata.len() < 3 {
        return Err(KineticsError::Construction(
            "at least three points are needed to fit A, n and Ea".to_string(),
        ));
    }
    if Tdata.iter().chain(kdata.iter()).any(|v| !(*v > 0.0) || !v.is_finite()) {
        return Err(KineticsError::Construction(
            "temperatures and rate coefficients must be positive and finite".to_string(),
        ));
    }
    let design = DMatrix::from_fn(Tdata.len(), 3, |i, j| match j {
        0 => 1.0,
        1 => (Tdata[i] / T0).ln(),
        _ => -1.0 / (R * Tdata[i]),
    });
    let rhs = DVector::from_iterator(kdata.len(), kdata.iter().map(|k| k.ln()));
    let solution = design
        .svd(true, true)
        .solve(&rhs, 1e-14)
        .map_err(|e| KineticsError::Construction(format!("Arrhenius fit failed: {}", e)))?;
    let (lnA, n, Ea) = (solution[0], solution[1], solution[2]);
    debug!("fitted Arrhenius: ln A = {}, n = {}, Ea = {}", lnA, n, Ea);
    let Tmin = Tdata.iter().cloned().fold(f64::INFINITY, f64::min);
    let Tmax = Tdata.iter().cloned().fold(0.0, f64::max);
    Arrhenius::new(lnA.exp(), n, Ea, T0)?.with_T_range(Tmin, Tmax)
}

/// samples any rate model on `Tdata` and fits an Arrhenius expression to it.
/// Pressure-dependent models are sampled at `P`, Evans-Polanyi models at `dHrxn`.
pub fn fit_arrhenius_to_model(
    model: &RateModel,
    Tdata: &[f64],
    P: Option<f64>,
    dHrxn: Option<f64>,
) -> Result<Arrhenius, KineticsError> {
    let kdata = Tdata
        .iter()
        .map(|&T| {
            model.calculate_k(&RateConditions {
                T,
                P: if model.is_pressure_dependent() { P } else { None },
                dHrxn,
            })
        })
        .collect::<Result<Vec<f64>, KineticsError>>()?;
    fit_arrhenius(Tdata, &kdata, 1.0)
}
