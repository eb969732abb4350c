/// Rate coefficient models: tabulated data, Arrhenius family, pressure-dependent
/// Arrhenius, Chebyshev fits, third-body and falloff (Lindemann, Troe) forms.
/// Every model is an immutable value, evaluation is a pure function of T, P and ΔH_rxn.
/// # Examples
/// ```
/// use KiCurves::Kinetics::rate_models::{Arrhenius, RateCalculator, RateConditions, RateModel};
/// let model = RateModel::from(Arrhenius::new(1e13, 0.0, 100000.0, 1.0).unwrap());
/// let k = model.get_rate_coefficient(&RateConditions::at_T(1000.0)).unwrap();
/// assert!((k / 5.9792e7 - 1.0).abs() < 1e-4);
/// assert!(!model.is_pressure_dependent());
/// ```
pub mod rate_models;
/// Arrhenius parameters fitted to (T, k) data or to any rate model by linear least squares
///
///  # Examples
/// ```
/// use KiCurves::Kinetics::arrhenius_fit::fit_arrhenius;
/// let Tdata = vec![300.0, 600.0, 900.0, 1200.0];
/// let kdata: Vec<f64> = Tdata.iter().map(|T: &f64| 1e10 * (-50000.0 / (8.314472 * T)).exp()).collect();
/// let fitted = fit_arrhenius(&Tdata, &kdata, 1.0).unwrap();
/// assert!((fitted.Ea - 50000.0).abs() < 1e-3);
/// ```
pub mod arrhenius_fit;
