//! # Rate Models Module
//!
//! ## Aim
//! Evaluation of reaction rate coefficients k(T), k(T, P) and k(T, ΔH_rxn) for the fixed family of
//! kinetics expressions used by chemical kinetics databases. Everything is in SI units
//! (K, Pa, J/mol, mol/m³/s).
//!
//! ## Main Data Structures and Logic
//! - `TabulatedRate`: discrete (T, k) points, interpolated in the (1/T, ln k) plane
//! - `Arrhenius`: k = A·(T/T0)^n·exp(−Ea/RT)
//! - `ArrheniusEP`: Arrhenius with Evans-Polanyi activation energy Ea = E0 + α·ΔH_rxn
//! - `MultiArrhenius`: sum of Arrhenius expressions
//! - `PDepArrhenius`: Arrhenius expressions at tabulated pressures, log-log interpolated in P
//! - `Chebyshev`: 10^(ΣΣ c_ij·T_i(Tr)·T_j(Pr)) on reduced coordinates
//! - `ThirdBody`, `Lindemann`, `Troe`: bath-gas concentration and falloff forms
//! - `RateModel`: closed enum over all of the above, dispatching `RateCalculator` via enum_dispatch
//!
//! ## Usage
//! ```rust, ignore
//! let model = RateModel::from_serde(json!({"type": "Arrhenius", "A": 1e13, "n": 0.0, "Ea": 1e5}))?;
//! let k = model.get_rate_coefficient(&RateConditions::at_T(1000.0))?;
//! ```
//!
//! ## Validity ranges
//! Every model may carry Tmin/Tmax (and Pmin/Pmax for pressure-dependent models).
//! `get_rate_coefficient` reports a `KineticsError::Range` outside them, `calculate_k`
//! evaluates the expression anyway. Non-positive T or P is always a `KineticsError::Domain`.

use enum_dispatch::enum_dispatch;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// universal gas constant, J/(mol·K)
pub const R: f64 = 8.314472;

#[derive(Debug, Error, PartialEq)]
pub enum KineticsError {
    #[error("Invalid kinetics parameters: {0}")]
    Construction(String),
    #[error("Invalid evaluation argument: {0}")]
    Domain(String),
    #[error("{quantity} = {value} is outside the valid range [{min}, {max}]")]
    Range {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// independent variables of a rate coefficient evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConditions {
    /// temperature, K
    pub T: f64,
    /// pressure, Pa
    pub P: Option<f64>,
    /// enthalpy of reaction, J/mol
    pub dHrxn: Option<f64>,
}

impl RateConditions {
    pub fn at_T(T: f64) -> Self {
        Self {
            T,
            P: None,
            dHrxn: None,
        }
    }
    pub fn at_TP(T: f64, P: f64) -> Self {
        Self {
            T,
            P: Some(P),
            dHrxn: None,
        }
    }
    pub fn with_dHrxn(mut self, dHrxn: f64) -> Self {
        self.dHrxn = Some(dHrxn);
        self
    }
}

fn construction<T>(msg: String) -> Result<T, KineticsError> {
    Err(KineticsError::Construction(msg))
}

fn check_finite(name: &str, value: f64) -> Result<(), KineticsError> {
    if value.is_finite() {
        Ok(())
    } else {
        construction(format!("{} must be finite, got {}", name, value))
    }
}

fn check_strictly_increasing(name: &str, values: &[f64]) -> Result<(), KineticsError> {
    if values.is_empty() {
        return construction(format!("{} must not be empty", name));
    }
    for v in values {
        check_finite(name, *v)?;
        if *v <= 0.0 {
            return construction(format!("{} must be positive, got {}", name, v));
        }
    }
    if values.windows(2).any(|w| w[1] <= w[0]) {
        return construction(format!("{} must be strictly increasing", name));
    }
    Ok(())
}

/// checks an optional [min, max] validity range
fn check_bounds(name: &str, min: Option<f64>, max: Option<f64>) -> Result<(), KineticsError> {
    for bound in min.iter().chain(max.iter()) {
        check_finite(name, *bound)?;
        if *bound < 0.0 {
            return construction(format!("{} bound must not be negative, got {}", name, bound));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return construction(format!("{} range is inverted: {} > {}", name, min, max));
        }
    }
    Ok(())
}

fn check_within(
    quantity: &'static str,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), KineticsError> {
    let lo = min.unwrap_or(0.0);
    let hi = max.unwrap_or(f64::INFINITY);
    if value < lo || value > hi {
        return Err(KineticsError::Range {
            quantity,
            value,
            min: lo,
            max: hi,
        });
    }
    Ok(())
}

fn check_temperature(T: f64) -> Result<(), KineticsError> {
    if !(T > 0.0) || !T.is_finite() {
        return Err(KineticsError::Domain(format!(
            "temperature must be positive and finite, got {}",
            T
        )));
    }
    Ok(())
}

fn required_pressure(conditions: &RateConditions) -> Result<f64, KineticsError> {
    match conditions.P {
        Some(P) if P > 0.0 && P.is_finite() => Ok(P),
        Some(P) => Err(KineticsError::Domain(format!(
            "pressure must be positive and finite, got {}",
            P
        ))),
        None => Err(KineticsError::Domain(
            "pressure is required by a pressure-dependent model".to_string(),
        )),
    }
}

/// ideal-gas bath gas concentration [M] = P/(RT), mol/m³
pub fn bath_gas_concentration(T: f64, P: f64) -> f64 {
    P / (R * T)
}

/// common interface of all kinetics expressions
#[enum_dispatch]
pub trait RateCalculator {
    /// checks parameters after construction or deserialization
    fn validate(&self) -> Result<(), KineticsError>;
    /// (Tmin, Tmax) in K, None means unbounded
    fn T_range(&self) -> (Option<f64>, Option<f64>);
    /// (Pmin, Pmax) in Pa, None means unbounded
    fn P_range(&self) -> (Option<f64>, Option<f64>) {
        (None, None)
    }
    fn is_pressure_dependent(&self) -> bool {
        false
    }
    /// rate coefficient in SI units, without the validity range check
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError>;
}

/////////////////////////TABULATED DATA///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabulatedRate {
    /// temperatures, K, strictly increasing
    pub Tdata: Vec<f64>,
    /// rate coefficients at each temperature, SI units
    pub kdata: Vec<f64>,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl TabulatedRate {
    pub fn new(Tdata: Vec<f64>, kdata: Vec<f64>) -> Result<Self, KineticsError> {
        let tabulated = Self {
            Tdata,
            kdata,
            Tmin: None,
            Tmax: None,
        };
        tabulated.validate()?;
        Ok(tabulated)
    }
    /// interpolation in the (1/T, ln k) plane, clamped to the end points outside the table
    pub fn K_const(&self, T: f64) -> f64 {
        let last = self.Tdata.len() - 1;
        if T <= self.Tdata[0] {
            return self.kdata[0];
        }
        if T >= self.Tdata[last] {
            return self.kdata[last];
        }
        // Tdata[i] <= T < Tdata[i + 1]
        let i = self.Tdata.partition_point(|&t| t <= T) - 1;
        if self.Tdata[i] == T {
            return self.kdata[i];
        }
        let (T_lo, T_hi) = (self.Tdata[i], self.Tdata[i + 1]);
        let (k_lo, k_hi) = (self.kdata[i], self.kdata[i + 1]);
        let w = (1.0 / T - 1.0 / T_lo) / (1.0 / T_hi - 1.0 / T_lo);
        (k_lo.ln() + w * (k_hi.ln() - k_lo.ln())).exp()
    }
}

impl RateCalculator for TabulatedRate {
    fn validate(&self) -> Result<(), KineticsError> {
        check_strictly_increasing("Tdata", &self.Tdata)?;
        if self.kdata.len() != self.Tdata.len() {
            return construction(format!(
                "Tdata and kdata lengths differ: {} vs {}",
                self.Tdata.len(),
                self.kdata.len()
            ));
        }
        for k in &self.kdata {
            check_finite("kdata", *k)?;
            if *k <= 0.0 {
                return construction(format!("tabulated rate coefficients must be positive, got {}", k));
            }
        }
        check_bounds("T", self.Tmin, self.Tmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        Ok(self.K_const(conditions.T))
    }
}

/////////////////////////ARRHENIUS///////////////////////////////////////////////////////////////
fn default_T0() -> f64 {
    1.0
}

/// modified Arrhenius form  A*(T/T0)^n*exp(-Ea/(R*T))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrhenius {
    /// preexponential factor, SI units
    pub A: f64,
    /// temperature exponent
    pub n: f64,
    /// activation energy, J/mol
    pub Ea: f64,
    /// reference temperature, K
    #[serde(default = "default_T0")]
    pub T0: f64,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl Arrhenius {
    pub fn new(A: f64, n: f64, Ea: f64, T0: f64) -> Result<Self, KineticsError> {
        let arrhenius = Self {
            A,
            n,
            Ea,
            T0,
            Tmin: None,
            Tmax: None,
        };
        arrhenius.validate()?;
        Ok(arrhenius)
    }
    pub fn with_T_range(mut self, Tmin: f64, Tmax: f64) -> Result<Self, KineticsError> {
        self.Tmin = Some(Tmin);
        self.Tmax = Some(Tmax);
        self.validate()?;
        Ok(self)
    }
    pub fn K_const(&self, T: f64) -> f64 {
        self.A * (T / self.T0).powf(self.n) * f64::exp(-self.Ea / (R * T))
    }
}

impl RateCalculator for Arrhenius {
    fn validate(&self) -> Result<(), KineticsError> {
        check_finite("A", self.A)?;
        check_finite("n", self.n)?;
        check_finite("Ea", self.Ea)?;
        check_finite("T0", self.T0)?;
        if self.T0 <= 0.0 {
            return construction(format!("T0 must be positive, got {}", self.T0));
        }
        check_bounds("T", self.Tmin, self.Tmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        Ok(self.K_const(conditions.T))
    }
}

/// Arrhenius with Evans-Polanyi activation energy Ea = E0 + alpha*dHrxn.
/// The temperature exponent acts on T itself, there is no reference temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusEP {
    pub A: f64,
    pub n: f64,
    /// Evans-Polanyi slope
    pub alpha: f64,
    /// intrinsic (thermoneutral) activation energy, J/mol
    pub E0: f64,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl ArrheniusEP {
    pub fn new(A: f64, n: f64, alpha: f64, E0: f64) -> Result<Self, KineticsError> {
        let ep = Self {
            A,
            n,
            alpha,
            E0,
            Tmin: None,
            Tmax: None,
        };
        ep.validate()?;
        Ok(ep)
    }
    pub fn get_activation_energy(&self, dHrxn: f64) -> f64 {
        self.E0 + self.alpha * dHrxn
    }
    pub fn K_const(&self, T: f64, dHrxn: f64) -> f64 {
        self.A * T.powf(self.n) * f64::exp(-self.get_activation_energy(dHrxn) / (R * T))
    }
}

impl RateCalculator for ArrheniusEP {
    fn validate(&self) -> Result<(), KineticsError> {
        check_finite("A", self.A)?;
        check_finite("n", self.n)?;
        check_finite("alpha", self.alpha)?;
        check_finite("E0", self.E0)?;
        check_bounds("T", self.Tmin, self.Tmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        let dHrxn = conditions.dHrxn.ok_or_else(|| {
            KineticsError::Domain("enthalpy of reaction is required by ArrheniusEP".to_string())
        })?;
        if !dHrxn.is_finite() {
            return Err(KineticsError::Domain(format!(
                "enthalpy of reaction must be finite, got {}",
                dHrxn
            )));
        }
        Ok(self.K_const(conditions.T, dHrxn))
    }
}

/// sum of several Arrhenius expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiArrhenius {
    pub arrhenius: Vec<Arrhenius>,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl MultiArrhenius {
    pub fn new(arrhenius: Vec<Arrhenius>) -> Result<Self, KineticsError> {
        let multi = Self {
            arrhenius,
            Tmin: None,
            Tmax: None,
        };
        multi.validate()?;
        Ok(multi)
    }
    pub fn K_const(&self, T: f64) -> f64 {
        self.arrhenius.iter().map(|a| a.K_const(T)).sum()
    }
}

impl RateCalculator for MultiArrhenius {
    fn validate(&self) -> Result<(), KineticsError> {
        if self.arrhenius.is_empty() {
            return construction("MultiArrhenius needs at least one Arrhenius expression".to_string());
        }
        for a in &self.arrhenius {
            a.validate()?;
        }
        check_bounds("T", self.Tmin, self.Tmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        Ok(self.K_const(conditions.T))
    }
}

/////////////////////////PRESSURE DEPENDENT ARRHENIUS///////////////////////////////////////////////////////////////
/// Arrhenius expressions valid at a set of pressures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PDepArrhenius {
    /// pressures, Pa, strictly increasing
    pub pressures: Vec<f64>,
    /// one Arrhenius expression per pressure
    pub arrhenius: Vec<Arrhenius>,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
    #[serde(default)]
    pub Pmin: Option<f64>,
    #[serde(default)]
    pub Pmax: Option<f64>,
}

/// which tabulated branches a pressure falls between
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressureBracket {
    /// exact match, or outside the table (nearest branch)
    Single(usize),
    /// strictly between pressures[i] and pressures[i + 1]
    Between(usize, usize),
}

impl PDepArrhenius {
    pub fn new(pressures: Vec<f64>, arrhenius: Vec<Arrhenius>) -> Result<Self, KineticsError> {
        let pdep = Self {
            pressures,
            arrhenius,
            Tmin: None,
            Tmax: None,
            Pmin: None,
            Pmax: None,
        };
        pdep.validate()?;
        Ok(pdep)
    }
    pub fn get_adjacent_expressions(&self, P: f64) -> PressureBracket {
        // first index with pressures[i] >= P
        let i = self.pressures.partition_point(|&p| p < P);
        if i < self.pressures.len() && self.pressures[i] == P {
            PressureBracket::Single(i)
        } else if i == 0 {
            PressureBracket::Single(0)
        } else if i == self.pressures.len() {
            PressureBracket::Single(i - 1)
        } else {
            PressureBracket::Between(i - 1, i)
        }
    }
    pub fn K_const(&self, T: f64, P: f64) -> f64 {
        match self.get_adjacent_expressions(P) {
            PressureBracket::Single(i) => self.arrhenius[i].K_const(T),
            PressureBracket::Between(lo, hi) => {
                let (P_lo, P_hi) = (self.pressures[lo], self.pressures[hi]);
                let k_lo = self.arrhenius[lo].K_const(T);
                let k_hi = self.arrhenius[hi].K_const(T);
                let log_k = k_lo.log10()
                    + (P / P_lo).log10() / (P_hi / P_lo).log10() * (k_hi / k_lo).log10();
                10f64.powf(log_k)
            }
        }
    }
}

impl RateCalculator for PDepArrhenius {
    fn validate(&self) -> Result<(), KineticsError> {
        check_strictly_increasing("pressures", &self.pressures)?;
        if self.pressures.len() != self.arrhenius.len() {
            return construction(format!(
                "pressures and arrhenius lengths differ: {} vs {}",
                self.pressures.len(),
                self.arrhenius.len()
            ));
        }
        for a in &self.arrhenius {
            a.validate()?;
        }
        check_bounds("T", self.Tmin, self.Tmax)?;
        check_bounds("P", self.Pmin, self.Pmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn P_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Pmin, self.Pmax)
    }
    fn is_pressure_dependent(&self) -> bool {
        true
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        let P = required_pressure(conditions)?;
        Ok(self.K_const(conditions.T, P))
    }
}

/////////////////////////CHEBYSHEV///////////////////////////////////////////////////////////////
/// Chebyshev polynomials T_0(x)..T_{n-1}(x) by the three-term recurrence
pub fn chebyshev_polynomials(n: usize, x: f64) -> Vec<f64> {
    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        let value = match i {
            0 => 1.0,
            1 => x,
            _ => 2.0 * x * values[i - 1] - values[i - 2],
        };
        values.push(value);
    }
    values
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chebyshev {
    /// coeffs[i][j] multiplies T_i(Tr)*T_j(Pr)
    pub coeffs: Vec<Vec<f64>>,
    pub Tmin: f64,
    pub Tmax: f64,
    pub Pmin: f64,
    pub Pmax: f64,
}

impl Chebyshev {
    pub fn new(
        coeffs: Vec<Vec<f64>>,
        Tmin: f64,
        Tmax: f64,
        Pmin: f64,
        Pmax: f64,
    ) -> Result<Self, KineticsError> {
        let chebyshev = Self {
            coeffs,
            Tmin,
            Tmax,
            Pmin,
            Pmax,
        };
        chebyshev.validate()?;
        Ok(chebyshev)
    }
    pub fn get_reduced_temperature(&self, T: f64) -> f64 {
        (2.0 / T - 1.0 / self.Tmin - 1.0 / self.Tmax) / (1.0 / self.Tmax - 1.0 / self.Tmin)
    }
    pub fn get_reduced_pressure(&self, P: f64) -> f64 {
        (2.0 * P.ln() - self.Pmin.ln() - self.Pmax.ln()) / (self.Pmax.ln() - self.Pmin.ln())
    }
    pub fn K_const(&self, T: f64, P: f64) -> f64 {
        let n_T = self.coeffs.len();
        let n_P = self.coeffs[0].len();
        let cheb_T = chebyshev_polynomials(n_T, self.get_reduced_temperature(T));
        let cheb_P = chebyshev_polynomials(n_P, self.get_reduced_pressure(P));
        let mut log_k = 0.0;
        for (i, row) in self.coeffs.iter().enumerate() {
            for (j, c) in row.iter().enumerate() {
                log_k += c * cheb_T[i] * cheb_P[j];
            }
        }
        10f64.powf(log_k)
    }
}

impl RateCalculator for Chebyshev {
    fn validate(&self) -> Result<(), KineticsError> {
        if self.coeffs.is_empty() || self.coeffs[0].is_empty() {
            return construction("Chebyshev coefficient matrix must not be empty".to_string());
        }
        let width = self.coeffs[0].len();
        if self.coeffs.iter().any(|row| row.len() != width) {
            return construction("Chebyshev coefficient matrix must be rectangular".to_string());
        }
        for c in self.coeffs.iter().flatten() {
            check_finite("Chebyshev coefficient", *c)?;
        }
        for (name, lo, hi) in [("T", self.Tmin, self.Tmax), ("P", self.Pmin, self.Pmax)] {
            check_finite(name, lo)?;
            check_finite(name, hi)?;
            if !(lo > 0.0 && lo < hi) {
                return construction(format!(
                    "Chebyshev needs 0 < {name}min < {name}max, got [{}, {}]",
                    lo, hi
                ));
            }
        }
        Ok(())
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (Some(self.Tmin), Some(self.Tmax))
    }
    fn P_range(&self) -> (Option<f64>, Option<f64>) {
        (Some(self.Pmin), Some(self.Pmax))
    }
    fn is_pressure_dependent(&self) -> bool {
        true
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        let P = required_pressure(conditions)?;
        Ok(self.K_const(conditions.T, P))
    }
}

/////////////////////////////THIRD-BODY AND FALLOFF////////////////////////////////
/// high-pressure Arrhenius expression multiplied by [M]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdBody {
    pub arrheniusHigh: Arrhenius,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
    #[serde(default)]
    pub Pmin: Option<f64>,
    #[serde(default)]
    pub Pmax: Option<f64>,
}

impl ThirdBody {
    pub fn new(arrheniusHigh: Arrhenius) -> Result<Self, KineticsError> {
        let third_body = Self {
            arrheniusHigh,
            Tmin: None,
            Tmax: None,
            Pmin: None,
            Pmax: None,
        };
        third_body.validate()?;
        Ok(third_body)
    }
    pub fn K_const(&self, T: f64, P: f64) -> f64 {
        self.arrheniusHigh.K_const(T) * bath_gas_concentration(T, P)
    }
}

impl RateCalculator for ThirdBody {
    fn validate(&self) -> Result<(), KineticsError> {
        self.arrheniusHigh.validate()?;
        check_bounds("T", self.Tmin, self.Tmax)?;
        check_bounds("P", self.Pmin, self.Pmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn P_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Pmin, self.Pmax)
    }
    fn is_pressure_dependent(&self) -> bool {
        true
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        let P = required_pressure(conditions)?;
        Ok(self.K_const(conditions.T, P))
    }
}

/// limiting rates and reduced pressure Pr = k0*[M]/k_inf
fn falloff_limits(low: &Arrhenius, high: &Arrhenius, T: f64, P: f64) -> (f64, f64) {
    let k0 = low.K_const(T);
    let k_inf = high.K_const(T);
    let Pr = k0 * bath_gas_concentration(T, P) / k_inf;
    (k_inf, Pr)
}

/// Pr/(1 + Pr), equal to 1 when Pr overflows
fn falloff_fraction(Pr: f64) -> f64 {
    if Pr.is_infinite() { 1.0 } else { Pr / (1.0 + Pr) }
}

/// falloff forms need A_low >= 0 and A_high > 0
fn check_falloff_limits(low: &Arrhenius, high: &Arrhenius) -> Result<(), KineticsError> {
    low.validate()?;
    high.validate()?;
    if low.A < 0.0 {
        return construction(format!("low-pressure A must not be negative, got {}", low.A));
    }
    if !(high.A > 0.0) {
        return construction(format!("high-pressure A must be positive, got {}", high.A));
    }
    Ok(())
}

/// k_inf must be positive and finite for Pr to be defined
fn check_high_pressure_limit(high: &Arrhenius, T: f64) -> Result<(), KineticsError> {
    let k_inf = high.K_const(T);
    if !(k_inf > 0.0) || !k_inf.is_finite() {
        return Err(KineticsError::Domain(format!(
            "high-pressure rate coefficient is {} at T = {}, reduced pressure is undefined",
            k_inf, T
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lindemann {
    pub arrheniusLow: Arrhenius,
    pub arrheniusHigh: Arrhenius,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
    #[serde(default)]
    pub Pmin: Option<f64>,
    #[serde(default)]
    pub Pmax: Option<f64>,
}

impl Lindemann {
    pub fn new(arrheniusLow: Arrhenius, arrheniusHigh: Arrhenius) -> Result<Self, KineticsError> {
        let lindemann = Self {
            arrheniusLow,
            arrheniusHigh,
            Tmin: None,
            Tmax: None,
            Pmin: None,
            Pmax: None,
        };
        lindemann.validate()?;
        Ok(lindemann)
    }
    pub fn K_const(&self, T: f64, P: f64) -> f64 {
        let (k_inf, Pr) = falloff_limits(&self.arrheniusLow, &self.arrheniusHigh, T, P);
        k_inf * falloff_fraction(Pr)
    }
}

impl RateCalculator for Lindemann {
    fn validate(&self) -> Result<(), KineticsError> {
        check_falloff_limits(&self.arrheniusLow, &self.arrheniusHigh)?;
        check_bounds("T", self.Tmin, self.Tmax)?;
        check_bounds("P", self.Pmin, self.Pmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn P_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Pmin, self.Pmax)
    }
    fn is_pressure_dependent(&self) -> bool {
        true
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        let P = required_pressure(conditions)?;
        check_high_pressure_limit(&self.arrheniusHigh, conditions.T)?;
        Ok(self.K_const(conditions.T, P))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Troe {
    pub arrheniusLow: Arrhenius,
    pub arrheniusHigh: Arrhenius,
    pub alpha: f64,
    /// K
    pub T3: f64,
    /// K
    pub T1: f64,
    /// K, the third Fcent term is dropped when absent
    #[serde(default)]
    pub T2: Option<f64>,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
    #[serde(default)]
    pub Pmin: Option<f64>,
    #[serde(default)]
    pub Pmax: Option<f64>,
}

impl Troe {
    pub fn new(
        arrheniusLow: Arrhenius,
        arrheniusHigh: Arrhenius,
        alpha: f64,
        T3: f64,
        T1: f64,
        T2: Option<f64>,
    ) -> Result<Self, KineticsError> {
        let troe = Self {
            arrheniusLow,
            arrheniusHigh,
            alpha,
            T3,
            T1,
            T2,
            Tmin: None,
            Tmax: None,
            Pmin: None,
            Pmax: None,
        };
        troe.validate()?;
        Ok(troe)
    }
    /// center broadening factor
    pub fn get_Fcent(&self, T: f64) -> f64 {
        let mut Fcent =
            (1.0 - self.alpha) * f64::exp(-T / self.T3) + self.alpha * f64::exp(-T / self.T1);
        if let Some(T2) = self.T2 {
            Fcent += f64::exp(-T2 / T);
        }
        Fcent
    }
    /// broadening factor F at the reduced pressure Pr; Pr = 0 and Pr = inf give the common limit
    /// Fcent^(1/(1 + 1/d²))
    pub fn get_broadening(&self, T: f64, Pr: f64) -> f64 {
        let log_Fcent = self.get_Fcent(T).log10();
        let c = -0.4 - 0.67 * log_Fcent;
        let n = 0.75 - 1.27 * log_Fcent;
        let d = 0.14;
        let log_Pr = Pr.log10();
        let f_1 = if log_Pr.is_finite() {
            (log_Pr + c) / (n - d * log_Pr)
        } else {
            -1.0 / d
        };
        10f64.powf(log_Fcent / (1.0 + f_1 * f_1))
    }
    pub fn K_const(&self, T: f64, P: f64) -> f64 {
        let (k_inf, Pr) = falloff_limits(&self.arrheniusLow, &self.arrheniusHigh, T, P);
        if Pr == 0.0 {
            return 0.0;
        }
        k_inf * falloff_fraction(Pr) * self.get_broadening(T, Pr)
    }
}

impl RateCalculator for Troe {
    fn validate(&self) -> Result<(), KineticsError> {
        check_falloff_limits(&self.arrheniusLow, &self.arrheniusHigh)?;
        check_finite("alpha", self.alpha)?;
        for (name, value) in [("T3", self.T3), ("T1", self.T1)] {
            check_finite(name, value)?;
            if value == 0.0 {
                return construction(format!("Troe parameter {} must be non-zero", name));
            }
        }
        if let Some(T2) = self.T2 {
            check_finite("T2", T2)?;
        }
        check_bounds("T", self.Tmin, self.Tmax)?;
        check_bounds("P", self.Pmin, self.Pmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn P_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Pmin, self.Pmax)
    }
    fn is_pressure_dependent(&self) -> bool {
        true
    }
    fn calculate_k(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        check_temperature(conditions.T)?;
        let P = required_pressure(conditions)?;
        check_high_pressure_limit(&self.arrheniusHigh, conditions.T)?;
        let Fcent = self.get_Fcent(conditions.T);
        if !(Fcent > 0.0) {
            return Err(KineticsError::Domain(format!(
                "Troe center broadening factor is not positive ({}) at T = {}",
                Fcent, conditions.T
            )));
        }
        Ok(self.K_const(conditions.T, P))
    }
}

/////////////////////////////THE MODEL FAMILY////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[enum_dispatch(RateCalculator)]
pub enum RateModel {
    TabulatedRate(TabulatedRate),
    Arrhenius(Arrhenius),
    ArrheniusEP(ArrheniusEP),
    MultiArrhenius(MultiArrhenius),
    PDepArrhenius(PDepArrhenius),
    Chebyshev(Chebyshev),
    ThirdBody(ThirdBody),
    Lindemann(Lindemann),
    Troe(Troe),
}

impl RateModel {
    /// takes serde Value, parses it into a model and validates the parameters
    pub fn from_serde(serde: Value) -> Result<Self, KineticsError> {
        let model: RateModel = serde_json::from_value(serde)
            .map_err(|e| KineticsError::Construction(e.to_string()))?;
        model.validate()?;
        debug!("constructed rate model {}", model.name());
        Ok(model)
    }
    pub fn name(&self) -> &'static str {
        match self {
            RateModel::TabulatedRate(_) => "TabulatedRate",
            RateModel::Arrhenius(_) => "Arrhenius",
            RateModel::ArrheniusEP(_) => "ArrheniusEP",
            RateModel::MultiArrhenius(_) => "MultiArrhenius",
            RateModel::PDepArrhenius(_) => "PDepArrhenius",
            RateModel::Chebyshev(_) => "Chebyshev",
            RateModel::ThirdBody(_) => "ThirdBody",
            RateModel::Lindemann(_) => "Lindemann",
            RateModel::Troe(_) => "Troe",
        }
    }
    /// reports a `KineticsError::Range` when T or P lies outside the declared validity range
    pub fn check_validity(&self, conditions: &RateConditions) -> Result<(), KineticsError> {
        check_temperature(conditions.T)?;
        let (Tmin, Tmax) = self.T_range();
        check_within("T", conditions.T, Tmin, Tmax)?;
        if self.is_pressure_dependent() {
            let P = required_pressure(conditions)?;
            let (Pmin, Pmax) = self.P_range();
            check_within("P", P, Pmin, Pmax)?;
        }
        Ok(())
    }
    /// rate coefficient in SI units; fails outside the validity range
    pub fn get_rate_coefficient(&self, conditions: &RateConditions) -> Result<f64, KineticsError> {
        self.check_validity(conditions)?;
        self.calculate_k(conditions)
    }
}
