//! # Thermodynamic Polynomial Models
//!
//! ## Aim
//! Heat capacity Cp, enthalpy H, entropy S and Gibbs free energy G = H − T·S of a species as
//! functions of temperature, in SI units (J/mol/K, J/mol).
//!
//! ## Main Data Structures and Logic
//! - `GroupAdditivity`: tabulated Cp(T) interpolated piecewise-linearly and clamped outside the table,
//!   H and S are exact integrals of that interpolant from 298.15 K
//! - `Wilhoit`: Cp as a polynomial of the reduced temperature y = T/(T+B), closed-form H and S
//! - `NASAPolynomial`: NASA 7- or 9-coefficient polynomial over one temperature range
//! - `NASAComposite`: contiguous NASA polynomials, the one covering T is used
//! - `ThermoModel`: closed enum over all of the above, dispatching `ThermoCalculator` via enum_dispatch
//!
//! ## Errors
//! Non-positive temperature gives `ThermoError::Domain`, a temperature outside every range of a
//! composite NASA model gives `ThermoError::Range`. Malformed parameters are rejected at construction.
use enum_dispatch::enum_dispatch;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// universal gas constant, J/(mol·K)
pub const R: f64 = 8.314472;
/// reference temperature of group additivity H298 and S298, K
pub const T_REF: f64 = 298.15;

#[derive(Debug, Error, PartialEq)]
pub enum ThermoError {
    #[error("Invalid thermodynamic parameters: {0}")]
    Construction(String),
    #[error("Temperature must be positive and finite, got {0} K")]
    Domain(f64),
    #[error("No polynomial covers temperature {temperature} K. Valid range: {range}")]
    Range { temperature: f64, range: String },
}

fn construction<T>(msg: String) -> Result<T, ThermoError> {
    Err(ThermoError::Construction(msg))
}

fn check_finite(name: &str, value: f64) -> Result<(), ThermoError> {
    if value.is_finite() {
        Ok(())
    } else {
        construction(format!("{} must be finite, got {}", name, value))
    }
}

fn check_temperature(T: f64) -> Result<(), ThermoError> {
    if T > 0.0 && T.is_finite() {
        Ok(())
    } else {
        Err(ThermoError::Domain(T))
    }
}

fn check_optional_range(Tmin: Option<f64>, Tmax: Option<f64>) -> Result<(), ThermoError> {
    for bound in Tmin.iter().chain(Tmax.iter()) {
        check_finite("T bound", *bound)?;
    }
    if let (Some(lo), Some(hi)) = (Tmin, Tmax) {
        if lo > hi {
            return construction(format!("temperature range is inverted: {} > {}", lo, hi));
        }
    }
    Ok(())
}

#[enum_dispatch]
pub trait ThermoCalculator {
    /// checks parameters after construction or deserialization
    fn validate(&self) -> Result<(), ThermoError>;
    /// declared validity range (Tmin, Tmax), K
    fn T_range(&self) -> (Option<f64>, Option<f64>);
    /// J/(mol·K)
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError>;
    /// J/mol
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError>;
    /// J/(mol·K)
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError>;
    /// J/mol
    fn get_free_energy(&self, T: f64) -> Result<f64, ThermoError> {
        Ok(self.get_enthalpy(T)? - T * self.get_entropy(T)?)
    }
    fn calculate_Cp_dH_dS(&self, T: f64) -> Result<(f64, f64, f64), ThermoError> {
        Ok((
            self.get_heat_capacity(T)?,
            self.get_enthalpy(T)?,
            self.get_entropy(T)?,
        ))
    }
}

/////////////////////////GROUP ADDITIVITY///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAdditivity {
    /// temperatures, K, strictly increasing
    pub Tdata: Vec<f64>,
    /// heat capacities at Tdata, J/(mol·K)
    pub Cpdata: Vec<f64>,
    /// enthalpy at 298.15 K, J/mol
    pub H298: f64,
    /// entropy at 298.15 K, J/(mol·K)
    pub S298: f64,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl GroupAdditivity {
    pub fn new(Tdata: Vec<f64>, Cpdata: Vec<f64>, H298: f64, S298: f64) -> Result<Self, ThermoError> {
        let ga = Self {
            Tdata,
            Cpdata,
            H298,
            S298,
            Tmin: None,
            Tmax: None,
        };
        ga.validate()?;
        Ok(ga)
    }

    fn Cp_clamped(&self, T: f64) -> f64 {
        let last = self.Tdata.len() - 1;
        if T <= self.Tdata[0] {
            return self.Cpdata[0];
        }
        if T >= self.Tdata[last] {
            return self.Cpdata[last];
        }
        let i = self.Tdata.partition_point(|&t| t <= T) - 1;
        let (T_lo, T_hi) = (self.Tdata[i], self.Tdata[i + 1]);
        let (Cp_lo, Cp_hi) = (self.Cpdata[i], self.Cpdata[i + 1]);
        Cp_lo + (Cp_hi - Cp_lo) * (T - T_lo) / (T_hi - T_lo)
    }

    /// (∫Cp dT, ∫Cp/T dT) of the clamped interpolant from Tdata[0] to T
    fn integrals_from_first_point(&self, T: f64) -> (f64, f64) {
        let T_first = self.Tdata[0];
        let last = self.Tdata.len() - 1;
        if T <= T_first {
            return (self.Cpdata[0] * (T - T_first), self.Cpdata[0] * (T / T_first).ln());
        }
        let (mut H, mut S) = (0.0, 0.0);
        for i in 0..last {
            let (T_lo, T_hi) = (self.Tdata[i], self.Tdata[i + 1]);
            if T <= T_lo {
                break;
            }
            let (Cp_lo, Cp_hi) = (self.Cpdata[i], self.Cpdata[i + 1]);
            let slope = (Cp_hi - Cp_lo) / (T_hi - T_lo);
            let intercept = (Cp_lo * T_hi - Cp_hi * T_lo) / (T_hi - T_lo);
            let upper = T.min(T_hi);
            H += 0.5 * slope * (upper * upper - T_lo * T_lo) + intercept * (upper - T_lo);
            S += slope * (upper - T_lo) + intercept * (upper / T_lo).ln();
        }
        if T > self.Tdata[last] {
            H += self.Cpdata[last] * (T - self.Tdata[last]);
            S += self.Cpdata[last] * (T / self.Tdata[last]).ln();
        }
        (H, S)
    }
}

impl ThermoCalculator for GroupAdditivity {
    fn validate(&self) -> Result<(), ThermoError> {
        if self.Tdata.is_empty() {
            return construction("Tdata must not be empty".to_string());
        }
        if self.Tdata.len() != self.Cpdata.len() {
            return construction(format!(
                "Tdata and Cpdata lengths differ: {} vs {}",
                self.Tdata.len(),
                self.Cpdata.len()
            ));
        }
        for (T, Cp) in self.Tdata.iter().zip(self.Cpdata.iter()) {
            check_finite("Tdata", *T)?;
            check_finite("Cpdata", *Cp)?;
            if *T <= 0.0 {
                return construction(format!("Tdata must be positive, got {}", T));
            }
        }
        if self.Tdata.windows(2).any(|w| w[1] <= w[0]) {
            return construction("Tdata must be strictly increasing".to_string());
        }
        check_finite("H298", self.H298)?;
        check_finite("S298", self.S298)?;
        check_optional_range(self.Tmin, self.Tmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        Ok(self.Cp_clamped(T))
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let (H_T, _) = self.integrals_from_first_point(T);
        let (H_ref, _) = self.integrals_from_first_point(T_REF);
        Ok(self.H298 + H_T - H_ref)
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let (_, S_T) = self.integrals_from_first_point(T);
        let (_, S_ref) = self.integrals_from_first_point(T_REF);
        Ok(self.S298 + S_T - S_ref)
    }
}

/////////////////////////WILHOIT///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wilhoit {
    /// heat capacity at zero temperature, J/(mol·K)
    pub Cp0: f64,
    /// heat capacity at infinite temperature, J/(mol·K)
    pub CpInf: f64,
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    /// scaling temperature, K
    pub B: f64,
    /// J/mol
    pub H0: f64,
    /// J/(mol·K)
    pub S0: f64,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl Wilhoit {
    pub fn new(
        Cp0: f64,
        CpInf: f64,
        a: [f64; 4],
        B: f64,
        H0: f64,
        S0: f64,
    ) -> Result<Self, ThermoError> {
        let wilhoit = Self {
            Cp0,
            CpInf,
            a0: a[0],
            a1: a[1],
            a2: a[2],
            a3: a[3],
            B,
            H0,
            S0,
            Tmin: None,
            Tmax: None,
        };
        wilhoit.validate()?;
        Ok(wilhoit)
    }
    fn reduced_temperature(&self, T: f64) -> f64 {
        T / (T + self.B)
    }
}

impl ThermoCalculator for Wilhoit {
    fn validate(&self) -> Result<(), ThermoError> {
        for (name, value) in [
            ("Cp0", self.Cp0),
            ("CpInf", self.CpInf),
            ("a0", self.a0),
            ("a1", self.a1),
            ("a2", self.a2),
            ("a3", self.a3),
            ("B", self.B),
            ("H0", self.H0),
            ("S0", self.S0),
        ] {
            check_finite(name, value)?;
        }
        if self.B <= 0.0 {
            return construction(format!("Wilhoit B must be positive, got {}", self.B));
        }
        check_optional_range(self.Tmin, self.Tmax)
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (self.Tmin, self.Tmax)
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let y = self.reduced_temperature(T);
        let (a0, a1, a2, a3) = (self.a0, self.a1, self.a2, self.a3);
        Ok(self.Cp0
            + (self.CpInf - self.Cp0) * y * y * (1.0 + (y - 1.0) * (a0 + y * (a1 + y * (a2 + y * a3)))))
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let y = self.reduced_temperature(T);
        let y2 = y * y;
        let log_B_plus_T = (self.B + T).ln();
        let (a0, a1, a2, a3) = (self.a0, self.a1, self.a2, self.a3);
        Ok(self.H0 + self.Cp0 * T
            - (self.CpInf - self.Cp0)
                * T
                * (y2
                    * ((3.0 * a0 + a1 + a2 + a3) / 6.0
                        + (4.0 * a1 + a2 + a3) * y / 12.0
                        + (5.0 * a2 + a3) * y2 / 20.0
                        + a3 * y2 * y / 5.0)
                    + (2.0 + a0 + a1 + a2 + a3) * (y / 2.0 - 1.0 + (1.0 / y - 1.0) * log_B_plus_T)))
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let y = self.reduced_temperature(T);
        let (a0, a1, a2, a3) = (self.a0, self.a1, self.a2, self.a3);
        Ok(self.S0 + self.CpInf * T.ln()
            - (self.CpInf - self.Cp0)
                * (y.ln() + y * (1.0 + y * (a0 / 2.0 + y * (a1 / 3.0 + y * (a2 / 4.0 + y * a3 / 5.0))))))
    }
}

/////////////////////////NASA///////////////////////////////////////////////////////////////
/// NASA polynomial. Nine coefficients c0..c8 give
/// Cp/R = c0/T² + c1/T + c2 + c3·T + c4·T² + c5·T³ + c6·T⁴, c7 and c8 are the enthalpy and
/// entropy integration constants. Seven coefficients a1..a7 (NASA-7) are read as c0 = c1 = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NASAPolynomial {
    pub coeffs: Vec<f64>,
    pub Tmin: f64,
    pub Tmax: f64,
}

impl NASAPolynomial {
    pub fn new(coeffs: Vec<f64>, Tmin: f64, Tmax: f64) -> Result<Self, ThermoError> {
        let polynomial = Self { coeffs, Tmin, Tmax };
        polynomial.validate()?;
        Ok(polynomial)
    }
    /// coefficients in the nine-term layout
    pub fn nine_coeffs(&self) -> [f64; 9] {
        let mut c = [0.0; 9];
        if self.coeffs.len() == 7 {
            c[2..].copy_from_slice(&self.coeffs);
        } else {
            c.copy_from_slice(&self.coeffs[..9]);
        }
        c
    }
    pub fn contains(&self, T: f64) -> bool {
        self.Tmin <= T && T <= self.Tmax
    }
    fn Cp(&self, T: f64) -> f64 {
        let c = self.nine_coeffs();
        ((c[0] / T + c[1]) / T + c[2] + T * (c[3] + T * (c[4] + T * (c[5] + c[6] * T)))) * R
    }
    fn dh(&self, T: f64) -> f64 {
        let c = self.nine_coeffs();
        let T2 = T * T;
        let T4 = T2 * T2;
        ((-c[0] / T + c[1] * T.ln()) / T
            + c[2]
            + c[3] * T / 2.0
            + c[4] * T2 / 3.0
            + c[5] * T2 * T / 4.0
            + c[6] * T4 / 5.0
            + c[7] / T)
            * R
            * T
    }
    fn ds(&self, T: f64) -> f64 {
        let c = self.nine_coeffs();
        let T2 = T * T;
        let T4 = T2 * T2;
        ((-c[0] / T / 2.0 - c[1]) / T
            + c[2] * T.ln()
            + c[3] * T
            + c[4] * T2 / 2.0
            + c[5] * T2 * T / 3.0
            + c[6] * T4 / 4.0
            + c[8])
            * R
    }
}

impl ThermoCalculator for NASAPolynomial {
    fn validate(&self) -> Result<(), ThermoError> {
        if self.coeffs.len() != 7 && self.coeffs.len() != 9 {
            return construction(format!(
                "NASA polynomial needs 7 or 9 coefficients, got {}",
                self.coeffs.len()
            ));
        }
        for c in &self.coeffs {
            check_finite("NASA coefficient", *c)?;
        }
        check_finite("Tmin", self.Tmin)?;
        check_finite("Tmax", self.Tmax)?;
        if !(self.Tmin >= 0.0 && self.Tmin < self.Tmax) {
            return construction(format!(
                "NASA polynomial range must satisfy 0 <= Tmin < Tmax, got [{}, {}]",
                self.Tmin, self.Tmax
            ));
        }
        Ok(())
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (Some(self.Tmin), Some(self.Tmax))
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        Ok(self.Cp(T))
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        Ok(self.dh(T))
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        Ok(self.ds(T))
    }
}

/// contiguous NASA polynomials ordered by temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NASAComposite {
    pub polynomials: Vec<NASAPolynomial>,
}

impl NASAComposite {
    pub fn new(polynomials: Vec<NASAPolynomial>) -> Result<Self, ThermoError> {
        let composite = Self { polynomials };
        composite.validate()?;
        Ok(composite)
    }
    fn range_str(&self) -> String {
        let mut bounds: Vec<String> = self.polynomials.iter().map(|p| p.Tmin.to_string()).collect();
        if let Some(last) = self.polynomials.last() {
            bounds.push(last.Tmax.to_string());
        }
        bounds.join(" - ")
    }
    /// the first polynomial whose range contains T, the lower one at a shared boundary
    pub fn select_polynomial(&self, T: f64) -> Result<&NASAPolynomial, ThermoError> {
        check_temperature(T)?;
        self.polynomials
            .iter()
            .find(|p| p.contains(T))
            .ok_or_else(|| ThermoError::Range {
                temperature: T,
                range: self.range_str(),
            })
    }
}

impl ThermoCalculator for NASAComposite {
    fn validate(&self) -> Result<(), ThermoError> {
        if self.polynomials.is_empty() {
            return construction("NASA composite needs at least one polynomial".to_string());
        }
        for p in &self.polynomials {
            p.validate()?;
        }
        for pair in self.polynomials.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            let tolerance = 1e-9 * lower.Tmax.abs().max(1.0);
            if upper.Tmin < lower.Tmax - tolerance {
                return construction(format!(
                    "NASA ranges overlap or are unordered: [{}, {}] and [{}, {}]",
                    lower.Tmin, lower.Tmax, upper.Tmin, upper.Tmax
                ));
            }
            if upper.Tmin > lower.Tmax + tolerance {
                return construction(format!(
                    "NASA ranges leave a gap between {} and {}",
                    lower.Tmax, upper.Tmin
                ));
            }
        }
        Ok(())
    }
    fn T_range(&self) -> (Option<f64>, Option<f64>) {
        (
            self.polynomials.first().map(|p| p.Tmin),
            self.polynomials.last().map(|p| p.Tmax),
        )
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        self.select_polynomial(T)?.get_heat_capacity(T)
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        self.select_polynomial(T)?.get_enthalpy(T)
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        self.select_polynomial(T)?.get_entropy(T)
    }
    fn get_free_energy(&self, T: f64) -> Result<f64, ThermoError> {
        self.select_polynomial(T)?.get_free_energy(T)
    }
}

/////////////////////////////THE MODEL FAMILY////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[enum_dispatch(ThermoCalculator)]
pub enum ThermoModel {
    GroupAdditivity(GroupAdditivity),
    Wilhoit(Wilhoit),
    NASAPolynomial(NASAPolynomial),
    NASAComposite(NASAComposite),
}

impl ThermoModel {
    /// takes serde Value, parses it into a model and validates the parameters
    pub fn from_serde(serde: Value) -> Result<Self, ThermoError> {
        let model: ThermoModel =
            serde_json::from_value(serde).map_err(|e| ThermoError::Construction(e.to_string()))?;
        model.validate()?;
        debug!("constructed thermo model {}", model.name());
        Ok(model)
    }
    pub fn name(&self) -> &'static str {
        match self {
            ThermoModel::GroupAdditivity(_) => "GroupAdditivity",
            ThermoModel::Wilhoit(_) => "Wilhoit",
            ThermoModel::NASAPolynomial(_) => "NASAPolynomial",
            ThermoModel::NASAComposite(_) => "NASAComposite",
        }
    }
}
