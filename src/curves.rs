//! # Curve Building
//!
//! ## Aim
//! Turns rate, thermodynamic and statistical mechanics models into named (x, y) series ready for
//! plotting or tabulation. Every series carries its unit strings; all values are SI, with
//! ln-free log10 axes where a quantity spans decades.
//!
//! ## Main Data Structures and Logic
//! - grid generators: temperatures evenly spaced in 1/T, pressure decades, linear temperature steps,
//!   uniform energy grid, torsion angles on [0, 2π)
//! - `Series`: one named curve with its unit strings, printable as a table with prettytable
//! - `CurveBuilder`: holds `CurveSettings` and builds
//!     - log10 k vs 1000/T, one series per pressure decade for pressure-dependent models
//!     - log10 k vs log10 P at a few temperatures for pressure-dependent models
//!     - Arrhenius (A, n, Ea) summary fitted to the k(T) curve
//!     - Cp, H, S, G vs T
//!     - log10 Q vs T, ρ(E) vs E and V(φ) for every hindered rotor of a states model
//!
//! ## Errors
//! Model errors propagate unchanged inside `CurveError`. With `tolerate_out_of_range` set, a range
//! violation of a rate model is logged as a warning and the model is evaluated anyway.
use crate::Kinetics::arrhenius_fit::fit_arrhenius_to_model;
use crate::Kinetics::rate_models::{Arrhenius, KineticsError, RateCalculator, RateConditions, RateModel};
use crate::StatMech::modes::{Mode, StatMechError};
use crate::StatMech::states_model::StatesModel;
use crate::Thermodynamics::thermo_models::{ThermoCalculator, ThermoError, ThermoModel};
use crate::settings::{CurveSettings, SettingsError};
use log::{info, warn};
use prettytable::{Table, row};
use serde::Serialize;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error(transparent)]
    Kinetics(#[from] KineticsError),
    #[error(transparent)]
    Thermo(#[from] ThermoError),
    #[error(transparent)]
    StatMech(#[from] StatMechError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/////////////////////////GRIDS///////////////////////////////////////////////////////////////
/// `points` temperatures evenly spaced in 1/T, from Tmax down to Tmin. Equal limits are widened by 5 K.
pub fn inverse_temperature_grid(Tmin: f64, Tmax: f64, points: usize) -> Vec<f64> {
    let (Tmin, Tmax) = if Tmin == Tmax { (Tmin - 5.0, Tmax + 5.0) } else { (Tmin, Tmax) };
    if points < 2 {
        return vec![Tmax];
    }
    let (inv_lo, inv_hi) = (1.0 / Tmax, 1.0 / Tmin);
    let step = (inv_hi - inv_lo) / (points - 1) as f64;
    let mut grid: Vec<f64> = (0..points).map(|i| 1.0 / (inv_lo + step * i as f64)).collect();
    // exact ends, so range checks at the limits pass
    grid[0] = Tmax;
    grid[points - 1] = Tmin;
    grid
}

/// pressures at log10 P = log10 Pmin, log10 Pmin + step, ... up to Pmax (with a 0.001 decade slack)
pub fn pressure_decades(Pmin: f64, Pmax: f64, step_decades: f64) -> Vec<f64> {
    let (lo, hi) = (Pmin.log10(), Pmax.log10());
    let n = ((hi - lo + 0.001) / step_decades).floor().max(0.0) as usize;
    (0..=n)
        .map(|i| 10f64.powf(lo + step_decades * i as f64).clamp(Pmin, Pmax))
        .collect()
}

/// Tmin, Tmin + step, ... while not above Tmax
pub fn temperature_steps(Tmin: f64, Tmax: f64, step: f64) -> Vec<f64> {
    let n = ((Tmax - Tmin) / step + 1e-9).floor().max(0.0) as usize;
    (0..=n).map(|i| Tmin + step * i as f64).collect()
}

/// `n` uniformly spaced energies from 0 to Emax, J/mol
pub fn energy_grid(Emax: f64, n: usize) -> Vec<f64> {
    let dE = Emax / (n.max(2) - 1) as f64;
    (0..n).map(|i| dE * i as f64).collect()
}

/// `n` torsion angles on [0, 2π), rad
pub fn angle_grid(n: usize) -> Vec<f64> {
    (0..n).map(|i| 2.0 * PI * i as f64 / n as f64).collect()
}

/////////////////////////SERIES///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub x_units: String,
    pub y_units: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: &str, x_units: &str, y_units: &str, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.to_string(),
            x_units: x_units.to_string(),
            y_units: y_units.to_string(),
            points,
        }
    }
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|(x, _)| *x).collect()
    }
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(row![self.name, ""]);
        table.add_row(row![self.x_units, self.y_units]);
        for (x, y) in &self.points {
            table.add_row(row![format!("{:.4}", x), format!("{:.6e}", y)]);
        }
        table
    }
    pub fn pretty_print(&self) {
        self.to_table().printstd();
    }
}

/////////////////////////BUILDER///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Default)]
pub struct CurveBuilder {
    pub settings: CurveSettings,
}

impl CurveBuilder {
    pub fn new(settings: CurveSettings) -> Self {
        Self { settings }
    }

    pub fn from_settings_file(path: &str) -> Result<Self, CurveError> {
        let settings = CurveSettings::from_file(path)?;
        Ok(Self::new(settings))
    }

    /// model validity range, or the configured default when the model declares none
    pub fn rate_T_limits(&self, model: &RateModel) -> (f64, f64) {
        match model.T_range() {
            (Some(Tmin), Some(Tmax)) => (Tmin, Tmax),
            _ => (self.settings.kinetics.Tmin, self.settings.kinetics.Tmax),
        }
    }

    pub fn rate_P_limits(&self, model: &RateModel) -> (f64, f64) {
        match model.P_range() {
            (Some(Pmin), Some(Pmax)) => (Pmin, Pmax),
            _ => (self.settings.kinetics.Pmin, self.settings.kinetics.Pmax),
        }
    }

    fn conditions(&self, model: &RateModel, T: f64, P: Option<f64>) -> RateConditions {
        RateConditions {
            T,
            P: if model.is_pressure_dependent() { P } else { None },
            dHrxn: match model {
                RateModel::ArrheniusEP(_) => Some(self.settings.reference_dHrxn),
                _ => None,
            },
        }
    }

    fn evaluate_k(&self, model: &RateModel, conditions: &RateConditions) -> Result<f64, CurveError> {
        if !self.settings.tolerate_out_of_range {
            return Ok(model.get_rate_coefficient(conditions)?);
        }
        match model.check_validity(conditions) {
            Ok(()) => {}
            Err(KineticsError::Range { quantity, value, min, max }) => {
                warn!(
                    "{} evaluated outside its validity range: {} = {} not in [{}, {}]",
                    model.name(),
                    quantity,
                    value,
                    min,
                    max
                );
            }
            Err(e) => return Err(e.into()),
        }
        Ok(model.calculate_k(conditions)?)
    }

    /// log10 k vs 1000/T; one series per pressure decade for pressure-dependent models
    pub fn rate_vs_inverse_T(&self, model: &RateModel) -> Result<Vec<Series>, CurveError> {
        let (Tmin, Tmax) = self.rate_T_limits(model);
        let Tdata = inverse_temperature_grid(Tmin, Tmax, self.settings.kinetics.points);
        let pressures: Vec<Option<f64>> = if model.is_pressure_dependent() {
            let (Pmin, Pmax) = self.rate_P_limits(model);
            pressure_decades(Pmin, Pmax, self.settings.kinetics.decade_step)
                .into_iter()
                .map(Some)
                .collect()
        } else {
            vec![None]
        };
        let mut series = Vec::with_capacity(pressures.len());
        for P in pressures {
            let mut points = Vec::with_capacity(Tdata.len());
            for &T in &Tdata {
                let k = self.evaluate_k(model, &self.conditions(model, T, P))?;
                points.push((1000.0 / T, k.log10()));
            }
            let name = match P {
                Some(P) => format!("{} ({} bar)", model.name(), P / 1e5),
                None => model.name().to_string(),
            };
            series.push(Series::new(&name, "1000/T, 1/K", "log10 k, SI", points));
        }
        Ok(series)
    }

    /// log10 k vs log10 P at a few temperatures; empty for pressure-independent models
    pub fn rate_vs_log_P(&self, model: &RateModel) -> Result<Vec<Series>, CurveError> {
        if !model.is_pressure_dependent() {
            return Ok(Vec::new());
        }
        let (Tmin, Tmax) = self.rate_T_limits(model);
        let (Pmin, Pmax) = self.rate_P_limits(model);
        let Tdata =
            inverse_temperature_grid(Tmin, Tmax, self.settings.kinetics.pressure_curve_temperatures);
        let Pdata = pressure_decades(Pmin, Pmax, self.settings.kinetics.fine_decade_step);
        let mut series = Vec::with_capacity(Tdata.len());
        for &T in &Tdata {
            let mut points = Vec::with_capacity(Pdata.len());
            for &P in &Pdata {
                let k = self.evaluate_k(model, &self.conditions(model, T, Some(P)))?;
                points.push((P.log10(), k.log10()));
            }
            series.push(Series::new(&format!("{:.1} K", T), "log10 P, Pa", "log10 k, SI", points));
        }
        Ok(series)
    }

    /// Arrhenius fit to the k(T) grid, at the highest plotted pressure for pressure-dependent models
    pub fn arrhenius_summary(&self, model: &RateModel) -> Result<Arrhenius, CurveError> {
        let (Tmin, Tmax) = self.rate_T_limits(model);
        let Tdata = inverse_temperature_grid(Tmin, Tmax, self.settings.kinetics.points);
        let P = if model.is_pressure_dependent() {
            let (Pmin, Pmax) = self.rate_P_limits(model);
            pressure_decades(Pmin, Pmax, self.settings.kinetics.decade_step).last().copied()
        } else {
            None
        };
        let fitted = fit_arrhenius_to_model(model, &Tdata, P, Some(self.settings.reference_dHrxn))?;
        info!(
            "{}: A = {:.4e}, n = {:.4}, Ea = {:.4e} J/mol",
            model.name(),
            fitted.A,
            fitted.n,
            fitted.Ea
        );
        Ok(fitted)
    }

    pub fn thermo_T_limits(&self, model: &ThermoModel) -> (f64, f64) {
        let thermo = &self.settings.thermo;
        match (model.T_range(), model) {
            ((Some(Tmin), Some(Tmax)), _) => (Tmin, Tmax),
            (_, ThermoModel::GroupAdditivity(_)) => (thermo.Tmin, thermo.group_additivity_Tmax),
            _ => (thermo.Tmin, thermo.Tmax),
        }
    }

    /// Cp, H, S and G vs T
    pub fn thermo_curves(&self, model: &ThermoModel) -> Result<Vec<Series>, CurveError> {
        let (Tmin, Tmax) = self.thermo_T_limits(model);
        let Tdata = temperature_steps(Tmin, Tmax, self.settings.thermo.step);
        let (mut Cp, mut H, mut S, mut G) = (vec![], vec![], vec![], vec![]);
        for &T in &Tdata {
            let (Cp_T, H_T, S_T) = model.calculate_Cp_dH_dS(T)?;
            Cp.push((T, Cp_T));
            H.push((T, H_T));
            S.push((T, S_T));
            G.push((T, model.get_free_energy(T)?));
        }
        Ok(vec![
            Series::new("Heat capacity", "T, K", "Cp, J/(mol*K)", Cp),
            Series::new("Enthalpy", "T, K", "H, J/mol", H),
            Series::new("Entropy", "T, K", "S, J/(mol*K)", S),
            Series::new("Free energy", "T, K", "G, J/mol", G),
        ])
    }

    /// log10 Q vs T
    pub fn partition_function_curve(&self, states: &StatesModel) -> Result<Series, CurveError> {
        let grid = &self.settings.states;
        let mut points = Vec::new();
        for T in temperature_steps(grid.Tmin, grid.Tmax, grid.T_step) {
            points.push((T, states.get_partition_function(T)?.log10()));
        }
        Ok(Series::new("Partition function", "T, K", "log10 Q", points))
    }

    /// ρ(E) vs E, energies in kJ/mol
    pub fn density_of_states_curve(&self, states: &StatesModel) -> Result<Series, CurveError> {
        let grid = &self.settings.states;
        let Elist = energy_grid(grid.Emax, grid.n_energies);
        let rho = states.get_density_of_states(&Elist)?;
        let points = Elist.iter().zip(rho).map(|(E, rho)| (E / 1000.0, rho)).collect();
        Ok(Series::new("Density of states", "E, kJ/mol", "rho, mol/J", points))
    }

    /// V(φ) in kJ/mol for every hindered rotor, in mode order
    pub fn potential_curves(&self, states: &StatesModel) -> Vec<Series> {
        let phis = angle_grid(self.settings.states.n_angles);
        states
            .modes
            .iter()
            .filter_map(|mode| match mode {
                Mode::HinderedRotor(rotor) => Some(rotor),
                _ => None,
            })
            .enumerate()
            .map(|(i, rotor)| {
                let points = phis.iter().map(|phi| (*phi, rotor.get_potential(*phi) / 1000.0)).collect();
                Series::new(&format!("Hindered rotor {}", i + 1), "phi, rad", "V, kJ/mol", points)
            })
            .collect()
    }
}
