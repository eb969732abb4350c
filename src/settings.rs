//! # Settings Module
//!
//! ## Purpose
//! Grid and evaluation settings for curve building: how many temperatures a rate curve has, which
//! pressure decades are plotted, the temperature step of thermodynamic tables, the energy grid for
//! densities of states and the torsion angle grid for hindered rotor potentials.
//!
//! ## Defaults
//! | Setting | Default |
//! |---------|---------|
//! | rate curve points | 50, evenly spaced in 1/T |
//! | rate T range (model without one) | 300 - 2000 K |
//! | pressure range (model without one) | 1e3 - 1e7 Pa, 1 decade step |
//! | k(P) curves | 5 temperatures, 0.1 decade step |
//! | thermo T range | 300 - 2000 K (300 - 1500 K for group additivity), 10 K step |
//! | states T grid | 10 - 2000 K, 10 K step |
//! | energy grid | 0 - 400 kJ/mol, 1 kJ/mol step |
//! | torsion angle grid | 0 - 2π, π/200 step |
//! | reference ΔH_rxn | 0 J/mol |
//!
//! ## Usage Pattern
//! ```rust, no_run
//! use KiCurves::settings::CurveSettings;
//!
//! let settings = CurveSettings::from_file("curve_settings.json").unwrap();
//! let same_defaults = CurveSettings::from_json_str("{}").unwrap();
//! ```
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsGrid {
    /// number of temperatures, evenly spaced in 1/T
    pub points: usize,
    /// used when the model has no finite temperature range, K
    pub Tmin: f64,
    pub Tmax: f64,
    /// used when the model has no finite pressure range, Pa
    pub Pmin: f64,
    pub Pmax: f64,
    /// pressure step of k(T) curves, decades
    pub decade_step: f64,
    /// pressure step of k(P) curves, decades
    pub fine_decade_step: f64,
    /// number of temperatures of k(P) curves
    pub pressure_curve_temperatures: usize,
}

impl Default for KineticsGrid {
    fn default() -> Self {
        Self {
            points: 50,
            Tmin: 300.0,
            Tmax: 2000.0,
            Pmin: 1e3,
            Pmax: 1e7,
            decade_step: 1.0,
            fine_decade_step: 0.1,
            pressure_curve_temperatures: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermoGrid {
    pub Tmin: f64,
    pub Tmax: f64,
    /// upper temperature for group additivity tables without a declared range, K
    pub group_additivity_Tmax: f64,
    pub step: f64,
}

impl Default for ThermoGrid {
    fn default() -> Self {
        Self {
            Tmin: 300.0,
            Tmax: 2000.0,
            group_additivity_Tmax: 1500.0,
            step: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatesGrid {
    pub Tmin: f64,
    pub Tmax: f64,
    pub T_step: f64,
    /// J/mol
    pub Emax: f64,
    pub n_energies: usize,
    /// points on [0, 2π) for torsional potentials
    pub n_angles: usize,
}

impl Default for StatesGrid {
    fn default() -> Self {
        Self {
            Tmin: 10.0,
            Tmax: 2000.0,
            T_step: 10.0,
            Emax: 400000.0,
            n_energies: 401,
            n_angles: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CurveSettings {
    pub kinetics: KineticsGrid,
    pub thermo: ThermoGrid,
    pub states: StatesGrid,
    /// reaction enthalpy used for Evans-Polanyi models, J/mol
    pub reference_dHrxn: f64,
    /// evaluate outside a model's validity range with a warning instead of failing
    pub tolerate_out_of_range: bool,
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), SettingsError> {
    if min > 0.0 && min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(SettingsError::Invalid(format!(
            "{} range must satisfy 0 < min < max, got [{}, {}]",
            name, min, max
        )))
    }
}

fn check_step(name: &str, step: f64) -> Result<(), SettingsError> {
    if step > 0.0 && step.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::Invalid(format!("{} must be positive, got {}", name, step)))
    }
}

impl CurveSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: CurveSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&content)?;
        info!("Loaded curve settings from '{}'", path.display());
        Ok(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let k = &self.kinetics;
        if k.points < 2 || k.pressure_curve_temperatures < 2 {
            return Err(SettingsError::Invalid(
                "rate curves need at least 2 temperatures".to_string(),
            ));
        }
        check_range("kinetics temperature", k.Tmin, k.Tmax)?;
        check_range("pressure", k.Pmin, k.Pmax)?;
        check_step("pressure decade step", k.decade_step)?;
        check_step("fine pressure decade step", k.fine_decade_step)?;
        let t = &self.thermo;
        check_range("thermo temperature", t.Tmin, t.Tmax)?;
        check_range("group additivity temperature", t.Tmin, t.group_additivity_Tmax)?;
        check_step("thermo temperature step", t.step)?;
        let s = &self.states;
        check_range("states temperature", s.Tmin, s.Tmax)?;
        check_step("states temperature step", s.T_step)?;
        check_step("Emax", s.Emax)?;
        if s.n_energies < 2 || s.n_angles < 2 {
            return Err(SettingsError::Invalid(
                "energy and angle grids need at least 2 points".to_string(),
            ));
        }
        if !self.reference_dHrxn.is_finite() {
            return Err(SettingsError::Invalid("reference dHrxn must be finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = CurveSettings::new();
        assert_eq!(settings.kinetics.points, 50);
        assert_eq!(settings.kinetics.Pmin, 1e3);
        assert_eq!(settings.thermo.step, 10.0);
        assert_eq!(settings.states.n_energies, 401);
        assert_eq!(settings.reference_dHrxn, 0.0);
        assert!(!settings.tolerate_out_of_range);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            CurveSettings::from_json_str(r#"{"kinetics": {"points": 20}, "tolerate_out_of_range": true}"#)
                .unwrap();
        assert_eq!(settings.kinetics.points, 20);
        assert_eq!(settings.kinetics.Tmax, 2000.0);
        assert!(settings.tolerate_out_of_range);
        assert_eq!(settings.thermo, ThermoGrid::default());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(
            CurveSettings::from_json_str(r#"{"kinetics": {"points": 1}}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            CurveSettings::from_json_str(r#"{"thermo": {"Tmin": 2000.0, "Tmax": 300.0}}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            CurveSettings::from_json_str("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"states": {{"Emax": 100000.0, "n_energies": 101}}, "reference_dHrxn": -50000.0}}"#)
            .unwrap();
        let settings = CurveSettings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.states.Emax, 100000.0);
        assert_eq!(settings.reference_dHrxn, -50000.0);

        let saved = NamedTempFile::new().unwrap();
        settings.save_to_file(saved.path()).unwrap();
        assert_eq!(CurveSettings::from_file(saved.path()).unwrap(), settings);
        assert!(matches!(
            CurveSettings::from_file("no_such_settings_file.json"),
            Err(SettingsError::Io(_))
        ));
    }
}
