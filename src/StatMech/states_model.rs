//! A molecule as an ordered collection of degrees of freedom plus its ground-state spin multiplicity.
//! Heat capacity, enthalpy and entropy are sums over the modes, the partition function is a product.
//! When the collection holds neither a translation nor a rigid rotor, an active K-rotor
//! (a 1D external rotor with Q = sqrt(T/Trot), Trot = 1/(π·R)) is included in Q and ρ(E).
use super::modes::{Mode, R, StatMechCalculator, StatMechError, check_temperature};
use super::special_functions::{check_energy_grid, convolve};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;

/// rotational temperature of the active K-rotor, chosen so its density of states is 1/sqrt(E)
pub const T_ROT_K_ROTOR: f64 = 1.0 / (PI * R);

fn default_spin() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatesModel {
    pub modes: Vec<Mode>,
    #[serde(default = "default_spin")]
    pub spinMultiplicity: u32,
}

impl StatesModel {
    pub fn new(modes: Vec<Mode>, spinMultiplicity: u32) -> Result<Self, StatMechError> {
        let model = Self {
            modes,
            spinMultiplicity,
        };
        model.validate()?;
        Ok(model)
    }

    /// takes serde Value, parses it into a states model and validates every mode
    pub fn from_serde(serde: Value) -> Result<Self, StatMechError> {
        let model: StatesModel =
            serde_json::from_value(serde).map_err(|e| StatMechError::Construction(e.to_string()))?;
        model.validate()?;
        debug!(
            "constructed states model: {} modes, spin multiplicity {}",
            model.modes.len(),
            model.spinMultiplicity
        );
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), StatMechError> {
        if self.spinMultiplicity < 1 {
            return Err(StatMechError::Construction(
                "spin multiplicity must be at least 1".to_string(),
            ));
        }
        for mode in &self.modes {
            mode.validate()?;
        }
        Ok(())
    }

    /// true when no mode describes the translation or overall rotation of the molecule
    pub fn use_active_K_rotor(&self) -> bool {
        !self.modes.iter().any(Mode::is_external)
    }

    /// Cp, J/(mol·K)
    pub fn get_heat_capacity(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let mut Cp = R;
        for mode in &self.modes {
            Cp += mode.get_heat_capacity(T)?;
        }
        Ok(Cp)
    }

    /// J/mol
    pub fn get_enthalpy(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let mut H = R * T;
        for mode in &self.modes {
            H += mode.get_enthalpy(T)?;
        }
        Ok(H)
    }

    /// J/(mol·K), including the electronic degeneracy term R·ln(spin)
    pub fn get_entropy(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let mut S = R * (self.spinMultiplicity as f64).ln();
        for mode in &self.modes {
            S += mode.get_entropy(T)?;
        }
        Ok(S)
    }

    pub fn get_partition_function(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let mut Q = 1.0;
        if self.use_active_K_rotor() {
            Q *= (T / T_ROT_K_ROTOR).sqrt();
        }
        for mode in &self.modes {
            Q *= mode.get_partition_function(T)?;
        }
        Ok(Q * self.spinMultiplicity as f64)
    }

    /// ρ(E), mol/J, on a uniform grid `Elist` in J/mol. The K-rotor and every non-vibrational mode
    /// are convolved first, harmonic oscillators are stacked onto the result last.
    pub fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, StatMechError> {
        check_energy_grid(Elist)?;
        let mut rho = vec![0.0; Elist.len()];
        if self.use_active_K_rotor() {
            let rho_K: Vec<f64> = Elist
                .iter()
                .map(|E| if *E > 0.0 { 1.0 / E.sqrt() } else { 0.0 })
                .collect();
            rho = convolve(&rho, &rho_K, Elist)?;
        }
        for mode in self.modes.iter().filter(|mode| !mode.is_vibrational()) {
            let rho_mode = mode.get_density_of_states(Elist)?;
            rho = convolve(&rho, &rho_mode, Elist)?;
        }
        for mode in &self.modes {
            if let Mode::HarmonicOscillator(oscillator) = mode {
                rho = oscillator.stack_density_of_states(Elist, &rho)?;
            }
        }
        Ok(rho)
    }
}
