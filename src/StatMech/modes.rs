//! # Molecular Degrees of Freedom
//!
//! ## Aim
//! Each mode gives its contribution to heat capacity Cv (J/mol/K), enthalpy (J/mol), entropy (J/mol/K),
//! the partition function Q and the density of states ρ(E) (mol/J) on an energy grid in J/mol.
//!
//! ## Main Data Structures and Logic
//! - `Translation`: 3D ideal-gas translation of a molecule of given molar mass, Q per 1 atm
//! - `RigidRotor`: classical linear (one moment of inertia) or nonlinear (three moments) rotor
//! - `HarmonicOscillator`: set of quantum harmonic vibrations given as wavenumbers in cm⁻¹. Its density
//!   of states is built by stacking the comb of vibrational quanta onto an existing density
//! - `HinderedRotor`: 1D internal rotation in a cosine potential (closed Bessel/elliptic forms) or in a
//!   Fourier-series potential, the latter needing externally solved eigenvalue energies
//! - `Mode`: closed enum over all of the above, dispatching `StatMechCalculator` via enum_dispatch
use super::special_functions::{besseli0e, besseli1e, cellipk, check_energy_grid};
use enum_dispatch::enum_dispatch;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;
use thiserror::Error;

/// universal gas constant, J/(mol·K)
pub const R: f64 = 8.314472;
/// Planck constant, J·s
pub const H_PLANCK: f64 = 6.62606896e-34;
/// Boltzmann constant, J/K
pub const K_B: f64 = 1.3806504e-23;
/// Avogadro constant, 1/mol
pub const N_A: f64 = 6.02214179e23;
/// speed of light, cm/s
pub const C_LIGHT: f64 = 2.99792458e10;
/// reference pressure of the translational partition function, Pa
pub const P_REF: f64 = 101325.0;
/// Boltzmann constant in cm⁻¹/K
pub const K_B_CM: f64 = K_B / (H_PLANCK * C_LIGHT);

#[derive(Debug, Error, PartialEq)]
pub enum StatMechError {
    #[error("Invalid mode parameters: {0}")]
    Construction(String),
    #[error("Invalid argument: {0}")]
    Domain(String),
    #[error("Operation not supported: {0}")]
    Unsupported(String),
}

fn construction<T>(msg: String) -> Result<T, StatMechError> {
    Err(StatMechError::Construction(msg))
}

fn check_positive(name: &str, value: f64) -> Result<(), StatMechError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        construction(format!("{} must be positive and finite, got {}", name, value))
    }
}

pub(crate) fn check_temperature(T: f64) -> Result<(), StatMechError> {
    if T > 0.0 && T.is_finite() {
        Ok(())
    } else {
        Err(StatMechError::Domain(format!(
            "temperature must be positive and finite, got {} K",
            T
        )))
    }
}

/// rotational temperature h²/(8π²·I·kB) of a moment of inertia in kg·m², K
pub fn rotational_temperature(inertia: f64) -> f64 {
    H_PLANCK * H_PLANCK / (8.0 * PI * PI * inertia * K_B)
}

#[enum_dispatch]
pub trait StatMechCalculator {
    fn validate(&self) -> Result<(), StatMechError>;
    /// Cv contribution, J/(mol·K)
    fn get_heat_capacity(&self, T: f64) -> Result<f64, StatMechError>;
    /// J/mol
    fn get_enthalpy(&self, T: f64) -> Result<f64, StatMechError>;
    /// J/(mol·K)
    fn get_entropy(&self, T: f64) -> Result<f64, StatMechError>;
    fn get_partition_function(&self, T: f64) -> Result<f64, StatMechError>;
    /// ρ(E) in mol/J at the energies `Elist` in J/mol
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, StatMechError>;
}

/////////////////////////TRANSLATION///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// molar mass, kg/mol
    pub mass: f64,
}

impl Translation {
    pub fn new(mass: f64) -> Result<Self, StatMechError> {
        let translation = Self { mass };
        translation.validate()?;
        Ok(translation)
    }
    fn qt(&self) -> f64 {
        (2.0 * PI * self.mass / N_A / (H_PLANCK * H_PLANCK)).powf(1.5) / P_REF
    }
}

impl StatMechCalculator for Translation {
    fn validate(&self) -> Result<(), StatMechError> {
        check_positive("mass", self.mass)
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        Ok(1.5 * R)
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        Ok(1.5 * R * T)
    }
    fn get_entropy(&self, T: f64) -> Result<f64, StatMechError> {
        Ok(R * (self.get_partition_function(T)?.ln() + 2.5))
    }
    fn get_partition_function(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        Ok(self.qt() * (K_B * T).powf(2.5))
    }
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, StatMechError> {
        // Γ(5/2)
        let gamma = 0.75 * PI.sqrt();
        let qt = self.qt();
        Ok(Elist
            .iter()
            .map(|E| {
                if *E > 0.0 {
                    qt * (E / N_A).powf(1.5) / gamma / N_A
                } else {
                    0.0
                }
            })
            .collect())
    }
}

/////////////////////////RIGID ROTOR///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidRotor {
    pub linear: bool,
    /// moments of inertia, kg·m²: one for a linear rotor, three for a nonlinear one
    pub inertia: Vec<f64>,
    /// external symmetry number
    pub symmetry: f64,
}

impl RigidRotor {
    pub fn new(linear: bool, inertia: Vec<f64>, symmetry: f64) -> Result<Self, StatMechError> {
        let rotor = Self {
            linear,
            inertia,
            symmetry,
        };
        rotor.validate()?;
        Ok(rotor)
    }
    /// product of the rotational temperatures, K (K³ for a nonlinear rotor)
    fn theta(&self) -> f64 {
        self.inertia.iter().map(|I| rotational_temperature(*I)).product()
    }
}

impl StatMechCalculator for RigidRotor {
    fn validate(&self) -> Result<(), StatMechError> {
        let expected = if self.linear { 1 } else { 3 };
        if self.inertia.len() != expected {
            return construction(format!(
                "{} rigid rotor needs {} moment(s) of inertia, got {}",
                if self.linear { "linear" } else { "nonlinear" },
                expected,
                self.inertia.len()
            ));
        }
        for I in &self.inertia {
            check_positive("moment of inertia", *I)?;
        }
        check_positive("symmetry number", self.symmetry)
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        Ok(if self.linear { R } else { 1.5 * R })
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        Ok(if self.linear { R * T } else { 1.5 * R * T })
    }
    fn get_entropy(&self, T: f64) -> Result<f64, StatMechError> {
        let lnQ = self.get_partition_function(T)?.ln();
        Ok(if self.linear { R * (lnQ + 1.0) } else { R * (lnQ + 1.5) })
    }
    fn get_partition_function(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let theta = self.theta();
        Ok(if self.linear {
            T / theta / self.symmetry
        } else {
            (PI * T.powi(3) / theta).sqrt() / self.symmetry
        })
    }
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, StatMechError> {
        if self.linear {
            let rho = 1.0 / (R * self.theta()) / self.symmetry;
            Ok(vec![rho; Elist.len()])
        } else {
            // rotational temperatures converted to J/mol
            let theta = self.theta() * R.powi(3);
            Ok(Elist
                .iter()
                .map(|E| 2.0 * (E.max(0.0) / theta).sqrt() / self.symmetry)
                .collect())
        }
    }
}

/////////////////////////HARMONIC OSCILLATOR///////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicOscillator {
    /// vibrational wavenumbers, cm⁻¹
    pub frequencies: Vec<f64>,
}

impl HarmonicOscillator {
    pub fn new(frequencies: Vec<f64>) -> Result<Self, StatMechError> {
        let oscillator = Self { frequencies };
        oscillator.validate()?;
        Ok(oscillator)
    }
    fn reduced_frequencies(&self, T: f64) -> impl Iterator<Item = f64> + '_ {
        self.frequencies.iter().map(move |nu| nu / (K_B_CM * T))
    }
    /// Stacks the vibrational quanta onto `rho0`: for each frequency the spacing is rounded to
    /// a whole number of grid steps dr and rho[r] += rho[r − dr] for every r >= dr.
    pub fn stack_density_of_states(&self, Elist: &[f64], rho0: &[f64]) -> Result<Vec<f64>, StatMechError> {
        let dE = check_energy_grid(Elist)?;
        if rho0.len() != Elist.len() {
            return Err(StatMechError::Domain(format!(
                "density of states has {} points, the energy grid {}",
                rho0.len(),
                Elist.len()
            )));
        }
        let mut rho = rho0.to_vec();
        for nu in &self.frequencies {
            let dr = (nu * H_PLANCK * C_LIGHT * N_A / dE).round() as usize;
            if dr == 0 {
                return Err(StatMechError::Domain(format!(
                    "energy grid step {} J/mol is too coarse for the {} cm-1 vibration",
                    dE, nu
                )));
            }
            for r in dr..rho.len() {
                rho[r] += rho[r - dr];
            }
        }
        Ok(rho)
    }
}

impl StatMechCalculator for HarmonicOscillator {
    fn validate(&self) -> Result<(), StatMechError> {
        for nu in &self.frequencies {
            check_positive("vibrational frequency", *nu)?;
        }
        Ok(())
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let Cv: f64 = self
            .reduced_frequencies(T)
            .map(|x| {
                let exp_minus_x = (-x).exp();
                let one_minus = -(-x).exp_m1();
                x * x * exp_minus_x / (one_minus * one_minus)
            })
            .sum();
        Ok(Cv * R)
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let H: f64 = self.reduced_frequencies(T).map(|x| x / x.exp_m1()).sum();
        Ok(H * R * T)
    }
    fn get_entropy(&self, T: f64) -> Result<f64, StatMechError> {
        let S = self.get_partition_function(T)?.ln()
            + self.reduced_frequencies(T).map(|x| x / x.exp_m1()).sum::<f64>();
        Ok(S * R)
    }
    fn get_partition_function(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        Ok(self.reduced_frequencies(T).map(|x| 1.0 / -(-x).exp_m1()).product())
    }
    /// vibrational quanta stacked onto a unit population at E = Elist[0]
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, StatMechError> {
        let dE = check_energy_grid(Elist)?;
        let mut rho0 = vec![0.0; Elist.len()];
        rho0[0] = 1.0 / dE;
        self.stack_density_of_states(Elist, &rho0)
    }
}

/////////////////////////HINDERED ROTOR///////////////////////////////////////////////////////////
/// torsional potential of a hindered rotor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RotorPotential {
    /// V(φ) = V0/2·(1 − cos σφ), barrier V0 in J/mol
    Cosine { barrier: f64 },
    /// V(φ) = Σ a_k·cos((k+1)φ) + b_k·sin((k+1)φ) − Σ a_k, coefficients in J/mol.
    /// `energies` are the ascending eigenvalues (J/mol) of the 1D Schrödinger equation for this
    /// potential, solved elsewhere
    Fourier {
        fourierA: Vec<f64>,
        fourierB: Vec<f64>,
        #[serde(default)]
        energies: Option<Vec<f64>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HinderedRotor {
    /// reduced moment of inertia, kg·m²
    pub inertia: f64,
    /// internal symmetry number
    pub symmetry: f64,
    pub potential: RotorPotential,
}

impl HinderedRotor {
    pub fn new_cosine(inertia: f64, symmetry: f64, barrier: f64) -> Result<Self, StatMechError> {
        let rotor = Self {
            inertia,
            symmetry,
            potential: RotorPotential::Cosine { barrier },
        };
        rotor.validate()?;
        Ok(rotor)
    }
    pub fn new_fourier(
        inertia: f64,
        symmetry: f64,
        fourierA: Vec<f64>,
        fourierB: Vec<f64>,
        energies: Option<Vec<f64>>,
    ) -> Result<Self, StatMechError> {
        let rotor = Self {
            inertia,
            symmetry,
            potential: RotorPotential::Fourier {
                fourierA,
                fourierB,
                energies,
            },
        };
        rotor.validate()?;
        Ok(rotor)
    }

    pub fn is_fourier(&self) -> bool {
        matches!(self.potential, RotorPotential::Fourier { .. })
    }

    /// barrier height V0, J/mol; minus the sum of cosine coefficients for a Fourier potential
    pub fn barrier(&self) -> f64 {
        match &self.potential {
            RotorPotential::Cosine { barrier } => *barrier,
            RotorPotential::Fourier { fourierA, .. } => -fourierA.iter().sum::<f64>(),
        }
    }

    /// harmonic wavenumber of the torsion at the bottom of the well, cm⁻¹
    pub fn get_frequency(&self) -> Result<f64, StatMechError> {
        let V0 = self.barrier();
        if !(V0 > 0.0) {
            return Err(StatMechError::Domain(format!(
                "torsional frequency needs a positive barrier, got {} J/mol",
                V0
            )));
        }
        Ok(self.symmetry / 2.0 / PI * (V0 / N_A / 2.0 / self.inertia).sqrt() / C_LIGHT)
    }

    /// torsional potential V(φ), J/mol, at the angle `phi` in radians
    pub fn get_potential(&self, phi: f64) -> f64 {
        match &self.potential {
            RotorPotential::Cosine { barrier } => 0.5 * barrier * (1.0 - (self.symmetry * phi).cos()),
            RotorPotential::Fourier {
                fourierA, fourierB, ..
            } => {
                let V: f64 = fourierA
                    .iter()
                    .zip(fourierB.iter())
                    .enumerate()
                    .map(|(k, (a, b))| {
                        let order = (k + 1) as f64;
                        a * (order * phi).cos() + b * (order * phi).sin()
                    })
                    .sum();
                V - fourierA.iter().sum::<f64>()
            }
        }
    }

    fn energies(&self) -> Result<&[f64], StatMechError> {
        match &self.potential {
            RotorPotential::Fourier {
                energies: Some(energies),
                ..
            } => Ok(energies),
            RotorPotential::Fourier { energies: None, .. } => Err(StatMechError::Unsupported(
                "Fourier hindered rotor needs its eigenvalue energies".to_string(),
            )),
            RotorPotential::Cosine { .. } => Err(StatMechError::Unsupported(
                "cosine hindered rotor has no eigenvalue energies".to_string(),
            )),
        }
    }

    /// (ln Σ e^(−E/RT), ⟨E⟩, ⟨E²⟩ − ⟨E⟩²) over the eigenvalue energies
    fn boltzmann_moments(&self, T: f64) -> Result<(f64, f64, f64), StatMechError> {
        check_temperature(T)?;
        let energies = self.energies()?;
        let E0 = energies[0];
        let weights: Vec<f64> = energies.iter().map(|E| (-(E - E0) / (R * T)).exp()).collect();
        let sum: f64 = weights.iter().sum();
        let mean = energies.iter().zip(&weights).map(|(E, w)| E * w).sum::<f64>() / sum;
        let variance = energies
            .iter()
            .zip(&weights)
            .map(|(E, w)| (E - mean).powi(2) * w)
            .sum::<f64>()
            / sum;
        Ok((sum.ln() - E0 / (R * T), mean, variance))
    }

    fn cosine_ln_partition_function(&self, T: f64) -> Result<f64, StatMechError> {
        check_temperature(T)?;
        let x = self.get_frequency()? / (K_B_CM * T);
        let z = 0.5 * self.barrier() / (R * T);
        let Q = x / -(-x).exp_m1()
            * (2.0 * PI * self.inertia * K_B * T / (H_PLANCK * H_PLANCK)).sqrt()
            * (2.0 * PI / self.symmetry)
            * besseli0e(z);
        Ok(Q.ln())
    }

    /// d ln Q / dT by central difference at T·(1 ± 0.001)
    fn cosine_dlnQ_dT(&self, T: f64) -> Result<f64, StatMechError> {
        let (T_low, T_high) = (T * 0.999, T * 1.001);
        Ok((self.cosine_ln_partition_function(T_high)? - self.cosine_ln_partition_function(T_low)?)
            / (T_high - T_low))
    }
}

impl StatMechCalculator for HinderedRotor {
    fn validate(&self) -> Result<(), StatMechError> {
        check_positive("reduced moment of inertia", self.inertia)?;
        check_positive("internal symmetry number", self.symmetry)?;
        match &self.potential {
            RotorPotential::Cosine { barrier } => check_positive("barrier height", *barrier),
            RotorPotential::Fourier {
                fourierA,
                fourierB,
                energies,
            } => {
                if fourierA.is_empty() || fourierA.len() != fourierB.len() {
                    return construction(format!(
                        "Fourier coefficient arrays must be non-empty and of equal length, got {} and {}",
                        fourierA.len(),
                        fourierB.len()
                    ));
                }
                if fourierA.iter().chain(fourierB.iter()).any(|c| !c.is_finite()) {
                    return construction("Fourier coefficients must be finite".to_string());
                }
                if let Some(energies) = energies {
                    if energies.is_empty() || energies.iter().any(|E| !E.is_finite()) {
                        return construction("eigenvalue energies must be non-empty and finite".to_string());
                    }
                    if energies.windows(2).any(|w| w[1] < w[0]) {
                        return construction("eigenvalue energies must be in ascending order".to_string());
                    }
                }
                Ok(())
            }
        }
    }
    fn get_heat_capacity(&self, T: f64) -> Result<f64, StatMechError> {
        if self.is_fourier() {
            let (_, _, variance) = self.boltzmann_moments(T)?;
            return Ok(variance / (R * T * T));
        }
        check_temperature(T)?;
        let x = self.get_frequency()? / (K_B_CM * T);
        let z = 0.5 * self.barrier() / (R * T);
        let one_minus = -(-x).exp_m1();
        let BB = besseli1e(z) / besseli0e(z);
        Ok((x * x * (-x).exp() / (one_minus * one_minus) - 0.5 + z * (z - BB - z * BB * BB)) * R)
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, StatMechError> {
        if self.is_fourier() {
            let (_, mean, _) = self.boltzmann_moments(T)?;
            return Ok(mean);
        }
        Ok(R * T * T * self.cosine_dlnQ_dT(T)?)
    }
    fn get_entropy(&self, T: f64) -> Result<f64, StatMechError> {
        if self.is_fourier() {
            let (lnQ, mean, _) = self.boltzmann_moments(T)?;
            return Ok(R * (lnQ - self.symmetry.ln()) + mean / T);
        }
        Ok(R * (self.cosine_ln_partition_function(T)? + T * self.cosine_dlnQ_dT(T)?))
    }
    fn get_partition_function(&self, T: f64) -> Result<f64, StatMechError> {
        if self.is_fourier() {
            let (lnQ, _, _) = self.boltzmann_moments(T)?;
            return Ok(lnQ.exp() / self.symmetry);
        }
        Ok(self.cosine_ln_partition_function(T)?.exp())
    }
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, StatMechError> {
        if self.is_fourier() {
            return Err(StatMechError::Unsupported(
                "density of states of a Fourier-potential hindered rotor".to_string(),
            ));
        }
        let V0 = self.barrier();
        let q1f = (8.0 * PI.powi(3) * self.inertia / (H_PLANCK * H_PLANCK) / N_A).sqrt() / self.symmetry;
        let pre = 2.0 * q1f / (PI.powi(3) * V0).sqrt();
        Ok(Elist
            .iter()
            .map(|E| {
                let ratio = E / V0;
                if ratio < 1.0 {
                    pre * cellipk(ratio.max(0.0))
                } else if ratio > 1.0 {
                    pre * (1.0 / ratio).sqrt() * cellipk(1.0 / ratio)
                } else {
                    0.0
                }
            })
            .collect())
    }
}

/////////////////////////////THE MODE FAMILY////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[enum_dispatch(StatMechCalculator)]
pub enum Mode {
    Translation(Translation),
    RigidRotor(RigidRotor),
    HarmonicOscillator(HarmonicOscillator),
    HinderedRotor(HinderedRotor),
}

impl Mode {
    /// takes serde Value, parses it into a mode and validates the parameters
    pub fn from_serde(serde: Value) -> Result<Self, StatMechError> {
        let mode: Mode =
            serde_json::from_value(serde).map_err(|e| StatMechError::Construction(e.to_string()))?;
        mode.validate()?;
        debug!("constructed {} mode", mode.name());
        Ok(mode)
    }
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Translation(_) => "Translation",
            Mode::RigidRotor(_) => "RigidRotor",
            Mode::HarmonicOscillator(_) => "HarmonicOscillator",
            Mode::HinderedRotor(_) => "HinderedRotor",
        }
    }
    /// translation or overall rotation of the whole molecule
    pub fn is_external(&self) -> bool {
        matches!(self, Mode::Translation(_) | Mode::RigidRotor(_))
    }
    pub fn is_vibrational(&self) -> bool {
        matches!(self, Mode::HarmonicOscillator(_))
    }
}
