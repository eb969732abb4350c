#[cfg(test)]
mod tests {
    use crate::StatMech::modes::*;
    use crate::StatMech::states_model::*;
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::f64::consts::PI;

    fn trapezoid(Elist: &[f64], f: &[f64]) -> f64 {
        Elist
            .windows(2)
            .zip(f.windows(2))
            .map(|(E, y)| 0.5 * (y[0] + y[1]) * (E[1] - E[0]))
            .sum()
    }

    fn laplace_transform(mode: &Mode, T: f64, Emax: f64, dE: f64) -> f64 {
        let n = (Emax / dE) as usize + 1;
        let Elist: Vec<f64> = (0..n).map(|i| i as f64 * dE).collect();
        let rho = mode.get_density_of_states(&Elist).unwrap();
        let weighted: Vec<f64> = Elist
            .iter()
            .zip(rho.iter())
            .map(|(E, rho)| rho * (-E / (R * T)).exp())
            .collect();
        trapezoid(&Elist, &weighted)
    }

    fn methyl_rotor() -> HinderedRotor {
        HinderedRotor::new_cosine(5e-47, 3.0, 12000.0).unwrap()
    }

    #[test]
    fn test_linear_rotor_heat_capacity_is_R() {
        let rotor = RigidRotor::new(true, vec![1.0e-46], 1.0).unwrap();
        for T in [1.0, 298.15, 5000.0] {
            assert_eq!(rotor.get_heat_capacity(T).unwrap(), 8.314472);
        }
        let nonlinear = RigidRotor::new(false, vec![1e-46, 2e-46, 3e-46], 2.0).unwrap();
        assert_eq!(nonlinear.get_heat_capacity(500.0).unwrap(), 1.5 * R);
    }

    #[test]
    fn test_rigid_rotor_partition_function_and_entropy() {
        let rotor = RigidRotor::new(true, vec![1.0e-46], 2.0).unwrap();
        let theta = rotational_temperature(1.0e-46);
        let Q = rotor.get_partition_function(1000.0).unwrap();
        assert_relative_eq!(Q, 1000.0 / theta / 2.0, max_relative = 1e-12);
        assert_relative_eq!(rotor.get_entropy(1000.0).unwrap(), R * (Q.ln() + 1.0), max_relative = 1e-12);
        assert_relative_eq!(rotor.get_enthalpy(1000.0).unwrap(), R * 1000.0);
    }

    #[test]
    fn test_rigid_rotor_construction_errors() {
        assert!(matches!(
            RigidRotor::new(false, vec![1e-46], 1.0),
            Err(StatMechError::Construction(_))
        ));
        assert!(matches!(
            RigidRotor::new(true, vec![1e-46, 1e-46], 1.0),
            Err(StatMechError::Construction(_))
        ));
        assert!(matches!(
            RigidRotor::new(true, vec![-1e-46], 1.0),
            Err(StatMechError::Construction(_))
        ));
        assert!(matches!(
            RigidRotor::new(true, vec![1e-46], 0.0),
            Err(StatMechError::Construction(_))
        ));
    }

    #[test]
    fn test_density_of_states_integrates_to_partition_function() {
        let T = 300.0;
        let nonlinear = Mode::from(RigidRotor::new(false, vec![1e-46, 2e-46, 3e-46], 2.0).unwrap());
        let Q = nonlinear.get_partition_function(T).unwrap();
        assert_relative_eq!(laplace_transform(&nonlinear, T, 40.0 * R * T, 1.0), Q, max_relative = 1e-3);

        let linear = Mode::from(RigidRotor::new(true, vec![1e-46], 1.0).unwrap());
        let Q = linear.get_partition_function(T).unwrap();
        assert_relative_eq!(laplace_transform(&linear, T, 40.0 * R * T, 1.0), Q, max_relative = 1e-3);

        let translation = Mode::from(Translation::new(0.039948).unwrap());
        let Q = translation.get_partition_function(T).unwrap();
        assert_relative_eq!(laplace_transform(&translation, T, 60.0 * R * T, 1.0), Q, max_relative = 1e-3);
    }

    #[test]
    fn test_translation_sackur_tetrode() {
        let argon = Translation::new(0.039948).unwrap();
        assert_relative_eq!(argon.get_entropy(298.15).unwrap(), 154.73641460444583, max_relative = 1e-8);
        assert_eq!(argon.get_heat_capacity(298.15).unwrap(), 1.5 * R);
        assert_relative_eq!(argon.get_enthalpy(1000.0).unwrap(), 1500.0 * R);
        assert!(matches!(Translation::new(0.0), Err(StatMechError::Construction(_))));
        assert!(matches!(argon.get_partition_function(-1.0), Err(StatMechError::Domain(_))));
    }

    #[test]
    fn test_harmonic_oscillator_thermodynamics() {
        let oscillator = HarmonicOscillator::new(vec![1000.0]).unwrap();
        let T = 1000.0;
        let Q = oscillator.get_partition_function(T).unwrap();
        assert_relative_eq!(Q, 1.3109907903288809, max_relative = 1e-9);
        let H = oscillator.get_enthalpy(T).unwrap();
        assert_relative_eq!(oscillator.get_entropy(T).unwrap(), R * Q.ln() + H / T, max_relative = 1e-12);
        let h = 1e-2;
        let dH = (oscillator.get_enthalpy(T + h).unwrap() - oscillator.get_enthalpy(T - h).unwrap()) / (2.0 * h);
        assert_relative_eq!(oscillator.get_heat_capacity(T).unwrap(), dH, max_relative = 1e-6);
        // classical limit
        assert_relative_eq!(oscillator.get_heat_capacity(1e6).unwrap(), R, max_relative = 1e-6);
        // frozen out at low temperature without overflow
        assert_eq!(oscillator.get_heat_capacity(1.0).unwrap(), 0.0);
        assert!(matches!(
            HarmonicOscillator::new(vec![1000.0, -5.0]),
            Err(StatMechError::Construction(_))
        ));
    }

    #[test]
    fn test_harmonic_oscillator_density_of_states() {
        let oscillator = HarmonicOscillator::new(vec![1000.0]).unwrap();
        // one quantum of 1000 cm-1 is 11962.66 J/mol, i.e. 12 steps of 1000 J/mol
        let Elist: Vec<f64> = (0..40).map(|i| i as f64 * 1000.0).collect();
        let rho = oscillator.get_density_of_states(&Elist).unwrap();
        for (r, value) in rho.iter().enumerate() {
            let expected = if r % 12 == 0 { 1e-3 } else { 0.0 };
            assert_eq!(*value, expected, "index {}", r);
        }
        let coarse = [0.0, 1e6, 2e6];
        assert!(matches!(
            HarmonicOscillator::new(vec![100.0]).unwrap().get_density_of_states(&coarse),
            Err(StatMechError::Domain(_))
        ));
    }

    #[test]
    fn test_cosine_hindered_rotor() {
        let rotor = methyl_rotor();
        assert_relative_eq!(rotor.get_frequency().unwrap(), 224.8204527767841, max_relative = 1e-9);
        assert_relative_eq!(rotor.get_partition_function(300.0).unwrap(), 1.6277252589842182, max_relative = 1e-5);
        assert_relative_eq!(rotor.get_heat_capacity(300.0).unwrap(), 9.046212384855854, max_relative = 1e-5);
        for T in [300.0, 1000.0] {
            let h = 1e-3 * T;
            let dH = (rotor.get_enthalpy(T + h).unwrap() - rotor.get_enthalpy(T - h).unwrap()) / (2.0 * h);
            assert_relative_eq!(rotor.get_heat_capacity(T).unwrap(), dH, max_relative = 1e-3);
            let Q = rotor.get_partition_function(T).unwrap();
            let H = rotor.get_enthalpy(T).unwrap();
            assert_relative_eq!(rotor.get_entropy(T).unwrap(), R * Q.ln() + H / T, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_cosine_hindered_rotor_deep_well() {
        // V0/(2RT) far beyond the range where I0 and I1 are representable
        let cases = [
            (methyl_rotor(), 1.0),
            (methyl_rotor(), 0.8),
            (HinderedRotor::new_cosine(5e-47, 3.0, 150000.0).unwrap(), 10.0),
        ];
        for (rotor, T) in cases {
            let Q = rotor.get_partition_function(T).unwrap();
            assert!(Q.is_finite() && Q > 0.0, "Q({}) = {}", T, Q);
            let Cv = rotor.get_heat_capacity(T).unwrap();
            assert!(Cv.is_finite(), "Cv({}) = {}", T, Cv);
            // torsion frozen into its vibrational ground state
            assert!(Cv.abs() < R, "Cv({}) = {}", T, Cv);
            assert!(rotor.get_enthalpy(T).unwrap().is_finite());
            assert!(rotor.get_entropy(T).unwrap().is_finite());
        }
    }

    #[test]
    fn test_cosine_hindered_rotor_potential_and_density() {
        let rotor = methyl_rotor();
        assert_relative_eq!(rotor.get_potential(0.0), 0.0);
        assert_relative_eq!(rotor.get_potential(PI / 3.0), 12000.0, max_relative = 1e-12);
        let rho = rotor.get_density_of_states(&[0.0, 6000.0, 12000.0, 18000.0, 1e8]).unwrap();
        assert_eq!(rho[2], 0.0);
        assert!(rho[0] > 0.0 && rho[1] > rho[0] && rho[3] > 0.0);
        // far above the barrier the rotor is free: ρ = q1f/sqrt(π·E)
        let q1f = (8.0 * PI.powi(3) * 5e-47 / (H_PLANCK * H_PLANCK) / N_A).sqrt() / 3.0;
        assert_relative_eq!(rho[4], q1f / (PI * 1e8).sqrt(), max_relative = 1e-4);
    }

    #[test]
    fn test_fourier_hindered_rotor() {
        let energies = vec![0.0, 1000.0, 2500.0, 4000.0];
        let rotor =
            HinderedRotor::new_fourier(5e-47, 2.0, vec![-1000.0, 0.0], vec![0.0, 0.0], Some(energies.clone()))
                .unwrap();
        let T = 500.0;
        let e: Vec<f64> = energies.iter().map(|E| (-E / (R * T)).exp()).collect();
        let sum: f64 = e.iter().sum();
        let sum_E: f64 = energies.iter().zip(&e).map(|(E, w)| E * w).sum();
        let sum_EE: f64 = energies.iter().zip(&e).map(|(E, w)| E * E * w).sum();
        assert_relative_eq!(rotor.get_partition_function(T).unwrap(), sum / 2.0, max_relative = 1e-12);
        assert_relative_eq!(rotor.get_enthalpy(T).unwrap(), sum_E / sum, max_relative = 1e-12);
        assert_relative_eq!(
            rotor.get_entropy(T).unwrap(),
            R * (sum / 2.0).ln() + sum_E / (T * sum),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            rotor.get_heat_capacity(T).unwrap(),
            (sum_EE * sum - sum_E * sum_E) / (R * T * T * sum * sum),
            max_relative = 1e-9
        );
        assert_relative_eq!(rotor.get_potential(0.0), 0.0);
        assert_relative_eq!(rotor.get_potential(PI), 2000.0, max_relative = 1e-12);
        assert_relative_eq!(rotor.barrier(), 1000.0);
        assert!(rotor.get_frequency().unwrap() > 0.0);
        assert!(matches!(
            rotor.get_density_of_states(&[0.0, 1.0]),
            Err(StatMechError::Unsupported(_))
        ));
    }

    #[test]
    fn test_fourier_hindered_rotor_without_energies() {
        let rotor = HinderedRotor::new_fourier(5e-47, 1.0, vec![-1000.0], vec![0.0], None).unwrap();
        assert!(matches!(rotor.get_heat_capacity(300.0), Err(StatMechError::Unsupported(_))));
        assert!(matches!(rotor.get_enthalpy(300.0), Err(StatMechError::Unsupported(_))));
        assert!(matches!(rotor.get_entropy(300.0), Err(StatMechError::Unsupported(_))));
        assert!(matches!(rotor.get_partition_function(300.0), Err(StatMechError::Unsupported(_))));
        assert!(matches!(
            HinderedRotor::new_fourier(5e-47, 1.0, vec![-1000.0], vec![], None),
            Err(StatMechError::Construction(_))
        ));
        assert!(matches!(
            HinderedRotor::new_fourier(5e-47, 1.0, vec![-1000.0], vec![0.0], Some(vec![10.0, 0.0])),
            Err(StatMechError::Construction(_))
        ));
    }

    #[test]
    fn test_active_K_rotor_only_without_external_modes() {
        let oscillator = Mode::from(HarmonicOscillator::new(vec![1000.0, 1500.0]).unwrap());
        let vibrations = StatesModel::new(vec![oscillator.clone()], 1).unwrap();
        assert!(vibrations.use_active_K_rotor());
        let T = 600.0;
        assert_relative_eq!(
            vibrations.get_partition_function(T).unwrap(),
            oscillator.get_partition_function(T).unwrap() * (PI * R * T).sqrt(),
            max_relative = 1e-12
        );

        let translation = Mode::from(Translation::new(0.028).unwrap());
        let molecule = StatesModel::new(vec![translation.clone(), oscillator.clone()], 1).unwrap();
        assert!(!molecule.use_active_K_rotor());
        assert_relative_eq!(
            molecule.get_partition_function(T).unwrap(),
            translation.get_partition_function(T).unwrap() * oscillator.get_partition_function(T).unwrap(),
            max_relative = 1e-12
        );
        let rotor = Mode::from(RigidRotor::new(true, vec![1e-46], 1.0).unwrap());
        assert!(!StatesModel::new(vec![rotor, oscillator], 1).unwrap().use_active_K_rotor());
    }

    #[test]
    fn test_states_model_sums_and_spin() {
        let translation = Mode::from(Translation::new(0.028).unwrap());
        let rotor = Mode::from(RigidRotor::new(true, vec![1.4e-46], 2.0).unwrap());
        let singlet = StatesModel::new(vec![translation.clone(), rotor.clone()], 1).unwrap();
        let doublet = StatesModel::new(vec![translation, rotor], 2).unwrap();
        let T = 400.0;
        assert_relative_eq!(singlet.get_heat_capacity(T).unwrap(), 3.5 * R, max_relative = 1e-12);
        assert_relative_eq!(singlet.get_enthalpy(T).unwrap(), 3.5 * R * T, max_relative = 1e-12);
        assert_relative_eq!(
            doublet.get_entropy(T).unwrap() - singlet.get_entropy(T).unwrap(),
            R * 2f64.ln(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            doublet.get_partition_function(T).unwrap(),
            2.0 * singlet.get_partition_function(T).unwrap(),
            max_relative = 1e-12
        );
        assert!(matches!(StatesModel::new(vec![], 0), Err(StatMechError::Construction(_))));
    }

    #[test]
    fn test_states_density_of_states_stacks_vibrations_last() {
        let Elist: Vec<f64> = (0..40).map(|i| i as f64 * 1000.0).collect();
        let rotor = RigidRotor::new(true, vec![1e-46], 1.0).unwrap();
        let constant = 1.0 / (R * rotational_temperature(1e-46));
        let oscillator = Mode::from(HarmonicOscillator::new(vec![1000.0]).unwrap());
        // vibration listed first, still applied after the rotor
        let model = StatesModel::new(vec![oscillator.clone(), Mode::from(rotor)], 1).unwrap();
        let rho = model.get_density_of_states(&Elist).unwrap();
        for (r, value) in rho.iter().enumerate() {
            assert_relative_eq!(*value, constant * (r / 12 + 1) as f64, max_relative = 1e-12);
        }

        // without external modes the K-rotor density 1/sqrt(E) is the base
        let vibrations = StatesModel::new(vec![oscillator], 1).unwrap();
        let rho = vibrations.get_density_of_states(&Elist).unwrap();
        assert_eq!(rho[0], 0.0);
        assert_relative_eq!(rho[12], 1.0 / 12000f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(rho[13], 1.0 / 13000f64.sqrt() + 1.0 / 1000f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_states_density_of_states_errors() {
        let fourier = Mode::from(
            HinderedRotor::new_fourier(5e-47, 1.0, vec![-1000.0], vec![0.0], Some(vec![0.0, 500.0])).unwrap(),
        );
        let model = StatesModel::new(vec![fourier], 1).unwrap();
        assert!(matches!(
            model.get_density_of_states(&[0.0, 100.0, 200.0]),
            Err(StatMechError::Unsupported(_))
        ));
        assert!(matches!(
            model.get_density_of_states(&[0.0, 100.0, 250.0]),
            Err(StatMechError::Domain(_))
        ));
    }

    #[test]
    fn test_from_serde() {
        let model = StatesModel::from_serde(json!({
            "modes": [
                {"type": "Translation", "mass": 0.016043},
                {"type": "RigidRotor", "linear": false, "inertia": [5.3e-47, 5.3e-47, 5.3e-47], "symmetry": 12.0},
                {"type": "HarmonicOscillator", "frequencies": [1306.0, 1306.0, 1306.0, 1534.0, 1534.0, 2917.0, 3019.0, 3019.0, 3019.0]},
                {"type": "HinderedRotor", "inertia": 5e-47, "symmetry": 3.0, "potential": {"Cosine": {"barrier": 12000.0}}}
            ],
            "spinMultiplicity": 1
        }))
        .unwrap();
        assert_eq!(model.modes.len(), 4);
        assert_eq!(model.modes[3].name(), "HinderedRotor");
        assert!(model.get_heat_capacity(298.15).unwrap() > 4.0 * R);

        let mode = Mode::from_serde(json!({"type": "HarmonicOscillator", "frequencies": [500.0]})).unwrap();
        assert!(mode.is_vibrational());
        assert!(matches!(
            Mode::from_serde(json!({"type": "RigidRotor", "linear": true, "inertia": [], "symmetry": 1.0})),
            Err(StatMechError::Construction(_))
        ));
        let default_spin = StatesModel::from_serde(json!({"modes": []})).unwrap();
        assert_eq!(default_spin.spinMultiplicity, 1);
    }
}
