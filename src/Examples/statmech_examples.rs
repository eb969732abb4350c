use crate::StatMech::modes::{
    HarmonicOscillator, HinderedRotor, Mode, RigidRotor, StatMechCalculator, Translation,
};
use crate::StatMech::states_model::StatesModel;
use crate::curves::CurveBuilder;
use crate::settings::CurveSettings;
use serde_json::json;

pub fn statmech_examples(task: usize) {
    //
    match task {
        0 => {
            // individual modes at 298.15 K
            let modes: Vec<Mode> = vec![
                Translation::new(0.028).map(Mode::from),
                RigidRotor::new(true, vec![1.4e-46], 2.0).map(Mode::from),
                HarmonicOscillator::new(vec![2359.0]).map(Mode::from),
                HinderedRotor::new_cosine(5e-47, 3.0, 12000.0).map(Mode::from),
            ]
            .into_iter()
            .filter_map(|mode| mode.map_err(|e| println!("{}", e)).ok())
            .collect();
            let T = 298.15;
            for mode in &modes {
                match (
                    mode.get_heat_capacity(T),
                    mode.get_entropy(T),
                    mode.get_partition_function(T),
                ) {
                    (Ok(Cv), Ok(S), Ok(Q)) => {
                        println!("{}: Cv = {:.3}, S = {:.3}, Q = {:.4e}", mode.name(), Cv, S, Q)
                    }
                    _ => println!("{}: evaluation failed", mode.name()),
                }
            }
        }
        1 => {
            // ethane-like molecule from JSON, with curves
            let states = StatesModel::from_serde(json!({
                "modes": [
                    {"type": "Translation", "mass": 0.03007},
                    {"type": "RigidRotor", "linear": false, "inertia": [1.06e-46, 4.24e-46, 4.24e-46], "symmetry": 6.0},
                    {"type": "HarmonicOscillator", "frequencies": [822.0, 822.0, 995.0, 1190.0, 1190.0, 1379.0,
                        1388.0, 1468.0, 1468.0, 1469.0, 1469.0, 2896.0, 2954.0, 2969.0, 2969.0, 2985.0, 2985.0]},
                    {"type": "HinderedRotor", "inertia": 2.65e-47, "symmetry": 3.0, "potential": {"Cosine": {"barrier": 12250.0}}}
                ],
                "spinMultiplicity": 1
            }));
            let states = match states {
                Ok(states) => states,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            for T in [298.15, 1000.0] {
                match (states.get_heat_capacity(T), states.get_enthalpy(T), states.get_entropy(T)) {
                    (Ok(Cp), Ok(H), Ok(S)) => {
                        println!("T = {} K: Cp = {:.3}, H = {:.1}, S = {:.3}", T, Cp, H, S)
                    }
                    _ => println!("T = {} K: evaluation failed", T),
                }
            }
            let mut settings = CurveSettings::default();
            settings.states.T_step = 200.0;
            settings.states.n_angles = 12;
            let builder = CurveBuilder::new(settings);
            if let Ok(Q) = builder.partition_function_curve(&states) {
                Q.pretty_print();
            }
            match builder.density_of_states_curve(&states) {
                Ok(rho) => println!("rho at {} kJ/mol: {:.4e} mol/J", rho.points[100].0, rho.points[100].1),
                Err(e) => println!("{}", e),
            }
            for V in builder.potential_curves(&states) {
                V.pretty_print();
            }
        }
        2 => {
            // Fourier torsion: thermodynamics from supplied eigenvalues, no density of states
            let rotor = HinderedRotor::new_fourier(
                2.65e-47,
                3.0,
                vec![-6000.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0],
                Some(vec![0.0, 1650.0, 3200.0, 4650.0, 6000.0, 7400.0]),
            );
            let rotor = match rotor {
                Ok(rotor) => rotor,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            println!("frequency: {:?} cm-1", rotor.get_frequency());
            println!("Cv(500 K): {:?}", rotor.get_heat_capacity(500.0));
            let vibrationless = StatesModel::new(vec![Mode::from(rotor)], 1);
            if let Ok(model) = vibrationless {
                println!("active K-rotor: {}", model.use_active_K_rotor());
                println!("Q(500 K): {:?}", model.get_partition_function(500.0));
                let Elist: Vec<f64> = (0..10).map(|i| i as f64 * 1000.0).collect();
                println!("density of states: {:?}", model.get_density_of_states(&Elist));
            }
        }
        _ => {
            println!("no such statmech example: {}", task);
        }
    }
}
