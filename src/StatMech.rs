/// Bessel functions I0, I1, the complete elliptic integral K and the density-of-states convolution
pub mod special_functions;
/// Molecular degrees of freedom: translation, rigid rotor, harmonic oscillator, hindered rotor
/// # Examples
/// ```
/// use KiCurves::StatMech::modes::{Mode, RigidRotor, StatMechCalculator, R};
/// let rotor = Mode::from(RigidRotor::new(true, vec![1.0e-46], 1.0).unwrap());
/// assert_eq!(rotor.get_heat_capacity(300.0).unwrap(), R);
/// ```
pub mod modes;
/// A molecule as a collection of modes: Cp, H, S, Q and the density of states
/// # Examples
/// ```
/// use KiCurves::StatMech::modes::{HarmonicOscillator, Mode, Translation};
/// use KiCurves::StatMech::states_model::StatesModel;
/// let modes = vec![
///     Mode::from(Translation::new(0.028).unwrap()),
///     Mode::from(HarmonicOscillator::new(vec![2359.0]).unwrap()),
/// ];
/// let nitrogen = StatesModel::new(modes, 1).unwrap();
/// let Elist: Vec<f64> = (0..200).map(|i| i as f64 * 500.0).collect();
/// let rho = nitrogen.get_density_of_states(&Elist).unwrap();
/// println!("Q(1000 K) = {}, rho(50 kJ/mol) = {}", nitrogen.get_partition_function(1000.0).unwrap(), rho[100]);
/// ```
pub mod states_model;
/// tests
pub mod statmech_tests;
