/// Species thermodynamics as functions of temperature: group additivity tables, Wilhoit polynomials,
/// single NASA polynomials and composite multi-range NASA models
/// # Examples
/// ```
/// use KiCurves::Thermodynamics::thermo_models::{GroupAdditivity, ThermoCalculator, ThermoModel};
/// let ga = GroupAdditivity::new(vec![300.0, 400.0], vec![30.0, 35.0], 0.0, 0.0).unwrap();
/// let model = ThermoModel::from(ga);
/// assert_eq!(model.get_heat_capacity(350.0).unwrap(), 32.5);
/// let (Cp, dH, dS) = model.calculate_Cp_dH_dS(500.0).unwrap();
/// println!("Cp: {}, dH: {}, dS: {}", Cp, dH, dS);
/// ```
pub mod thermo_models;
/// tests
pub mod thermo_models_tests;
