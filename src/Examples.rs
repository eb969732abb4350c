/// rate models, falloff, curve series and Arrhenius summaries
pub mod kinetics_examples;
/// group additivity, Wilhoit and NASA thermodynamics
pub mod thermo_examples;
/// molecular modes, states models, partition functions and densities of states
pub mod statmech_examples;
