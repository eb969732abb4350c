#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod StatMech;
#[allow(non_snake_case)]
pub mod Thermodynamics;
pub mod curves;
pub mod settings;
