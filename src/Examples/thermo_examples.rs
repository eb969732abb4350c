use crate::Thermodynamics::thermo_models::{
    GroupAdditivity, NASAComposite, NASAPolynomial, ThermoCalculator, ThermoModel, Wilhoit,
};
use crate::curves::CurveBuilder;
use crate::settings::CurveSettings;
use serde_json::json;

fn print_properties(model: &ThermoModel, temperatures: &[f64]) {
    for &T in temperatures {
        match (model.calculate_Cp_dH_dS(T), model.get_free_energy(T)) {
            (Ok((Cp, dH, dS)), Ok(G)) => println!(
                "{} T = {} K: Cp = {:.3} J/mol/K, H = {:.1} J/mol, S = {:.3} J/mol/K, G = {:.1} J/mol",
                model.name(),
                T,
                Cp,
                dH,
                dS,
                G
            ),
            (Err(e), _) | (_, Err(e)) => println!("{} T = {} K: {}", model.name(), T, e),
        }
    }
}

pub fn thermo_examples(thermotask: usize) {
    //
    match thermotask {
        0 => {
            // group additivity table of methane
            let ga = GroupAdditivity::new(
                vec![300.0, 400.0, 500.0, 600.0, 800.0, 1000.0, 1500.0],
                vec![35.7, 40.6, 46.6, 52.2, 62.4, 71.0, 85.0],
                -74870.0,
                186.25,
            );
            match ga {
                Ok(ga) => print_properties(&ThermoModel::from(ga), &[298.15, 350.0, 1000.0, 2000.0]),
                Err(e) => println!("{}", e),
            }
        }
        1 => {
            // Wilhoit polynomial
            let wilhoit = Wilhoit::new(33.258, 108.0, [-3.2, 4.5, -7.1, 3.3], 500.0, -1.2e5, -300.0);
            match wilhoit {
                Ok(wilhoit) => print_properties(&ThermoModel::from(wilhoit), &[300.0, 1000.0, 3000.0]),
                Err(e) => println!("{}", e),
            }
        }
        2 => {
            // two-range NASA-7 polynomials of CO, read from JSON
            let CO = json!({
                "type": "NASAComposite",
                "polynomials": [
                    {"coeffs": [3.57953347, -6.1035368e-4, 1.01681433e-6, 9.07005884e-10, -9.04424499e-13,
                                -14344.086, 3.50840928], "Tmin": 200.0, "Tmax": 1000.0},
                    {"coeffs": [2.71518561, 2.06252743e-3, -9.98825771e-7, 2.30053008e-10, -2.03647716e-14,
                                -14151.8724, 7.81868772], "Tmin": 1000.0, "Tmax": 3500.0}
                ]
            });
            match ThermoModel::from_serde(CO) {
                Ok(model) => {
                    print_properties(&model, &[298.15, 999.999, 1000.0, 1000.001, 3000.0]);
                    // outside every range
                    print_properties(&model, &[4000.0]);
                }
                Err(e) => println!("{}", e),
            }
        }
        3 => {
            // curve tables
            let polynomial = NASAPolynomial::new(
                vec![0.0, 0.0, 3.5, 1e-4, 0.0, 0.0, 0.0, -1000.0, 4.0],
                300.0,
                1500.0,
            );
            let model = match polynomial.and_then(|p| NASAComposite::new(vec![p])) {
                Ok(composite) => ThermoModel::from(composite),
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            let mut settings = CurveSettings::default();
            settings.thermo.step = 100.0;
            let builder = CurveBuilder::new(settings);
            match builder.thermo_curves(&model) {
                Ok(series) => {
                    for s in &series {
                        s.pretty_print();
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("no such thermo example: {}", thermotask);
        }
    }
}
