use crate::Kinetics::rate_models::{
    Arrhenius, Chebyshev, KineticsError, Lindemann, RateCalculator, RateConditions, RateModel, Troe,
};
use crate::curves::CurveBuilder;
use crate::settings::CurveSettings;
use serde_json::json;

fn print_k(model: &RateModel, conditions: &RateConditions) {
    match model.get_rate_coefficient(conditions) {
        Ok(k) => println!("{} at T = {} K, P = {:?} Pa: k = {:.6e}", model.name(), conditions.T, conditions.P, k),
        Err(e) => println!("{} at T = {} K: {}", model.name(), conditions.T, e),
    }
}

pub fn kin_examples(kintask: usize) {
    //
    match kintask {
        0 => {
            // single Arrhenius expression
            let arrhenius = match Arrhenius::new(1e13, 0.0, 100000.0, 1.0) {
                Ok(arrhenius) => arrhenius,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            let model = RateModel::from(arrhenius);
            for T in [300.0, 1000.0, 2000.0] {
                print_k(&model, &RateConditions::at_T(T));
            }
        }
        1 => {
            // models from JSON, as they come from a database entry
            let entries = vec![
                json!({"type": "Arrhenius", "A": 2.1e8, "n": 1.5, "Ea": 15000.0, "Tmin": 300.0, "Tmax": 2500.0}),
                json!({"type": "ArrheniusEP", "A": 1e11, "n": 0.0, "alpha": 0.5, "E0": 40000.0}),
                json!({"type": "TabulatedRate", "Tdata": [300.0, 600.0, 1200.0], "kdata": [1e3, 1e6, 1e8]}),
                json!({"type": "PDepArrhenius", "pressures": [1e4, 1e6],
                       "arrhenius": [{"A": 1e6, "n": 0.0, "Ea": 40000.0}, {"A": 1e8, "n": 0.0, "Ea": 60000.0}]}),
                json!({"type": "Chebyshev", "coeffs": [[8.0, 0.5], [-1.0, 0.1]],
                       "Tmin": 300.0, "Tmax": 2000.0, "Pmin": 1e3, "Pmax": 1e7}),
            ];
            for entry in entries {
                let model: Result<RateModel, KineticsError> = RateModel::from_serde(entry);
                match model {
                    Ok(model) => {
                        let conditions = RateConditions::at_TP(1000.0, 1e5).with_dHrxn(-30000.0);
                        println!(
                            "{}: pressure dependent = {}",
                            model.name(),
                            model.is_pressure_dependent()
                        );
                        print_k(&model, &conditions);
                    }
                    Err(e) => println!("rejected entry: {}", e),
                }
            }
        }
        2 => {
            // falloff: Lindemann vs Troe across pressures
            let low = Arrhenius::new(2.3e6, -0.9, -7100.0, 1.0);
            let high = Arrhenius::new(7.4e7, -0.37, 0.0, 1.0);
            let (low, high) = match (low, high) {
                (Ok(low), Ok(high)) => (low, high),
                _ => return,
            };
            let lindemann = Lindemann::new(low.clone(), high.clone()).map(RateModel::from);
            let troe = Troe::new(low, high, 0.7346, 94.0, 1756.0, Some(5182.0)).map(RateModel::from);
            if let (Ok(lindemann), Ok(troe)) = (lindemann, troe) {
                for P in [1e2, 1e4, 1e6, 1e8] {
                    let conditions = RateConditions::at_TP(1000.0, P);
                    print_k(&lindemann, &conditions);
                    print_k(&troe, &conditions);
                }
            }
        }
        3 => {
            // plot series and the A, n, Ea summary of a Chebyshev fit
            let chebyshev = Chebyshev::new(
                vec![vec![8.2, 0.4, -0.05], vec![-1.1, 0.2, 0.01], vec![-0.1, 0.02, 0.0]],
                300.0,
                2000.0,
                1e3,
                1e7,
            );
            let model = match chebyshev {
                Ok(chebyshev) => RateModel::from(chebyshev),
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            let builder = CurveBuilder::new(CurveSettings::default());
            match builder.rate_vs_inverse_T(&model) {
                Ok(series) => {
                    for s in series.iter().take(2) {
                        s.pretty_print();
                    }
                }
                Err(e) => println!("{}", e),
            }
            match builder.rate_vs_log_P(&model) {
                Ok(series) => println!("{} k(P) curves", series.len()),
                Err(e) => println!("{}", e),
            }
            match builder.arrhenius_summary(&model) {
                Ok(fit) => println!("A = {:.4e}, n = {:.4}, Ea = {:.1} J/mol", fit.A, fit.n, fit.Ea),
                Err(e) => println!("{}", e),
            }
        }
        4 => {
            // outside the validity range: error by default, warning when tolerated
            let model = match Arrhenius::new(1e10, 0.5, 20000.0, 1.0).and_then(|a| a.with_T_range(300.0, 1500.0)) {
                Ok(arrhenius) => RateModel::from(arrhenius),
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            let conditions = RateConditions::at_T(2500.0);
            print_k(&model, &conditions);
            match model.calculate_k(&conditions) {
                Ok(k) => println!("unchecked evaluation: k = {:.6e}", k),
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("no such kinetics example: {}", kintask);
        }
    }
}
