#[cfg(test)]
mod tests {
    use crate::Thermodynamics::thermo_models::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    /// dH/dT = Cp and T·dS/dT = Cp by central differences
    fn assert_consistent(model: &ThermoModel, T: f64) {
        let h = 1e-3;
        let Cp = model.get_heat_capacity(T).unwrap();
        let dH = (model.get_enthalpy(T + h).unwrap() - model.get_enthalpy(T - h).unwrap()) / (2.0 * h);
        let dS = (model.get_entropy(T + h).unwrap() - model.get_entropy(T - h).unwrap()) / (2.0 * h);
        assert_relative_eq!(dH, Cp, max_relative = 1e-6);
        assert_relative_eq!(T * dS, Cp, max_relative = 1e-6);
    }

    fn two_range_nasa() -> NASAComposite {
        let low = NASAPolynomial::new(vec![3.5, 0.0, 0.0, 0.0, 0.0, -1000.0, 5.0], 300.0, 1000.0).unwrap();
        // Cp, H and S match the lower polynomial at 1000 K
        let c8 = 0.5 * 1000f64.ln() + 4.5;
        let high = NASAPolynomial::new(
            vec![0.0, 0.0, 3.0, 5e-4, 0.0, 0.0, 0.0, -750.0, c8],
            1000.0,
            5000.0,
        )
        .unwrap();
        NASAComposite::new(vec![low, high]).unwrap()
    }

    #[test]
    fn test_group_additivity_interpolation() {
        let ga = GroupAdditivity::new(vec![300.0, 400.0], vec![30.0, 35.0], 0.0, 0.0).unwrap();
        assert_relative_eq!(ga.get_heat_capacity(350.0).unwrap(), 32.5);
        assert_relative_eq!(ga.get_heat_capacity(300.0).unwrap(), 30.0);
        // clamped outside the table
        assert_relative_eq!(ga.get_heat_capacity(200.0).unwrap(), 30.0);
        assert_relative_eq!(ga.get_heat_capacity(2000.0).unwrap(), 35.0);
    }

    #[test]
    fn test_group_additivity_integrals() {
        let ga = GroupAdditivity::new(vec![300.0, 400.0], vec![30.0, 35.0], -1000.0, 200.0).unwrap();
        assert_relative_eq!(ga.get_enthalpy(T_REF).unwrap(), -1000.0, epsilon = 1e-9);
        assert_relative_eq!(ga.get_entropy(T_REF).unwrap(), 200.0, epsilon = 1e-9);
        // 30·1.85 below the table, trapezoid 3250 inside it
        assert_relative_eq!(ga.get_enthalpy(400.0).unwrap(), -1000.0 + 3305.5, max_relative = 1e-12);
        // constant Cp above the last point
        assert_relative_eq!(
            ga.get_enthalpy(500.0).unwrap(),
            -1000.0 + 3305.5 + 3500.0,
            max_relative = 1e-12
        );
        let S500 = ga.get_entropy(500.0).unwrap() - ga.get_entropy(400.0).unwrap();
        assert_relative_eq!(S500, 35.0 * (500.0f64 / 400.0).ln(), max_relative = 1e-12);
        let model = ThermoModel::from(ga);
        for T in [250.0, 350.0, 1200.0] {
            assert_consistent(&model, T);
        }
    }

    #[test]
    fn test_group_additivity_construction_errors() {
        assert!(matches!(
            GroupAdditivity::new(vec![300.0, 400.0], vec![30.0], 0.0, 0.0),
            Err(ThermoError::Construction(_))
        ));
        assert!(matches!(
            GroupAdditivity::new(vec![400.0, 300.0], vec![30.0, 35.0], 0.0, 0.0),
            Err(ThermoError::Construction(_))
        ));
        assert!(matches!(
            GroupAdditivity::new(vec![], vec![], 0.0, 0.0),
            Err(ThermoError::Construction(_))
        ));
    }

    #[test]
    fn test_wilhoit_limits_and_consistency() {
        let wilhoit =
            Wilhoit::new(33.258, 108.0, [-3.2, 4.5, -7.1, 3.3], 500.0, -1.2e5, -300.0).unwrap();
        assert_relative_eq!(wilhoit.get_heat_capacity(1e-6).unwrap(), 33.258, max_relative = 1e-6);
        assert_relative_eq!(wilhoit.get_heat_capacity(1e9).unwrap(), 108.0, max_relative = 1e-4);
        assert_relative_eq!(wilhoit.get_heat_capacity(300.0).unwrap(), 59.120065212, max_relative = 1e-9);
        let model = ThermoModel::from(wilhoit);
        for T in [300.0, 800.0, 1500.0] {
            assert_consistent(&model, T);
        }
        assert!(matches!(
            Wilhoit::new(33.0, 100.0, [0.0; 4], -1.0, 0.0, 0.0),
            Err(ThermoError::Construction(_))
        ));
    }

    #[test]
    fn test_nasa7_reads_as_nasa9() {
        let nasa7 = NASAPolynomial::new(vec![3.5, 1e-3, 0.0, 0.0, 0.0, -1000.0, 5.0], 300.0, 1000.0).unwrap();
        let nasa9 = NASAPolynomial::new(
            vec![0.0, 0.0, 3.5, 1e-3, 0.0, 0.0, 0.0, -1000.0, 5.0],
            300.0,
            1000.0,
        )
        .unwrap();
        assert_relative_eq!(
            nasa7.get_heat_capacity(500.0).unwrap(),
            (3.5 + 0.5) * R,
            max_relative = 1e-12
        );
        assert_relative_eq!(nasa7.get_enthalpy(500.0).unwrap(), nasa9.get_enthalpy(500.0).unwrap());
        assert_relative_eq!(nasa7.get_entropy(500.0).unwrap(), nasa9.get_entropy(500.0).unwrap());
        // H/R = 3.5·T + 5e-4·T² − 1000
        assert_relative_eq!(
            nasa7.get_enthalpy(500.0).unwrap(),
            (1750.0 + 125.0 - 1000.0) * R,
            max_relative = 1e-12
        );
        let model = ThermoModel::from(nasa9);
        assert_consistent(&model, 600.0);
    }

    #[test]
    fn test_nasa_inverse_powers_consistency() {
        let nasa = NASAPolynomial::new(
            vec![-2.0e4, 300.0, 2.1, 1e-3, -2e-7, 3e-11, -1e-15, -2000.0, 10.0],
            200.0,
            6000.0,
        )
        .unwrap();
        let model = ThermoModel::from(nasa);
        for T in [300.0, 1000.0, 4000.0] {
            assert_consistent(&model, T);
        }
    }

    #[test]
    fn test_nasa_composite_is_continuous_at_shared_boundary() {
        let nasa = two_range_nasa();
        let below = 1000.0 - 1e-7;
        let above = 1000.0 + 1e-7;
        assert_relative_eq!(
            nasa.get_heat_capacity(below).unwrap(),
            nasa.get_heat_capacity(above).unwrap(),
            max_relative = 1e-8
        );
        assert_relative_eq!(
            nasa.get_enthalpy(below).unwrap(),
            nasa.get_enthalpy(above).unwrap(),
            max_relative = 1e-8
        );
        assert_relative_eq!(
            nasa.get_entropy(below).unwrap(),
            nasa.get_entropy(above).unwrap(),
            max_relative = 1e-8
        );
        // the lower polynomial owns the boundary
        assert_eq!(nasa.select_polynomial(1000.0).unwrap().Tmax, 1000.0);
        assert_eq!(nasa.select_polynomial(1000.5).unwrap().Tmin, 1000.0);
    }

    #[test]
    fn test_nasa_composite_range_error() {
        let nasa = two_range_nasa();
        assert!(matches!(
            nasa.get_heat_capacity(200.0),
            Err(ThermoError::Range { temperature, .. }) if temperature == 200.0
        ));
        assert!(matches!(nasa.get_enthalpy(6000.0), Err(ThermoError::Range { .. })));
        assert_eq!(nasa.T_range(), (Some(300.0), Some(5000.0)));
    }

    #[test]
    fn test_nasa_composite_rejects_gaps_and_overlaps() {
        let low = NASAPolynomial::new(vec![3.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 300.0, 1000.0).unwrap();
        let gap = NASAPolynomial::new(vec![3.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1100.0, 5000.0).unwrap();
        let overlap = NASAPolynomial::new(vec![3.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 900.0, 5000.0).unwrap();
        assert!(matches!(
            NASAComposite::new(vec![low.clone(), gap]),
            Err(ThermoError::Construction(_))
        ));
        assert!(matches!(
            NASAComposite::new(vec![low, overlap]),
            Err(ThermoError::Construction(_))
        ));
        assert!(matches!(NASAComposite::new(vec![]), Err(ThermoError::Construction(_))));
        assert!(matches!(
            NASAPolynomial::new(vec![1.0; 8], 300.0, 1000.0),
            Err(ThermoError::Construction(_))
        ));
    }

    #[test]
    fn test_free_energy_is_h_minus_ts() {
        let models = vec![
            ThermoModel::from(GroupAdditivity::new(vec![300.0, 400.0], vec![30.0, 35.0], 5e3, 150.0).unwrap()),
            ThermoModel::from(Wilhoit::new(33.0, 100.0, [0.1, 0.2, 0.3, 0.4], 400.0, 0.0, 0.0).unwrap()),
            ThermoModel::from(two_range_nasa()),
        ];
        for model in &models {
            let T = 700.0;
            let G = model.get_free_energy(T).unwrap();
            let expected = model.get_enthalpy(T).unwrap() - T * model.get_entropy(T).unwrap();
            assert_relative_eq!(G, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_non_positive_temperature_is_domain_error() {
        let model = ThermoModel::from(two_range_nasa());
        assert_eq!(model.get_heat_capacity(0.0), Err(ThermoError::Domain(0.0)));
        assert_eq!(model.get_entropy(-5.0), Err(ThermoError::Domain(-5.0)));
        let ga = ThermoModel::from(GroupAdditivity::new(vec![300.0], vec![30.0], 0.0, 0.0).unwrap());
        assert!(matches!(ga.get_free_energy(f64::NAN), Err(ThermoError::Domain(_))));
    }

    #[test]
    fn test_from_serde() {
        let model = ThermoModel::from_serde(json!({
            "type": "GroupAdditivity",
            "Tdata": [300.0, 400.0, 500.0],
            "Cpdata": [30.0, 35.0, 38.0],
            "H298": -74870.0,
            "S298": 186.25
        }))
        .unwrap();
        assert_eq!(model.name(), "GroupAdditivity");
        assert_relative_eq!(model.get_heat_capacity(450.0).unwrap(), 36.5);

        let nasa = ThermoModel::from_serde(json!({
            "type": "NASAComposite",
            "polynomials": [
                {"coeffs": [3.5, 0.0, 0.0, 0.0, 0.0, -1000.0, 5.0], "Tmin": 300.0, "Tmax": 1000.0},
                {"coeffs": [3.5, 0.0, 0.0, 0.0, 0.0, -1000.0, 5.0], "Tmin": 1000.0, "Tmax": 3000.0}
            ]
        }))
        .unwrap();
        assert_relative_eq!(nasa.get_heat_capacity(2000.0).unwrap(), 3.5 * R);

        let broken = ThermoModel::from_serde(json!({
            "type": "GroupAdditivity",
            "Tdata": [300.0, 400.0],
            "Cpdata": [30.0],
            "H298": 0.0,
            "S298": 0.0
        }));
        assert!(matches!(broken, Err(ThermoError::Construction(_))));
    }
}
