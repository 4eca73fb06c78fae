use crate::model::edge::LegEstimate;

/// Arithmetic mean and population standard deviation (ddof = 0).
///
/// Returns `None` for an empty slice.
pub fn summarize(values: &[f64]) -> Option<LegEstimate> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(LegEstimate {
        mean,
        std: variance.sqrt(),
    })
}

/// Relative binding free energy and its propagated uncertainty.
pub fn ddg(complex: &LegEstimate, solvent: &LegEstimate) -> (f64, f64) {
    let value = complex.mean - solvent.mean;
    let uncertainty = (complex.std.powi(2) + solvent.std.powi(2)).sqrt();
    (value, uncertainty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn summarize_three_repeats() {
        let s = summarize(&[-5.0, -5.2, -4.8]).unwrap();
        assert!(approx_eq(s.mean, -5.0, 1e-12));
        assert!(approx_eq(s.std, 0.163299, 1e-6));
    }

    #[test]
    fn summarize_identical_values_has_zero_std() {
        let s = summarize(&[1.5, 1.5, 1.5]).unwrap();
        assert_eq!(s.mean, 1.5);
        assert_eq!(s.std, 0.0);
    }

    #[test]
    fn summarize_empty_is_none() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn ddg_propagates_uncertainty() {
        let complex = LegEstimate {
            mean: -10.0,
            std: 0.2,
        };
        let solvent = LegEstimate {
            mean: -4.0,
            std: 0.1,
        };
        let (value, uncertainty) = ddg(&complex, &solvent);
        assert!(approx_eq(value, -6.0, 1e-12));
        assert!(approx_eq(uncertainty, 0.05_f64.sqrt(), 1e-12));
        assert!(approx_eq(uncertainty, 0.2236, 1e-4));
    }
}
