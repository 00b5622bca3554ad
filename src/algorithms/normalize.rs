/// Z-normalize a window so that only its shape is compared.
///
/// Uses the population mean and standard deviation. A window whose values are
/// all identical carries no shape information and maps to all zeros.
///
/// # Examples
///
/// ```
/// use analog_rs::z_normalize;
///
/// assert_eq!(z_normalize(&[4.0, 4.0, 4.0]), vec![0.0, 0.0, 0.0]);
/// let z = z_normalize(&[1.0, 3.0]);
/// assert_eq!(z, vec![-1.0, 1.0]);
/// ```
pub fn z_normalize(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    z_normalize_into(values, &mut out);
    out
}

/// Same as [`z_normalize`], writing into `out` so hot loops can reuse the buffer.
pub fn z_normalize_into(values: &[f64], out: &mut Vec<f64>) {
    out.clear();
    let Some(&first) = values.first() else {
        return;
    };

    // Checked directly: the computed mean of identical values can be off by an
    // ulp, which would leave a tiny non-zero sigma behind.
    if values.iter().all(|&v| v == first) {
        out.resize(values.len(), 0.0);
        return;
    }

    let (mut mean, mut sigma) = moments(values, 1.0);
    let mut scale = 1.0;
    if !(mean.is_finite() && sigma.is_finite()) {
        // Sums of values near f64::MAX overflow. Z-scores do not depend on
        // scale, so redo the moments on values divided by the largest magnitude.
        scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        (mean, sigma) = moments(values, scale);
    }

    if sigma == 0.0 {
        out.resize(values.len(), 0.0);
    } else {
        out.extend(values.iter().map(|v| (v / scale - mean) / sigma));
    }
}

/// Population mean and standard deviation of `values / scale`.
fn moments(values: &[f64], scale: f64) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|v| {
            let d = v / scale - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}
