/// Intervals narrower than this are integrated with the trapezoid rule; the
/// Simpson weights divide by the interval widths.
pub const NEAR_ZERO_WIDTH: f64 = 1e-6;

/// Trapezoid rule over paired samples.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (xw[1] - xw[0]) * (yw[0] + yw[1]))
        .sum()
}

/// Composite Simpson rule over unevenly spaced samples.
///
/// With an even number of samples the result is the mean of two estimates:
/// Simpson on the first `n - 1` samples plus a trailing trapezoid, and a
/// leading trapezoid plus Simpson on the last `n - 1` samples.
pub fn simpson(y: &[f64], x: &[f64]) -> f64 {
    let n = y.len().min(x.len());
    match n {
        0 | 1 => 0.0,
        2 => trapezoid(&y[..2], &x[..2]),
        _ if n % 2 == 1 => simpson_odd(&y[..n], &x[..n]),
        _ => {
            let head = simpson_odd(&y[..n - 1], &x[..n - 1]) + trapezoid(&y[n - 2..n], &x[n - 2..n]);
            let tail = trapezoid(&y[..2], &x[..2]) + simpson_odd(&y[1..n], &x[1..n]);
            0.5 * (head + tail)
        }
    }
}

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

// Expects an odd sample count.
fn simpson_odd(y: &[f64], x: &[f64]) -> f64 {
    let mut acc = 0.0;
    let mut i = 0usize;
    while i + 2 < y.len() {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        acc += simpson_panel(h0, h1, y[i], y[i + 1], y[i + 2]);
        i += 2;
    }
    acc
}

fn simpson_panel(h0: f64, h1: f64, y0: f64, y1: f64, y2: f64) -> f64 {
    if h0.abs() < NEAR_ZERO_WIDTH || h1.abs() < NEAR_ZERO_WIDTH {
        return 0.5 * h0 * (y0 + y1) + 0.5 * h1 * (y1 + y2);
    }
    let hsum = h0 + h1;
    let hprod = h0 * h1;
    let ratio = h0 / h1;
    hsum / 6.0 * (y0 * (2.0 - 1.0 / ratio) + y1 * (hsum * hsum / hprod) + y2 * (2.0 - ratio))
}
