//! Cubic smoothing spline (Reinsch).
//!
//! Minimizes `∫ s''(x)² dx` subject to `Σ (s(x_i) - y_i)² <= smoothing`.
//! A smoothing factor of zero yields the natural interpolating cubic spline.

const MAX_ITERATIONS: usize = 200;
// Index offset for the banded work arrays, which are addressed at `i - 2 ..= i + 2`.
const O: usize = 2;

#[derive(Debug, Clone)]
pub struct SmoothingSpline {
    knots: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl SmoothingSpline {
    /// Fits a spline to `(x, y)`.
    ///
    /// Samples are sorted by `x`; samples closer than `min_dx` to the first
    /// sample of their cluster are merged into one knot carrying the mean `y`.
    /// `smoothing = None` uses the number of knots as the residual budget.
    /// Returns `None` when no finite sample remains.
    pub fn fit(x: &[f64], y: &[f64], smoothing: Option<f64>, min_dx: f64) -> Option<Self> {
        let (xs, ys) = merge_sorted(x, y, min_dx);
        let n = xs.len();
        match n {
            0 => None,
            1 => Some(Self {
                knots: xs,
                a: ys,
                b: vec![0.0],
                c: vec![0.0],
                d: vec![0.0],
            }),
            2 => {
                let slope = (ys[1] - ys[0]) / (xs[1] - xs[0]);
                Some(Self {
                    knots: xs,
                    a: ys,
                    b: vec![slope, slope],
                    c: vec![0.0; 2],
                    d: vec![0.0; 2],
                })
            }
            _ => {
                let s = smoothing.unwrap_or(n as f64).max(0.0);
                Some(reinsch(xs, ys, s))
            }
        }
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Evaluates the spline; outside the knot range the boundary polynomial
    /// is extended.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.knots.len();
        if n == 1 {
            return self.a[0];
        }
        let i = self
            .knots
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(n - 2);
        let h = x - self.knots[i];
        self.a[i] + h * (self.b[i] + h * (self.c[i] + h * self.d[i]))
    }
}

fn merge_sorted(x: &[f64], y: &[f64], min_dx: f64) -> (Vec<f64>, Vec<f64>) {
    let mut pts: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .map(|(&px, &py)| (px, py))
        .filter(|(px, py)| px.is_finite() && py.is_finite())
        .collect();
    pts.sort_by(|p, q| p.0.total_cmp(&q.0));

    let mut xs: Vec<f64> = Vec::with_capacity(pts.len());
    let mut ys: Vec<f64> = Vec::with_capacity(pts.len());
    let mut cluster_len = 0usize;
    for (px, py) in pts {
        if let (Some(&lx), Some(ly)) = (xs.last(), ys.last_mut()) {
            if px - lx < min_dx {
                cluster_len += 1;
                *ly += (py - *ly) / cluster_len as f64;
                continue;
            }
        }
        xs.push(px);
        ys.push(py);
        cluster_len = 1;
    }
    (xs, ys)
}

fn reinsch(x: Vec<f64>, y: Vec<f64>, s: f64) -> SmoothingSpline {
    let n = x.len();
    let last = n - 1;

    let mut r = vec![0.0; n + 2 * O];
    let mut r1 = vec![0.0; n + 2 * O];
    let mut r2 = vec![0.0; n + 2 * O];
    let mut u = vec![0.0; n + 2 * O];
    let mut t = vec![0.0; n];
    let mut t1 = vec![0.0; n];
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];
    let mut v = vec![0.0; n];

    // Second divided differences, the tridiagonal T and the bands of Q.
    let mut h = x[1] - x[0];
    let mut f = (y[1] - y[0]) / h;
    let mut g;
    let mut e;
    for i in 1..last {
        g = h;
        h = x[i + 1] - x[i];
        e = f;
        f = (y[i + 1] - y[i]) / h;
        a[i] = f - e;
        t[i] = 2.0 * (g + h) / 3.0;
        t1[i] = h / 3.0;
        r2[i + O] = 1.0 / g;
        r[i + O] = 1.0 / h;
        r1[i + O] = -1.0 / g - 1.0 / h;
    }
    // Bands of QᵀQ.
    for i in 1..last {
        b[i] = r[i + O] * r[i + O] + r1[i + O] * r1[i + O] + r2[i + O] * r2[i + O];
        c[i] = r[i + O] * r1[i + 1 + O] + r1[i + O] * r2[i + 1 + O];
        d[i] = r[i + O] * r2[i + 2 + O];
    }

    let mut p = 0.0;
    let mut f2 = -s;
    let mut iterations = 0usize;
    loop {
        // Solve (T + p QᵀQ) u = Qᵀy by LDLᵀ factorization.
        f = 0.0;
        g = 0.0;
        h = 0.0;
        for i in 1..last {
            r1[i + O - 1] = f * r[i + O - 1];
            r2[i + O - 2] = g * r[i + O - 2];
            r[i + O] = 1.0 / (p * b[i] + t[i] - f * r1[i + O - 1] - g * r2[i + O - 2]);
            u[i + O] = a[i] - r1[i + O - 1] * u[i + O - 1] - r2[i + O - 2] * u[i + O - 2];
            f = p * c[i] + t1[i] - h * r1[i + O - 1];
            g = h;
            h = d[i] * p;
        }
        for i in (1..last).rev() {
            u[i + O] = r[i + O] * u[i + O] - r1[i + O] * u[i + 1 + O] - r2[i + O] * u[i + 2 + O];
        }

        // v = Qu; e = |Qu|².
        e = 0.0;
        h = 0.0;
        for i in 0..last {
            g = h;
            h = (u[i + 1 + O] - u[i + O]) / (x[i + 1] - x[i]);
            v[i] = h - g;
            e += v[i] * (h - g);
        }
        g = -h;
        v[last] = g;
        e -= g * h;

        g = f2;
        f2 = e * p * p;
        if f2 >= s || f2 <= g || iterations >= MAX_ITERATIONS {
            break;
        }

        // Newton step on p towards a residual of exactly `s`.
        f = 0.0;
        h = (v[1] - v[0]) / (x[1] - x[0]);
        for i in 1..last {
            g = h;
            h = (v[i + 1] - v[i]) / (x[i + 1] - x[i]);
            g = h - g - r1[i + O - 1] * r[i + O - 1] - r2[i + O - 2] * r[i + O - 2];
            f += g * r[i + O] * g;
            r[i + O] = g;
        }
        h = e - p * f;
        if h <= 0.0 {
            break;
        }
        p += (s - f2) / (((s / e).sqrt() + p) * h);
        iterations += 1;
    }

    for i in 0..n {
        a[i] = y[i] - p * v[i];
        c[i] = u[i + O];
    }
    for i in 0..last {
        let h = x[i + 1] - x[i];
        d[i] = (c[i + 1] - c[i]) / (3.0 * h);
        b[i] = (a[i + 1] - a[i]) / h - (h * d[i] + c[i]) * h;
    }

    SmoothingSpline {
        knots: x,
        a,
        b,
        c,
        d,
    }
}
