//! Synthetic push-out traces for tests.

pub(crate) const DWELL: usize = 10;
pub(crate) const LOAD: usize = 40;
pub(crate) const UNLOAD: usize = 40;
pub(crate) const DWELL_STEP: f64 = 0.002;
pub(crate) const SPRING_BACK: f64 = 0.4;

pub(crate) fn peak_x(k: usize) -> f64 {
    1.0 + k as f64
}

pub(crate) fn peak_force(k: usize) -> f64 {
    100.0 + 20.0 * k as f64
}

/// `cycles` load/unload excursions followed by a final reload past the last peak.
///
/// Each excursion dwells at zero force while the displacement creeps forward,
/// loads along `F * sqrt(s)` up to displacement `1 + k`, then unloads along
/// `F * (1 - t)³`, springing back by 0.4.
pub(crate) fn push_out_signal(cycles: usize) -> (Vec<f64>, Vec<f64>) {
    let mut x: Vec<f64> = Vec::new();
    let mut y: Vec<f64> = Vec::new();
    let mut origin = -DWELL_STEP;
    for k in 0..=cycles {
        for m in 1..=DWELL {
            x.push(origin + DWELL_STEP * m as f64);
            y.push(0.0);
        }
        let load_start = origin + DWELL_STEP * DWELL as f64;
        let peak = peak_x(k);
        let force = peak_force(k);
        for m in 1..=LOAD {
            let s = m as f64 / LOAD as f64;
            x.push(if m == LOAD { peak } else { load_start + s * (peak - load_start) });
            y.push(force * s.sqrt());
        }
        if k == cycles {
            break;
        }
        let back = peak - SPRING_BACK;
        for m in 1..=UNLOAD {
            let t = m as f64 / UNLOAD as f64;
            x.push(if m == UNLOAD { back } else { peak - t * SPRING_BACK });
            y.push(force * (1.0 - t).powi(3));
        }
        origin = back;
    }
    (x, y)
}
