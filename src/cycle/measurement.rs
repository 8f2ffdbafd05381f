use anyhow::{anyhow, Result};

/// One push-out run: displacement `x` and force `y`, sample by sample.
#[derive(Debug, Clone)]
pub struct Measurement {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Measurement {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if x.len() != y.len() {
            return Err(anyhow!(
                "measurement {}: displacement has {} samples but force has {}",
                name,
                x.len(),
                y.len()
            ));
        }
        if let Some(i) = x
            .iter()
            .zip(y.iter())
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(anyhow!("measurement {}: non-finite sample at index {}", name, i));
        }
        Ok(Self { name, x, y })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Indices `i` where `x[i]` and `x[i + 1]` differ by less than `eps`.
    pub fn near_duplicate_displacements(&self, eps: f64) -> Vec<usize> {
        self.x
            .windows(2)
            .enumerate()
            .filter(|(_, w)| (w[0] - w[1]).abs() < eps)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_mismatched_lengths_and_nan() {
        assert!(Measurement::new("a", vec![0.0, 1.0], vec![0.0]).is_err());
        assert!(Measurement::new("b", vec![0.0, f64::NAN], vec![0.0, 1.0]).is_err());
        let m = Measurement::new("c", vec![0.0, 1.0], vec![2.0, 3.0]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.name(), "c");
    }

    #[test]
    fn flags_near_duplicate_displacements() {
        let m = Measurement::new(
            "dup",
            vec![0.0, 0.1, 0.1 + 1e-8, 0.2, 0.3, 0.3],
            vec![0.0; 6],
        )
        .unwrap();
        assert_eq!(m.near_duplicate_displacements(1e-6), vec![1, 4]);
    }
}
