/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

fn validate(rate: f64, vi: f64, vf: f64) -> Result<(), String> {
    ((rate >= 0.0 && vi > vf) || (rate < 0.0 && vi < vf))
        .then_some(())
        .ok_or_else(|| String::from("`vi - vf` must have same sign as `rate`"))
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) / √(1 + rt)
///
/// With `rate = 1`, `vi = 1` and `vf = 0` this is the classic `1/√(n+1)` exploration schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InverseSqrt {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl InverseSqrt {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self, String> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for InverseSqrt {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) / (1.0 + rate * t).sqrt()
    }
}

/// v(t) = max(v<sub>i</sub> * r<sup>floor(t/s)</sup>, v<sub>f</sub>)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    rate: f64,
    vi: f64,
    vf: f64,
    step: f64,
}

impl Step {
    pub fn new(rate: f64, vi: f64, vf: f64, step: f64) -> Result<Self, String> {
        validate(rate, vi, vf)?;
        if step <= 0.0 {
            return Err(String::from("`step` must be positive"));
        }
        Ok(Self { rate, vi, vf, step })
    }
}

impl Decay for Step {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf, step } = self;
        (vi * rate.powf((t / step).floor())).max(vf)
    }
}
