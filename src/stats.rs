//! Point estimate and Student-t confidence interval of a sample.
//!
//! The estimator sees a flat slice of observations and nothing else. When
//! the portfolio pools every rating of an axis into one sample, each rating
//! counts as an exchangeable observation; there is no per-question step.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use crate::error::StatisticsError;

/// Mean and two-sided confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub mean: f64,
    pub interval: (f64, f64),
}

impl Estimate {
    pub fn lower(&self) -> f64 {
        self.interval.0
    }

    pub fn upper(&self) -> f64 {
        self.interval.1
    }

    pub fn width(&self) -> f64 {
        self.interval.1 - self.interval.0
    }
}

pub fn mean(sample: &[f64]) -> f64 {
    sample.mean()
}

/// Standard error of the mean, from the `n - 1` sample standard deviation.
pub fn std_err(sample: &[f64]) -> f64 {
    sample.std_dev() / (sample.len() as f64).sqrt()
}

/// Mean of `sample` and the interval holding `confidence` of the t
/// distribution's mass (`0.95` gives a 95 % interval) with `n - 1` degrees
/// of freedom, centered on the mean and scaled by the standard error.
///
/// `confidence` is the interval's mass, not a significance level. `0`
/// collapses the interval onto the mean.
pub fn estimate(sample: &[f64], confidence: f64) -> Result<Estimate, StatisticsError> {
    if !(0.0..1.0).contains(&confidence) {
        return Err(StatisticsError::InvalidConfidence(confidence));
    }
    if sample.len() < 2 {
        return Err(StatisticsError::InsufficientSample { len: sample.len() });
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(StatisticsError::NonFinite);
    }

    let m = mean(sample);
    let sem = std_err(sample);
    if confidence == 0.0 || sem == 0.0 {
        return Ok(Estimate {
            mean: m,
            interval: (m, m),
        });
    }

    let dist = StudentsT::new(0.0, 1.0, (sample.len() - 1) as f64)
        .map_err(|e| StatisticsError::Distribution(e.to_string()))?;
    let half = dist.inverse_cdf(0.5 + confidence / 2.0) * sem;
    Ok(Estimate {
        mean: m,
        interval: (m - half, m + half),
    })
}
