/// Seven aggregates of one measure over the rows of a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    /// Mean
    pub avr: f64,
    /// Sample standard deviation (NaN for a single value)
    pub std: f64,
    /// Minimum
    pub min: f64,
    /// Maximum
    pub max: f64,
    /// First value
    pub first: f64,
    /// Last value
    pub last: f64,
    /// Relative change from first to last, see [`relative_delta`]
    pub delta: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self::from_array([f64::NAN; 7])
    }
}

/// Relative change between the first and last value of a step.
///
/// Percent change when `first` is non-zero. From zero the plain difference
/// is used, normalised by `last` when it is non-zero.
pub fn relative_delta(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        let difference = last - first;
        if difference != 0.0 {
            difference / last
        } else {
            difference
        }
    } else {
        (last - first) * 100.0 / first
    }
}

impl ColumnStats {
    /// Aggregate `column` over the given rows. NaN values are skipped.
    pub fn from_rows(column: &[f64], rows: &[usize]) -> Self {
        let values: Vec<f64> = rows
            .iter()
            .map(|&i| column[i])
            .filter(|v| !v.is_nan())
            .collect();
        Self::from_values(&values)
    }

    /// Aggregate a slice of values
    pub fn from_values(values: &[f64]) -> Self {
        let (first, last) = match (values.first(), values.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Self::default(),
        };

        let n = values.len() as f64;
        let avr = values.iter().sum::<f64>() / n;
        let std = if values.len() < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - avr).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            avr,
            std,
            min,
            max,
            first,
            last,
            delta: relative_delta(first, last),
        }
    }

    /// Values in column order (avr, std, min, max, first, last, delta)
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.avr, self.std, self.min, self.max, self.first, self.last, self.delta,
        ]
    }

    /// Inverse of [`ColumnStats::to_array`]
    pub fn from_array(values: [f64; 7]) -> Self {
        let [avr, std, min, max, first, last, delta] = values;
        Self {
            avr,
            std,
            min,
            max,
            first,
            last,
            delta,
        }
    }
}
