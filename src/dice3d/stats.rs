//! Outcome histogram and goodness-of-fit against a fair die

use crate::dice3d::types::DiceType;

/// 99.9th percentile of the chi-square distribution for `faces - 1`
/// degrees of freedom, i.e. the rejection threshold at p = 0.001.
pub fn chi_square_critical_999(die_type: DiceType) -> f64 {
    match die_type {
        DiceType::D6 => 20.515,
        DiceType::D20 => 43.820,
    }
}

/// Counts of each outcome of one die type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeHistogram {
    die_type: DiceType,
    counts: Vec<u64>,
}

impl OutcomeHistogram {
    pub fn new(die_type: DiceType) -> Self {
        Self {
            die_type,
            counts: vec![0; die_type.max_value() as usize],
        }
    }

    pub fn die_type(&self) -> DiceType {
        self.die_type
    }

    /// Count `outcome`. Values outside `1..=faces` are rejected.
    pub fn record(&mut self, outcome: u32) -> bool {
        match outcome
            .checked_sub(1)
            .and_then(|i| self.counts.get_mut(i as usize))
        {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Count for `outcome`, or 0 outside the die's range.
    pub fn count(&self, outcome: u32) -> u64 {
        outcome
            .checked_sub(1)
            .and_then(|i| self.counts.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Pearson's chi-square statistic against the uniform distribution.
    pub fn chi_square(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let expected = total as f64 / self.counts.len() as f64;
        self.counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Whether the sample is consistent with a fair die at p = 0.001.
    pub fn looks_uniform(&self) -> bool {
        self.chi_square() < chi_square_critical_999(self.die_type)
    }

    /// `(outcome, count)` pairs in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u32 + 1, count))
    }
}
