//! Shannon entropy and information gain over categorical columns.

use std::collections::BTreeMap;

use crate::{Dataset, TreeError};

/// The information gain computed for one candidate feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGain {
    /// Candidate feature name.
    pub feature: String,
    /// Information gain of splitting on this feature, in bits.
    pub gain: f64,
}

/// Result of ranking candidate features by information gain.
#[derive(Debug, Clone)]
pub struct SplitChoice {
    /// The winning feature (stable argmax over the candidate order).
    pub feature: String,
    /// Information gain of the winning feature.
    pub gain: f64,
    /// Every evaluated candidate with its gain, in candidate order.
    pub evaluated: Vec<FeatureGain>,
}

/// Compute the Shannon entropy (in bits) of `target`'s value distribution
/// over the row subset `rows`.
///
/// A small epsilon is folded into each probability before the logarithm so
/// the computation stays finite; the entropy of a one-valued subset is
/// therefore ≈0 rather than exactly 0.
///
/// # Errors
///
/// Returns [`TreeError::MissingColumn`] when `target` is not declared.
pub fn entropy(data: &Dataset, rows: &[usize], target: &str) -> Result<f64, TreeError> {
    let column = data.column_index(target)?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &row in rows {
        *counts.entry(data.value(row, column)).or_insert(0) += 1;
    }

    let n = rows.len() as f64;
    let entropy = -counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * (p + f64::EPSILON).log2()
        })
        .sum::<f64>();
    Ok(entropy)
}

/// Compute the information gain of partitioning `rows` by `split_column`,
/// measured against the entropy of `target`.
///
/// Gain = total entropy minus the row-count-weighted entropies of the
/// partitions. Non-negative for categorical splits up to floating-point
/// epsilon noise.
///
/// # Errors
///
/// Returns [`TreeError::MissingColumn`] when either column is not declared.
pub fn information_gain(
    data: &Dataset,
    rows: &[usize],
    split_column: &str,
    target: &str,
) -> Result<f64, TreeError> {
    let total_entropy = entropy(data, rows, target)?;
    let column = data.column_index(split_column)?;

    let mut partitions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for &row in rows {
        partitions.entry(data.value(row, column)).or_default().push(row);
    }

    let n = rows.len() as f64;
    let mut weighted_entropy = 0.0;
    for subset in partitions.values() {
        let weight = subset.len() as f64 / n;
        weighted_entropy += weight * entropy(data, subset, target)?;
    }

    Ok(total_entropy - weighted_entropy)
}

/// Rank every candidate feature by information gain and pick the winner.
///
/// The argmax is stable: the first candidate (in `candidates` order)
/// achieving the maximum gain wins, which keeps tree shapes reproducible.
/// `candidates` must be non-empty.
///
/// # Errors
///
/// Returns [`TreeError::MissingColumn`] when a candidate or `target` is
/// not declared.
pub fn best_split(
    data: &Dataset,
    rows: &[usize],
    candidates: &[String],
    target: &str,
) -> Result<SplitChoice, TreeError> {
    debug_assert!(!candidates.is_empty(), "candidate feature list must not be empty");

    let mut evaluated = Vec::with_capacity(candidates.len());
    for feature in candidates {
        let gain = information_gain(data, rows, feature, target)?;
        evaluated.push(FeatureGain {
            feature: feature.clone(),
            gain,
        });
    }

    let mut best = 0;
    for (position, candidate) in evaluated.iter().enumerate().skip(1) {
        if candidate.gain > evaluated[best].gain {
            best = position;
        }
    }

    Ok(SplitChoice {
        feature: evaluated[best].feature.clone(),
        gain: evaluated[best].gain,
        evaluated,
    })
}
