// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build errors.

use core::fmt;

/// Reasons a hierarchy build is refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// No primitives were supplied.
    EmptyInput,
    /// The branching factor is outside `2..=MAX_BRANCHING_FACTOR`.
    InvalidBranchingFactor(usize),
    /// The maximum leaf size is zero.
    InvalidLeafSize(usize),
    /// Binned SAH needs at least two bins.
    InvalidBinCount(usize),
    /// More primitives than a `u32` identifier can address.
    TooManyPrimitives(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "cannot build a hierarchy over zero primitives"),
            Self::InvalidBranchingFactor(n) => write!(
                f,
                "branching factor {n} is outside 2..={}",
                crate::MAX_BRANCHING_FACTOR
            ),
            Self::InvalidLeafSize(n) => write!(f, "maximum leaf size {n} must be at least 1"),
            Self::InvalidBinCount(n) => write!(f, "bin count {n} must be at least 2"),
            Self::TooManyPrimitives(n) => {
                write!(f, "{n} primitives exceed the supported primitive count")
            }
        }
    }
}

impl core::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_value() {
        assert_eq!(
            BuildError::EmptyInput.to_string(),
            "cannot build a hierarchy over zero primitives"
        );
        assert_eq!(
            BuildError::InvalidBranchingFactor(9).to_string(),
            "branching factor 9 is outside 2..=8"
        );
        assert_eq!(
            BuildError::InvalidLeafSize(0).to_string(),
            "maximum leaf size 0 must be at least 1"
        );
        assert_eq!(BuildError::InvalidBinCount(1).to_string(), "bin count 1 must be at least 2");
        assert_eq!(
            BuildError::TooManyPrimitives(5).to_string(),
            "5 primitives exceed the supported primitive count"
        );
    }
}
