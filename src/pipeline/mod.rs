//! Configured `filter(map(range))` pipelines
//!
//! A [`PipelineConfig`] names its stages instead of carrying closures, so it
//! can come from the command line (or, with the `serde` feature, a file) and
//! be validated before anything runs.

use std::fmt;
use std::ops::ControlFlow;

use tracing::debug;

use crate::drive;
use crate::protocol::{Advance, BoxedIter, IterError};
use crate::source::Counter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named transform stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransformKind {
    /// `x -> x`
    #[default]
    Identity,
    /// `x -> 2x`; fails on overflow.
    Double,
    /// `x -> x²`; fails on overflow.
    Square,
    /// `x -> -x`; fails on overflow.
    Negate,
}

impl TransformKind {
    /// Apply the transform to one value.
    pub fn apply(self, x: i64) -> Result<i64, IterError> {
        let result = match self {
            TransformKind::Identity => Some(x),
            TransformKind::Double => x.checked_mul(2),
            TransformKind::Square => x.checked_mul(x),
            TransformKind::Negate => x.checked_neg(),
        };
        result.ok_or_else(|| IterError::transform_failure(format!("{self} overflows on {x}")))
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformKind::Identity => "identity",
            TransformKind::Double => "double",
            TransformKind::Square => "square",
            TransformKind::Negate => "negate",
        };
        f.write_str(name)
    }
}

/// Named filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FilterKind {
    /// Keep everything.
    #[default]
    All,
    /// Keep even values.
    Even,
    /// Keep odd values.
    Odd,
}

impl FilterKind {
    /// Whether `x` passes the filter.
    pub fn keeps(self, x: i64) -> bool {
        match self {
            FilterKind::All => true,
            FilterKind::Even => x % 2 == 0,
            FilterKind::Odd => x % 2 != 0,
        }
    }
}

/// Configuration for a `filter(map(range(start, stop)))` pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    /// First value of the counting source.
    pub start: i64,
    /// Exclusive end of the counting source.
    pub stop: i64,
    /// Transform applied to each counted value.
    pub transform: TransformKind,
    /// Filter applied after the transform.
    pub filter: FilterKind,
    /// Stop after this many output values.
    pub limit: Option<usize>,
}

impl PipelineConfig {
    /// Pipeline over `0..stop` with no transform or filter.
    pub fn range(stop: i64) -> Self {
        Self::between(0, stop)
    }

    /// Pipeline over `start..stop` with no transform or filter.
    pub fn between(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop,
            transform: TransformKind::Identity,
            filter: FilterKind::All,
            limit: None,
        }
    }

    /// Set the transform stage.
    pub fn with_transform(mut self, transform: TransformKind) -> Self {
        self.transform = transform;
        self
    }

    /// Set the filter stage.
    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    /// Cap the number of output values.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject configurations that cannot produce anything meaningful.
    pub fn validate(&self) -> Result<(), IterError> {
        if self.limit == Some(0) {
            return Err(IterError::InvalidConfiguration(
                "limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the lazy pipeline. Nothing is evaluated until it is advanced.
    pub fn build(&self) -> Result<BoxedIter<'static, i64>, IterError> {
        self.validate()?;
        let transform = self.transform;
        let filter = self.filter;
        let pipeline = Counter::between(self.start, self.stop)
            .map(move |x| transform.apply(x))
            .filter(move |x| Ok(filter.keeps(*x)));
        Ok(pipeline.boxed())
    }

    /// Build and materialize the pipeline, honoring `limit`.
    pub fn run(&self) -> Result<Vec<i64>, IterError> {
        let pipeline = self.build()?;
        let values = match self.limit {
            None => drive::materialize(pipeline)?,
            Some(limit) => {
                let mut values = Vec::with_capacity(limit.min(1024));
                drive::for_each(pipeline, |value| {
                    values.push(value);
                    Ok(if values.len() >= limit {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    })
                })?;
                values
            }
        };
        debug!(
            start = self.start,
            stop = self.stop,
            transform = %self.transform,
            filter = ?self.filter,
            produced = values.len(),
            "pipeline finished"
        );
        Ok(values)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::range(0)
    }
}
