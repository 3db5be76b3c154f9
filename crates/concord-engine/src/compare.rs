//! Aggregation of the five measures into one result.

use concord_stats::{StatsError, kendall_tau_b, mean_squared_error, pearson, spearman};
use tracing::{debug, instrument};

use crate::config::CompareConfig;
use crate::error::{CompareError, Measure};
use crate::result::ComparisonResult;
use crate::validate::SeriesPair;

type Outcome = Result<f64, CompareError>;

struct Correlations {
    pearson: Outcome,
    spearman: Outcome,
    kendall: Outcome,
}

/// Compute every measure for `pair` and merge the outcomes.
///
/// The three groups (correlations, MSE, DTW) share no data and may run
/// concurrently; errors are only inspected after all of them finish, in the
/// fixed order Pearson, Spearman, Kendall, MSE, DTW.
#[instrument(skip_all, fields(n = pair.len(), parallel = config.parallel))]
pub(crate) fn run(
    config: &CompareConfig,
    pair: SeriesPair<'_>,
) -> Result<ComparisonResult, CompareError> {
    let (correlations, (mse, dtw)) = if config.parallel {
        rayon::join(
            || correlations(pair),
            || rayon::join(|| mse(pair), || dtw(config, pair)),
        )
    } else {
        (correlations(pair), (mse(pair), dtw(config, pair)))
    };

    let result = ComparisonResult::new(
        finite(Measure::Pearson, correlations.pearson)?,
        finite(Measure::Spearman, correlations.spearman)?,
        finite(Measure::Kendall, correlations.kendall)?,
        finite(Measure::Mse, mse)?,
        finite(Measure::Dtw, dtw)?,
    );
    debug!(?result, "comparison complete");
    Ok(result)
}

fn correlations(pair: SeriesPair<'_>) -> Correlations {
    let (a, b) = (pair.a().as_slice(), pair.b().as_slice());
    Correlations {
        pearson: stat(Measure::Pearson, pearson(a, b).map(f64::from)),
        spearman: stat(Measure::Spearman, spearman(a, b).map(f64::from)),
        kendall: stat(Measure::Kendall, kendall_tau_b(a, b).map(f64::from)),
    }
}

fn mse(pair: SeriesPair<'_>) -> Outcome {
    stat(
        Measure::Mse,
        mean_squared_error(pair.a().as_slice(), pair.b().as_slice()),
    )
}

fn dtw(config: &CompareConfig, pair: SeriesPair<'_>) -> Outcome {
    Ok(config.fast_dtw().distance(pair.a(), pair.b()).value())
}

fn stat(measure: Measure, result: Result<f64, StatsError>) -> Outcome {
    result.map_err(|source| match source {
        StatsError::ZeroVariance { .. } | StatsError::ZeroTieDenominator => {
            CompareError::DegenerateSeries { measure, source }
        }
        // A validated pair is non-empty and equal in length.
        StatsError::LengthMismatch { .. } | StatsError::Empty => {
            CompareError::NonFiniteResult { measure }
        }
    })
}

fn finite(measure: Measure, outcome: Outcome) -> Outcome {
    let value = outcome?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CompareError::NonFiniteResult { measure })
    }
}
