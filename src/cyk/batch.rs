use crate::config::Limits;
use crate::cyk::engine::derives_with;
use crate::error::QueryError;
use crate::grammar::model::Grammar;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};

/// The verdict for one input string of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub input: String,
    pub derivable: Option<bool>,
    /// Set when the query was rejected before the table was built.
    pub error: Option<String>,
}

impl BatchOutcome {
    fn new(input: &str, result: Result<bool, QueryError>) -> Self {
        match result {
            Ok(derivable) => BatchOutcome {
                input: input.to_string(),
                derivable: Some(derivable),
                error: None,
            },
            Err(e) => BatchOutcome {
                input: input.to_string(),
                derivable: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Metrics for a batch run
#[derive(Debug, Default, Serialize)]
pub struct BatchMetrics {
    pub total_time: Duration,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Answers every input independently, in parallel, against one shared grammar.
/// Results keep the order of `inputs`.
pub fn derives_many<S>(grammar: &Grammar, inputs: &[S], limits: &Limits) -> Vec<Result<bool, QueryError>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| derives_with(grammar, input.as_ref(), limits))
        .collect()
}

/// Runs a batch on a dedicated thread pool of `num_threads` workers.
pub fn run_batch<S>(
    grammar: &Grammar,
    inputs: &[S],
    limits: &Limits,
    num_threads: usize,
) -> Result<(Vec<BatchOutcome>, BatchMetrics)>
where
    S: AsRef<str> + Sync,
{
    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .context("Failed to build thread pool")?;
    log::debug!("Answering {} queries using {} threads", inputs.len(), num_threads);

    let results = pool.install(|| derives_many(grammar, inputs, limits));

    let mut metrics = BatchMetrics::default();
    let outcomes: Vec<BatchOutcome> = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| {
            match &result {
                Ok(true) => metrics.accepted += 1,
                Ok(false) => metrics.rejected += 1,
                Err(e) => {
                    log::warn!("Query '{}' rejected: {}", input.as_ref(), e);
                    metrics.failed += 1;
                }
            }
            BatchOutcome::new(input.as_ref(), result)
        })
        .collect();
    metrics.total_time = start.elapsed();

    log::info!(
        "Batch complete in {:?}: {} derivable, {} not derivable, {} rejected",
        metrics.total_time,
        metrics.accepted,
        metrics.rejected,
        metrics.failed
    );
    Ok((outcomes, metrics))
}
