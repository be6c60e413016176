use shopsearch_common::{Result, ShopsearchError};
use tracing::debug;

use crate::catalog::Catalog;
use crate::similarity::cosine_similarity;
use crate::types::EmbeddedRecord;

/// Ranking policy for one collection
#[derive(Debug, Clone, Copy)]
pub struct SearchPolicy {
    /// Matches at or below this similarity are excluded before ranking
    pub min_similarity: Option<f32>,

    /// Hard cap on returned rows, applied after filtering and sorting
    pub limit: usize,
}

/// Rank a collection against a query vector.
///
/// Scores every eligible record (embedding present) by cosine similarity,
/// drops scores at or below the policy floor, sorts descending with
/// ascending id as the tie-break, truncates to the limit and projects.
/// An empty result is a valid outcome, not an error.
pub fn search<R, T, F>(
    catalog: &Catalog<R>,
    query: &[f32],
    policy: SearchPolicy,
    project: F,
) -> Result<Vec<T>>
where
    R: EmbeddedRecord,
    F: Fn(&R, f32) -> T,
{
    if query.len() != catalog.dimension() {
        return Err(ShopsearchError::query(format!(
            "Query vector dimension mismatch: expected {}, got {}",
            catalog.dimension(),
            query.len()
        )));
    }

    let mut scored: Vec<(&R, f32)> = Vec::new();
    for record in catalog.records() {
        // Records without an embedding are not eligible
        let Some(embedding) = record.embedding() else {
            continue;
        };

        let similarity = cosine_similarity(query, embedding);
        if let Some(floor) = policy.min_similarity {
            if similarity <= floor {
                continue;
            }
        }

        scored.push((record, similarity));
    }

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.id().cmp(&b.0.id()))
    });
    scored.truncate(policy.limit);

    debug!(
        "Search completed - {} results from {} candidates",
        scored.len(),
        catalog.len()
    );

    Ok(scored.into_iter().map(|(r, s)| project(r, s)).collect())
}
