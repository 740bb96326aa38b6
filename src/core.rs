//! SpectralVertexNominator: vertex nomination on a single graph.
//!
//! Given a graph `G = (V, E)` and a seed `S ⊂ V`, the nominator embeds `G` into
//! a low dimensional space (or reuses a supplied embedding), then ranks all of
//! `V` by a distance-based rule against the members of `S`.
//!
//! Unattributed seeds treat each seed vertex individually: every vertex is
//! ranked by its distance to that seed vertex. Attributed seeds group seed
//! vertices by label and rank vertices by how likely they share the label,
//! using a weighted k-nearest-neighbour vote. The unattributed problem is the
//! attributed one with a unique label per seed vertex.
//!
//! The method assumes that vertices close in the embedding are related in the
//! way of interest. That conflates relatedness with community membership and is
//! not appropriate for every nomination problem.
//!
//! # Lifecycle
//!
//! - `fit` normalises the seed, obtains the embedding and computes the
//!   vertex × seed distance matrix. Seed-derived state is rebuilt on every call.
//! - `predict` ranks from that state without modifying it.
//! - The embedding follows [`EmbeddingState`]: a supplied embedding with
//!   `persistent = true` is never recomputed; a computed embedding with
//!   `persistent = true` is computed once; with `persistent = false` every `fit`
//!   recomputes it.
//!
//! A nominator is single-owner: `fit` takes `&mut self` and there is no
//! internal locking.

use std::sync::Arc;

use log::{debug, info, warn};
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::eigenmaps::Embedder;
use crate::errors::{NominationError, Result};
use crate::graph::Adjacency;
use crate::operators::{pairwise_distance, Metric};
use crate::ranking::{rank_vertices, NeighborCount, Nomination};
use crate::seeds::{SeedInput, Seeds};
use crate::weighting::{NeighborWeighting, Weighting};

/// Where the embedding comes from and whether it exists yet.
#[derive(Clone, Debug)]
pub enum EmbeddingState {
    /// Nothing computed yet.
    Unset,
    /// Supplied by the caller; shared and never mutated.
    External(Arc<DenseMatrix<f64>>),
    /// Produced by the nominator's embedder.
    Computed(DenseMatrix<f64>),
}

impl EmbeddingState {
    pub fn matrix(&self) -> Option<&DenseMatrix<f64>> {
        match self {
            EmbeddingState::Unset => None,
            EmbeddingState::External(m) => Some(m.as_ref()),
            EmbeddingState::Computed(m) => Some(m),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, EmbeddingState::Unset)
    }
}

/// Seed-derived state, rebuilt by every `fit`.
#[derive(Clone, Debug)]
struct SeedState {
    attr_labels: Vec<i64>,
    unique_attributes: Vec<i64>,
    distance_matrix: DenseMatrix<f64>,
}

/// Fit / predict contract shared by vertex nomination methods.
pub trait VertexNominator {
    /// Prepares the nominator for `predict` from a graph and a seed.
    fn fit(&mut self, adjacency: Option<&Adjacency>, seed: &SeedInput) -> Result<()>;

    /// Ranks all vertices for every attribute of the fitted seed.
    fn predict<K>(&self, k: K) -> Result<Nomination>
    where
        K: TryInto<NeighborCount, Error = NominationError>;

    /// `fit` followed by `predict`.
    fn fit_transform<K>(
        &mut self,
        adjacency: Option<&Adjacency>,
        seed: &SeedInput,
        k: K,
    ) -> Result<Nomination>
    where
        K: TryInto<NeighborCount, Error = NominationError>,
    {
        self.fit(adjacency, seed)?;
        self.predict(k)
    }
}

/// Spectral vertex nomination. Build one with [`crate::builder::NominatorBuilder`].
pub struct SpectralVertexNominator {
    embedding: EmbeddingState,
    embedder: Option<Box<dyn Embedder>>,
    persistent: bool,
    metric: Metric,
    weighting: Weighting,
    fitted: Option<SeedState>,
}

impl SpectralVertexNominator {
    pub(crate) fn from_parts(
        embedding: EmbeddingState,
        embedder: Option<Box<dyn Embedder>>,
        persistent: bool,
        metric: Metric,
        weighting: Weighting,
    ) -> Self {
        Self { embedding, embedder, persistent, metric, weighting, fitted: None }
    }

    /// The current embedding, if any.
    pub fn embedding(&self) -> Option<&DenseMatrix<f64>> {
        self.embedding.matrix()
    }

    pub fn embedding_state(&self) -> &EmbeddingState {
        &self.embedding
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Attribute label of every seed entry, in seed order.
    pub fn attr_labels(&self) -> Option<&[i64]> {
        self.fitted.as_ref().map(|s| s.attr_labels.as_slice())
    }

    /// Distinct seed labels, ascending.
    pub fn unique_attributes(&self) -> Option<&[i64]> {
        self.fitted.as_ref().map(|s| s.unique_attributes.as_slice())
    }

    /// `(n_vertices, n_seeds)` distances from every vertex to every seed entry.
    pub fn distance_matrix(&self) -> Option<&DenseMatrix<f64>> {
        self.fitted.as_ref().map(|s| &s.distance_matrix)
    }

    /// True when the fitted seed has a distinct label per entry.
    pub fn is_unattributed(&self) -> Option<bool> {
        self.fitted
            .as_ref()
            .map(|s| s.unique_attributes.len() == s.attr_labels.len())
    }

    /// Ranks with the named neighbour function; unknown names are `NotImplemented`.
    pub fn predict_named<K>(&self, k: K, neighbor_function: &str) -> Result<Nomination>
    where
        K: TryInto<NeighborCount, Error = NominationError>,
    {
        let k = k.try_into()?;
        let weighting: Weighting = neighbor_function.parse()?;
        self.predict_with(k, &weighting)
    }

    /// Ranks with any [`NeighborWeighting`].
    ///
    /// For an unattributed seed `k` is replaced by the seed count, so each vertex
    /// is scored against every seed vertex. Otherwise `k` is clipped to the seed
    /// count.
    pub fn predict_with(&self, k: NeighborCount, weighting: &dyn NeighborWeighting) -> Result<Nomination> {
        let state = self.fitted.as_ref().ok_or(NominationError::NotFitted)?;
        let n_seeds = state.attr_labels.len();

        let k = if state.unique_attributes.len() == n_seeds {
            debug!("Unattributed seed: using k = {} (seed count)", n_seeds);
            n_seeds
        } else {
            if k.get() > n_seeds {
                warn!("k = {} exceeds the {} seed entries, clipping", k.get(), n_seeds);
            }
            k.get().min(n_seeds)
        };

        let nomination = rank_vertices(
            &state.distance_matrix,
            &state.attr_labels,
            &state.unique_attributes,
            k,
            weighting,
        )?;
        info!(
            "Nominated {} vertices for {} attributes",
            nomination.shape().0,
            nomination.shape().1
        );
        Ok(nomination)
    }

    /// Builds or reuses the embedding. Returns its vertex count.
    fn acquire_embedding(&mut self, adjacency: Option<&Adjacency>) -> Result<usize> {
        if self.persistent {
            if let Some(existing) = self.embedding.matrix() {
                let n = existing.shape().0;
                if let Some(adjacency) = adjacency {
                    let given = adjacency.validate()?;
                    if given != n {
                        return Err(NominationError::Index(format!(
                            "adjacency matrix has {} vertices but the embedding has {} rows",
                            given, n
                        )));
                    }
                }
                debug!("Reusing persistent embedding ({} vertices)", n);
                return Ok(n);
            }
        }

        let adjacency = adjacency.ok_or_else(|| {
            NominationError::Value("adjacency matrix must be provided if embedding is None".into())
        })?;
        let dense = adjacency.to_dense()?;
        let embedder = self.embedder.as_mut().ok_or_else(|| {
            NominationError::Value("no embedder configured for this nominator".into())
        })?;

        info!("Embedding {} vertices with {}", dense.shape().0, embedder.name());
        let embedding = embedder.fit_transform(&dense)?;
        let (rows, dims) = embedding.shape();
        if rows != dense.shape().0 {
            return Err(NominationError::Index(format!(
                "embedder {} returned {} rows for {} vertices",
                embedder.name(),
                rows,
                dense.shape().0
            )));
        }
        if dims == 0 {
            return Err(NominationError::Index(format!(
                "embedder {} returned an embedding with no columns",
                embedder.name()
            )));
        }
        debug!("Embedding computed: {}x{}", rows, dims);
        self.embedding = EmbeddingState::Computed(embedding);
        Ok(rows)
    }

    fn seed_distances(&self, seeds: &Seeds, n_vertices: usize) -> Result<DenseMatrix<f64>> {
        let embedding = self.embedding.matrix().ok_or_else(|| {
            NominationError::Value("no embedding available to compute distances".into())
        })?;
        let indices = seeds.vertex_indices(n_vertices)?;
        let dims = embedding.shape().1;
        let values = indices
            .iter()
            .flat_map(|&v| (0..dims).map(move |c| *embedding.get((v, c))));
        let seed_points = DenseMatrix::from_iterator(values, indices.len(), dims, 0);
        pairwise_distance(embedding, &seed_points, &self.metric)
    }
}

impl VertexNominator for SpectralVertexNominator {
    /// Normalises the seed, builds or reuses the embedding, then computes the
    /// distance from every vertex to every seed vertex.
    ///
    /// `adjacency` may be `None` when a persistent embedding exists.
    fn fit(&mut self, adjacency: Option<&Adjacency>, seed: &SeedInput) -> Result<()> {
        self.fitted = None;
        let seeds = seed.normalize()?;
        if seeds.is_empty() {
            return Err(NominationError::Value("seed must contain at least one vertex".into()));
        }

        let n_vertices = self.acquire_embedding(adjacency)?;
        let distance_matrix = self.seed_distances(&seeds, n_vertices)?;

        let state = SeedState {
            attr_labels: seeds.labels(),
            unique_attributes: seeds.unique_labels(),
            distance_matrix,
        };
        info!(
            "Fitted seed of {} entries over {} attributes ({} vertices)",
            state.attr_labels.len(),
            state.unique_attributes.len(),
            n_vertices
        );
        self.fitted = Some(state);
        Ok(())
    }

    /// Uses the configured weighting (default `sum_inverse_distance`).
    fn predict<K>(&self, k: K) -> Result<Nomination>
    where
        K: TryInto<NeighborCount, Error = NominationError>,
    {
        let k = k.try_into()?;
        self.predict_with(k, &self.weighting)
    }
}
