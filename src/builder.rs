use std::sync::Arc;

use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use log::{debug, info};

use crate::core::{EmbeddingState, SpectralVertexNominator};
use crate::eigenmaps::{Embedder, EmbedderChoice};
use crate::errors::{NominationError, Result};
use crate::input::ArrayInput;
use crate::operators::Metric;
use crate::weighting::Weighting;

enum EmbeddingSource {
    Matrix(Arc<DenseMatrix<f64>>),
    Array(ArrayInput),
}

enum EmbedderSpec {
    Name(String),
    Choice(EmbedderChoice),
}

/// Configuration surface of [`SpectralVertexNominator`].
///
/// Defaults: no embedding, embedder `"ASE"`, `persistent = true`, euclidean
/// metric, `sum_inverse_distance` weighting.
pub struct NominatorBuilder {
    embedding: Option<EmbeddingSource>,
    embedder: EmbedderSpec,
    persistent: bool,
    metric: std::result::Result<Metric, String>,
    weighting: Weighting,
}

impl Default for NominatorBuilder {
    fn default() -> Self {
        debug!("Creating NominatorBuilder with default parameters");
        Self {
            embedding: None,
            embedder: EmbedderSpec::Name("ASE".to_string()),
            persistent: true,
            metric: Ok(Metric::default()),
            weighting: Weighting::default(),
        }
    }
}

impl NominatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------- Embedding --------------------

    /// Use a precomputed embedding (rows = vertices) instead of embedding the graph.
    pub fn with_embedding(self, embedding: DenseMatrix<f64>) -> Self {
        self.with_shared_embedding(Arc::new(embedding))
    }

    /// Same as [`Self::with_embedding`] but keeps the caller's handle on it.
    pub fn with_shared_embedding(mut self, embedding: Arc<DenseMatrix<f64>>) -> Self {
        info!("Using supplied embedding of shape {:?}", embedding.shape());
        self.embedding = Some(EmbeddingSource::Matrix(embedding));
        self
    }

    /// Precomputed embedding as an untyped array; must be 2-dimensional.
    pub fn with_embedding_array(mut self, embedding: ArrayInput) -> Self {
        info!("Using supplied embedding array of shape {:?}", embedding.shape);
        self.embedding = Some(EmbeddingSource::Array(embedding));
        self
    }

    /// Built-in embedder by name: `"ASE"` or `"LSE"`.
    pub fn with_embedder_name(mut self, name: &str) -> Self {
        self.embedder = EmbedderSpec::Name(name.to_string());
        self
    }

    pub fn with_embedder(mut self, embedder: EmbedderChoice) -> Self {
        self.embedder = EmbedderSpec::Choice(embedder);
        self
    }

    pub fn with_custom_embedder<E: Embedder + 'static>(self, embedder: E) -> Self {
        self.with_embedder(EmbedderChoice::Custom(Box::new(embedder)))
    }

    /// If false, every `fit` recomputes the embedding from the adjacency matrix.
    pub fn with_persistent(mut self, persistent: bool) -> Self {
        debug!("Setting persistent: {}", persistent);
        self.persistent = persistent;
        self
    }

    // -------------------- Scoring --------------------

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Ok(metric);
        self
    }

    /// Metric by registry name, resolved at `build`.
    pub fn with_metric_name(mut self, name: &str) -> Self {
        self.metric = name.parse::<Metric>().map_err(|_| name.to_string());
        self
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    // -------------------- Build --------------------

    /// Validates the configuration.
    ///
    /// - a supplied embedding must be 2-dimensional with at least one column
    ///   (`Index` error);
    /// - the embedder is resolved only when it can be used, i.e. when no
    ///   embedding is supplied or `persistent` is false; an unknown name is a
    ///   `Type` error;
    /// - an unknown metric name is `UnknownMetric`.
    pub fn build(self) -> Result<SpectralVertexNominator> {
        let metric = self.metric.map_err(NominationError::UnknownMetric)?;

        let embedding = match self.embedding {
            None => EmbeddingState::Unset,
            Some(EmbeddingSource::Matrix(m)) => EmbeddingState::External(m),
            Some(EmbeddingSource::Array(a)) => {
                EmbeddingState::External(Arc::new(a.to_matrix("embedding")?))
            }
        };
        if let Some(supplied) = embedding.matrix() {
            if supplied.shape().1 == 0 {
                return Err(NominationError::Index(format!(
                    "embedding must have at least one column, got shape {:?}",
                    supplied.shape()
                )));
            }
        }

        let embedder = if !embedding.is_set() || !self.persistent {
            let choice = match self.embedder {
                EmbedderSpec::Name(name) => name.parse::<EmbedderChoice>()?,
                EmbedderSpec::Choice(choice) => choice,
            };
            Some(choice.into_embedder())
        } else {
            None
        };

        info!(
            "Built SpectralVertexNominator: embedding={}, embedder={}, persistent={}, metric={}, weighting={}",
            if embedding.is_set() { "supplied" } else { "unset" },
            embedder.as_ref().map(|e| e.name()).unwrap_or("none"),
            self.persistent,
            metric,
            self.weighting
        );

        Ok(SpectralVertexNominator::from_parts(
            embedding,
            embedder,
            self.persistent,
            metric,
            self.weighting,
        ))
    }
}
