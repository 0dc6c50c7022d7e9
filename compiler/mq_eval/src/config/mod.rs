//! Evaluation tunables.

use mq_structure::MaskDensity;

/// Settings for one evaluation. Travels inside the [`Context`](crate::Context).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    dense_mask_threshold: MaskDensity,
    max_result_sets: Option<usize>,
    max_connection_layers: u32,
}

impl QueryConfig {
    pub const DEFAULT_MAX_CONNECTION_LAYERS: u32 = 16;

    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::default()
    }

    /// Coverage above which masks and deduplication use one flag per atom.
    pub fn dense_mask_threshold(&self) -> MaskDensity {
        self.dense_mask_threshold
    }

    /// Upper bound on atom sets produced by any single generator, modifier,
    /// filter or combinator.
    pub fn max_result_sets(&self) -> Option<usize> {
        self.max_result_sets
    }

    pub fn max_connection_layers(&self) -> u32 {
        self.max_connection_layers
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            dense_mask_threshold: MaskDensity::DEFAULT,
            max_result_sets: None,
            max_connection_layers: Self::DEFAULT_MAX_CONNECTION_LAYERS,
        }
    }
}

/// Builder for [`QueryConfig`]; unset fields keep their defaults.
#[derive(Clone, Debug, Default)]
pub struct QueryConfigBuilder {
    config: QueryConfig,
}

impl QueryConfigBuilder {
    #[must_use]
    pub fn dense_mask_threshold(mut self, density: MaskDensity) -> Self {
        self.config.dense_mask_threshold = density;
        self
    }

    #[must_use]
    pub fn max_result_sets(mut self, limit: usize) -> Self {
        self.config.max_result_sets = Some(limit);
        self
    }

    #[must_use]
    pub fn max_connection_layers(mut self, layers: u32) -> Self {
        self.config.max_connection_layers = layers;
        self
    }

    pub fn build(self) -> QueryConfig {
        self.config
    }
}
