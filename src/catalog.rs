//! The strategy catalog served by the listing and detail endpoints.

use tracing::{debug, instrument, trace};

use crate::{
    configuration::Configuration,
    error::FilterError,
    filters::{passes_filters, FilterSet},
    logger::init_logger,
    strategy::{StrategyDescriptor, StrategyRecord},
};

/// Every strategy known to the contest engine, with the configuration used to serve them.
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    strategies: Vec<StrategyDescriptor>,
    config: Configuration,
}

impl StrategyCatalog {
    /// Create a catalog over `strategies`. Installs the file logger if `config` enables it.
    ///
    /// # Errors
    /// Returned when the logger cannot be installed.
    #[instrument(skip_all)]
    pub fn new(strategies: Vec<StrategyDescriptor>, config: Configuration) -> anyhow::Result<Self> {
        if config.log {
            init_logger(&config)?;
        }
        trace!(?config, strategies = strategies.len());

        Ok(Self { strategies, config })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StrategyDescriptor> {
        self.strategies.iter()
    }

    /// Strategy with the given id.
    pub fn get(&self, id: &str) -> Option<&StrategyDescriptor> {
        self.strategies.iter().find(|strategy| strategy.id == id)
    }

    /// Strategies satisfying every filter of `filterset`, in catalog order.
    ///
    /// The filter-set is parsed once, so an unknown filter fails even on an empty catalog.
    ///
    /// # Errors
    /// The first [`FilterError`] met; no partial listing is returned.
    #[instrument(skip_all, fields(filters = filterset.len()))]
    pub fn filter(&self, filterset: &FilterSet) -> Result<Vec<&StrategyDescriptor>, FilterError> {
        let filters = filterset.parse()?;
        let mut selected = vec![];
        for strategy in &self.strategies {
            if passes_filters(strategy, &filters)? {
                selected.push(strategy);
            }
        }
        debug!("{} of {} strategies selected", selected.len(), self.strategies.len());
        Ok(selected)
    }

    /// Transmittable records of the strategies satisfying `filterset`.
    pub fn records(&self, filterset: &FilterSet) -> Result<Vec<StrategyRecord>, FilterError> {
        Ok(self
            .filter(filterset)?
            .into_iter()
            .map(|strategy| StrategyRecord::from_descriptor(strategy, &self.config))
            .collect())
    }

    /// Transmittable record of the strategy with the given id.
    pub fn record(&self, id: &str) -> Option<StrategyRecord> {
        self.get(id)
            .map(|strategy| StrategyRecord::from_descriptor(strategy, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, MemoryDepth};

    fn catalog() -> StrategyCatalog {
        let strategy = |id: &str, stochastic: bool, depth: MemoryDepth| {
            StrategyDescriptor::new(
                id,
                id,
                Classifier::new()
                    .with("stochastic", stochastic)
                    .with("long_run_time", false)
                    .with("memory_depth", depth),
            )
        };
        StrategyCatalog::new(
            vec![
                strategy("cooperator", false, MemoryDepth::Finite(0)),
                strategy("random", true, MemoryDepth::Finite(0)),
                strategy("tit_for_tat", false, MemoryDepth::Finite(1)),
                strategy("grudger", false, MemoryDepth::Unbounded),
            ],
            Configuration::new(),
        )
        .unwrap()
    }

    fn ids(selected: Vec<&StrategyDescriptor>) -> Vec<&str> {
        selected.iter().map(|strategy| strategy.id.as_str()).collect()
    }

    #[test]
    fn empty_filterset_lists_everything() {
        let catalog = catalog();
        assert_eq!(catalog.filter(&FilterSet::new()).unwrap().len(), catalog.len());
    }

    #[test]
    fn filters_keep_catalog_order() {
        let catalog = catalog();
        let filterset = FilterSet::new()
            .with("stochastic", "false")
            .with("min_memory_depth", "1");
        assert_eq!(ids(catalog.filter(&filterset).unwrap()), vec!["tit_for_tat", "grudger"]);

        let filterset = FilterSet::new().with("max_memory_depth", "0");
        assert_eq!(ids(catalog.filter(&filterset).unwrap()), vec!["cooperator", "random"]);
    }

    #[test]
    fn unknown_filter_fails_on_empty_catalog() {
        let catalog = StrategyCatalog::new(vec![], Configuration::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.filter(&FilterSet::new().with("nope", "1")).is_err());
    }

    #[test]
    fn detail_record_by_id() {
        let catalog = catalog();
        let record = catalog.record("grudger").unwrap();
        assert_eq!(record.classifier["memory_depth"], serde_json::json!(-1));
        assert!(catalog.record("missing").is_none());
    }
}
