//! One-shot load of accident and population data.
//!
//! The dashboard never refreshes its data; both files are read exactly
//! once and every later request reuses the cached result. A failed
//! population load only disables rates, a failed accident load is fatal.

use std::sync::Arc;

use accviz_core::population::PopulationTable;
use accviz_core::source::{AccidentSource, PopulationSource};
use accviz_core::store::RecordStore;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

/// Everything the dashboard needs, produced by one load.
#[derive(Clone)]
pub struct LoadedData {
    pub store: Arc<RecordStore>,
    pub population: PopulationTable,
}

/// Caches the first successful load for the lifetime of the process.
pub struct DashboardLoader {
    accidents: Arc<dyn AccidentSource>,
    population: Arc<dyn PopulationSource>,
    cache: OnceCell<LoadedData>,
}

impl DashboardLoader {
    pub fn new(accidents: Arc<dyn AccidentSource>, population: Arc<dyn PopulationSource>) -> Self {
        Self {
            accidents,
            population,
            cache: OnceCell::new(),
        }
    }

    /// Load both sources, or hand back the cached result of an earlier
    /// call. Concurrent first calls load once; the rest wait.
    pub async fn load(&self) -> anyhow::Result<LoadedData> {
        let data = self
            .cache
            .get_or_try_init(|| async {
                info!("loading accident data from {}", self.accidents.source_name());
                let rows = self.accidents.load().await?;
                let store = Arc::new(RecordStore::from_records(rows));

                info!(
                    "loading population data from {}",
                    self.population.source_name()
                );
                let population = match self.population.load().await {
                    Ok(table) => table,
                    Err(err) => {
                        warn!("population data unavailable, rates disabled: {:#}", err);
                        PopulationTable::new()
                    }
                };
                Ok::<_, anyhow::Error>(LoadedData { store, population })
            })
            .await?;
        Ok(data.clone())
    }

    /// Like [`DashboardLoader::load`], but a failed load is logged once
    /// and replaced with an empty dataset. The dashboard then starts in
    /// its "no data" state instead of taking the process down.
    pub async fn load_or_empty(&self) -> LoadedData {
        match self.load().await {
            Ok(data) => data,
            Err(err) => {
                error!("data load failed, starting without data: {:#}", err);
                LoadedData {
                    store: Arc::new(RecordStore::from_records(Vec::new())),
                    population: PopulationTable::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accviz_core::model::{AccidentRecord, Canton};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AccidentSource for CountingSource {
        async fn load(&self) -> anyhow::Result<Vec<AccidentRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![AccidentRecord {
                year: 2020,
                canton_of_accident: Some(Canton::ZH),
                canton_of_residence: Some(Canton::ZH),
                branch: "NBUV".to_string(),
                age_group: "25-34".to_string(),
                gender: "frauen".to_string(),
                activity: "Fussball".to_string(),
                count: 1,
            }])
        }

        fn source_name(&self) -> &str {
            "counting"
        }
    }

    struct FailingPopulation;

    #[async_trait]
    impl PopulationSource for FailingPopulation {
        async fn load(&self) -> anyhow::Result<PopulationTable> {
            anyhow::bail!("file not found")
        }

        fn source_name(&self) -> &str {
            "failing"
        }
    }

    struct FailingAccidents;

    #[async_trait]
    impl AccidentSource for FailingAccidents {
        async fn load(&self) -> anyhow::Result<Vec<AccidentRecord>> {
            anyhow::bail!("missing column 'anzahl_unfaelle'")
        }

        fn source_name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_second_load_reuses_cache() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let loader = DashboardLoader::new(source.clone(), Arc::new(FailingPopulation));

        let first = loader.load().await.unwrap();
        let second = loader.load().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first.store, &second.store));
    }

    #[tokio::test]
    async fn test_population_failure_is_not_fatal() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let loader = DashboardLoader::new(source, Arc::new(FailingPopulation));

        let data = loader.load().await.unwrap();
        assert_eq!(data.store.len(), 1);
        assert!(data.population.is_empty());
    }

    #[tokio::test]
    async fn test_accident_failure_yields_empty_dataset() {
        use accviz_core::dashboard::Dashboard;
        use accviz_core::events::InteractionEvent;

        let loader = DashboardLoader::new(Arc::new(FailingAccidents), Arc::new(FailingPopulation));
        let data = loader.load_or_empty().await;
        assert!(data.store.is_empty());
        assert!(data.population.is_empty());

        // The empty dataset still carries a working dashboard.
        let mut dashboard = Dashboard::new(data.store, data.population);
        dashboard.handle(InteractionEvent::Reset);
        assert!(dashboard.options().years.is_empty());
    }
}
