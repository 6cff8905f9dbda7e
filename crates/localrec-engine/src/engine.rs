use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info};

use localrec_core::config::{Config, Settings, TrainPolicy};
use localrec_core::ingest::source_for_path;
use localrec_core::traits::CatalogSource;
use localrec_core::{Catalog, Error, Item, ItemId, Result, ScoredItem};
use localrec_similarity::{cosine_matrix, rank_row, SimilarityMatrix};
use localrec_text::{compose, TfidfVectorizer, VectorSpace};

/// Observable lifecycle tag of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Unloaded,
    Loaded,
    Trained,
}

/// Output of one training cycle; rebuilt in full from the current snapshot.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub space: VectorSpace,
    pub matrix: SimilarityMatrix,
}

enum State {
    Unloaded,
    Loaded(Catalog),
    Trained { catalog: Catalog, model: TrainedModel },
}

/// Single-caller recommender. Queries take `&mut self` because they may
/// train on demand and draw from the random source; embedding applications
/// sharing one engine across threads must wrap it in a lock.
pub struct RecommendationEngine {
    state: State,
    source: Option<Box<dyn CatalogSource>>,
    vectorizer: TfidfVectorizer,
    policy: TrainPolicy,
    rng: Box<dyn RngCore + Send>,
}

impl RecommendationEngine {
    pub fn new(vectorizer: TfidfVectorizer) -> Self {
        Self {
            state: State::Unloaded,
            source: None,
            vectorizer,
            policy: TrainPolicy::default(),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let engine = Self::new(TfidfVectorizer::from_settings(&settings.vectorizer)).with_policy(settings.recommend.train_policy);
        match settings.recommend.seed {
            Some(seed) => engine.with_rng(StdRng::seed_from_u64(seed)),
            None => engine,
        }
    }

    /// Engine wired to the configured catalog path and vectorizer settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = config.settings()?;
        let source = source_for_path(config.catalog_path()?);
        Ok(Self::from_settings(&settings).with_source(source))
    }

    #[must_use]
    pub fn with_source(mut self, source: Box<dyn CatalogSource>) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TrainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the random source used when `recommend` gets no query id.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn status(&self) -> EngineStatus {
        match self.state {
            State::Unloaded => EngineStatus::Unloaded,
            State::Loaded(_) => EngineStatus::Loaded,
            State::Trained { .. } => EngineStatus::Trained,
        }
    }

    pub fn policy(&self) -> TrainPolicy { self.policy }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            State::Unloaded => None,
            State::Loaded(catalog) | State::Trained { catalog, .. } => Some(catalog),
        }
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        match &self.state {
            State::Trained { model, .. } => Some(model),
            _ => None,
        }
    }

    /// Read the configured source into a fresh snapshot, dropping any trained
    /// model. Returns the number of items loaded; `catalog()` exposes them.
    pub fn load(&mut self) -> Result<usize> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("no catalog source configured".to_string()))?;
        let items = source.load()?;
        info!(source = %source.describe(), items = items.len(), "loaded catalog");
        Ok(self.install(items))
    }

    pub fn load_from(&mut self, source: &dyn CatalogSource) -> Result<usize> {
        let items = source.load()?;
        info!(source = %source.describe(), items = items.len(), "loaded catalog");
        Ok(self.install(items))
    }

    pub fn load_items(&mut self, items: Vec<Item>) -> usize {
        debug!(items = items.len(), "loaded catalog from memory");
        self.install(items)
    }

    fn install(&mut self, items: Vec<Item>) -> usize {
        let catalog = Catalog::new(items);
        let len = catalog.len();
        self.state = State::Loaded(catalog);
        len
    }

    /// Fit the vector space and similarity matrix on the current snapshot.
    /// Loads from the configured source first when nothing is loaded.
    /// On failure the snapshot is kept and the engine stays `Loaded`.
    pub fn train(&mut self) -> Result<()> {
        if matches!(self.state, State::Unloaded) {
            self.load()?;
        }
        let catalog = match std::mem::replace(&mut self.state, State::Unloaded) {
            State::Unloaded => return Err(Error::NotTrained),
            State::Loaded(catalog) | State::Trained { catalog, .. } => catalog,
        };
        match Self::fit(&self.vectorizer, &catalog) {
            Ok(model) => {
                info!(items = catalog.len(), vocabulary = model.space.dimension(), "recommendation model trained");
                self.state = State::Trained { catalog, model };
                Ok(())
            }
            Err(e) => {
                self.state = State::Loaded(catalog);
                Err(e)
            }
        }
    }

    fn fit(vectorizer: &TfidfVectorizer, catalog: &Catalog) -> Result<TrainedModel> {
        let corpus: Vec<String> = catalog.items().iter().map(compose).collect();
        let space = vectorizer.fit(&corpus)?;
        let matrix = cosine_matrix(space.vectors());
        Ok(TrainedModel { space, matrix })
    }

    fn ensure_trained(&mut self) -> Result<()> {
        if self.status() == EngineStatus::Trained {
            return Ok(());
        }
        match self.policy {
            TrainPolicy::Auto => self.train(),
            TrainPolicy::Strict => Err(Error::NotTrained),
        }
    }

    /// Top-k most similar items with their scores. Without `query_id` a
    /// random catalog item is used as the query.
    pub fn recommend_scored(&mut self, query_id: Option<ItemId>, top_k: usize) -> Result<Vec<ScoredItem>> {
        self.ensure_trained()?;
        let State::Trained { catalog, model } = &self.state else {
            return Err(Error::NotTrained);
        };
        let query_pos = match query_id {
            Some(id) => catalog.position_of(id).ok_or(Error::ProductNotFound(id))?,
            // training rejects empty catalogs, so the range is non-empty
            None => self.rng.gen_range(0..catalog.len()),
        };
        let row = model.matrix.row(query_pos).ok_or(Error::NotTrained)?;
        let ranked = rank_row(row, query_pos, top_k);
        debug!(query = catalog.items()[query_pos].id, top_k, returned = ranked.len(), "similarity recommendations");
        Ok(ranked
            .into_iter()
            .map(|pos| ScoredItem { item: catalog.items()[pos].clone(), score: row[pos] })
            .collect())
    }

    pub fn recommend(&mut self, query_id: Option<ItemId>, top_k: usize) -> Result<Vec<Item>> {
        Ok(self.recommend_scored(query_id, top_k)?.into_iter().map(|s| s.item).collect())
    }

    /// First `top_k` items of `category` in catalog order; no similarity involved.
    pub fn recommend_by_category(&mut self, category: &str, top_k: usize) -> Result<Vec<Item>> {
        self.ensure_trained()?;
        let catalog = self.catalog().ok_or(Error::NotTrained)?;
        let items: Vec<Item> = catalog.in_category(category).take(top_k).cloned().collect();
        debug!(category, top_k, returned = items.len(), "category recommendations");
        Ok(items)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self { Self::new(TfidfVectorizer::default()) }
}
