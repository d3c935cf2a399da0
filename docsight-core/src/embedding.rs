//! Sentence embedding model
//!
//! The model is an injected capability: the analyzer receives a
//! [`ModelHandle`] and asks it for a ready embedder. Loading happens at most
//! once, lazily, the first time something needs the model; afterwards the
//! model is shared read-only.

use crate::error::ModelError;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Anything that can turn strings into embedding vectors
pub trait SentenceEmbedder: Send + Sync {
    /// One vector per input string, in input order
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError>;

    /// Model identifier for logging
    fn name(&self) -> &str;
}

/// Loading state of the embedding model
#[derive(Clone, Default)]
pub enum ModelState {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<dyn SentenceEmbedder>),
    Failed(String),
}

impl ModelState {
    pub fn label(&self) -> &'static str {
        match self {
            ModelState::Unloaded => "unloaded",
            ModelState::Loading => "loading",
            ModelState::Ready(_) => "ready",
            ModelState::Failed(_) => "failed",
        }
    }

    pub fn ready(&self) -> Option<Arc<dyn SentenceEmbedder>> {
        match self {
            ModelState::Ready(model) => Some(Arc::clone(model)),
            _ => None,
        }
    }
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Ready(model) => write!(f, "Ready({})", model.name()),
            ModelState::Failed(reason) => write!(f, "Failed({reason})"),
            other => f.write_str(other.label()),
        }
    }
}

type ModelLoader = Box<dyn Fn() -> Result<Arc<dyn SentenceEmbedder>, ModelError> + Send + Sync>;

/// Shared handle to the (possibly not yet loaded) embedding model
pub struct ModelHandle {
    state: RwLock<ModelState>,
    loader: Option<ModelLoader>,
}

impl ModelHandle {
    /// A handle that loads lazily through `loader` on first need
    pub fn with_loader<F>(loader: F) -> Arc<Self>
    where
        F: Fn() -> Result<Arc<dyn SentenceEmbedder>, ModelError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            state: RwLock::new(ModelState::Unloaded),
            loader: Some(Box::new(loader)),
        })
    }

    /// A handle around an already loaded model
    pub fn ready(model: Arc<dyn SentenceEmbedder>) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ModelState::Ready(model)),
            loader: None,
        })
    }

    /// A handle that never has a model; analyses report "Model not loaded"
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ModelState::Unloaded),
            loader: None,
        })
    }

    pub fn state(&self) -> ModelState {
        self.state.read().clone()
    }

    pub fn embedder(&self) -> Option<Arc<dyn SentenceEmbedder>> {
        self.state.read().ready()
    }

    /// Run the loader if nothing has been attempted yet.
    /// Failed loads are not retried.
    pub fn ensure_loaded(&self) -> ModelState {
        let Some(loader) = &self.loader else {
            return self.state();
        };

        {
            let mut state = self.state.write();
            if !matches!(*state, ModelState::Unloaded) {
                return state.clone();
            }
            *state = ModelState::Loading;
        }

        info!("🧠 Loading embedding model...");
        // Loader runs without the lock held so readers see `Loading`
        let next = match loader() {
            Ok(model) => {
                info!("✅ Embedding model ready: {}", model.name());
                ModelState::Ready(model)
            }
            Err(e) => {
                error!("❌ Error loading embedding model: {}", e);
                ModelState::Failed(e.to_string())
            }
        };

        *self.state.write() = next.clone();
        next
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("state", &*self.state.read())
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

/// Build the handle for the configured model kind
pub fn handle_for(config: &crate::config::ModelConfig) -> Arc<ModelHandle> {
    match config.kind {
        crate::config::ModelKind::None => ModelHandle::unavailable(),
        #[cfg(feature = "fastembed-model")]
        crate::config::ModelKind::MiniLm => {
            let show_progress = config.show_download_progress;
            ModelHandle::with_loader(move || {
                let model = MiniLmEmbedder::new(show_progress)?;
                Ok(Arc::new(model) as Arc<dyn SentenceEmbedder>)
            })
        }
        #[cfg(not(feature = "fastembed-model"))]
        crate::config::ModelKind::MiniLm => ModelHandle::with_loader(|| {
            Err(ModelError::LoadFailed(
                "built without the fastembed-model feature".to_string(),
            ))
        }),
    }
}

#[cfg(feature = "fastembed-model")]
pub use minilm::MiniLmEmbedder;

#[cfg(feature = "fastembed-model")]
mod minilm {
    use super::SentenceEmbedder;
    use crate::error::ModelError;
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

    /// all-MiniLM-L6-v2 through fastembed.
    /// Downloads the model on first use if not cached locally.
    pub struct MiniLmEmbedder {
        model: TextEmbedding,
    }

    impl MiniLmEmbedder {
        pub fn new(show_download_progress: bool) -> Result<Self, ModelError> {
            let init_options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_show_download_progress(show_download_progress);
            let model = TextEmbedding::try_new(init_options)
                .map_err(|e| ModelError::LoadFailed(e.to_string()))?;
            Ok(Self { model })
        }
    }

    impl SentenceEmbedder for MiniLmEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
            if texts.is_empty() {
                return Ok(vec![]);
            }
            self.model
                .embed(texts.to_vec(), None)
                .map_err(|e| ModelError::EmbedFailed(e.to_string()))
        }

        fn name(&self) -> &str {
            "all-MiniLM-L6-v2"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Constant(f32);

    impl SentenceEmbedder for Constant {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
            Ok(texts.iter().map(|_| vec![self.0; 4]).collect())
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_unavailable_handle_never_loads() {
        let handle = ModelHandle::unavailable();
        assert!(matches!(handle.ensure_loaded(), ModelState::Unloaded));
        assert!(handle.embedder().is_none());
    }

    #[test]
    fn test_loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = ModelHandle::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Constant(0.5)) as Arc<dyn SentenceEmbedder>)
        });

        assert!(matches!(handle.state(), ModelState::Unloaded));
        assert!(matches!(handle.ensure_loaded(), ModelState::Ready(_)));
        assert!(matches!(handle.ensure_loaded(), ModelState::Ready(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(handle.embedder().is_some());
    }

    #[test]
    fn test_failed_load_is_sticky() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = ModelHandle::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ModelError::LoadFailed("no network".to_string()))
        });

        let state = handle.ensure_loaded();
        assert_eq!(state.label(), "failed");
        handle.ensure_loaded();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(handle.embedder().is_none());
    }

    #[test]
    fn test_ready_handle_skips_loading() {
        let handle = ModelHandle::ready(Arc::new(Constant(0.1)));
        let state = handle.ensure_loaded();
        assert_eq!(state.label(), "ready");
        assert_eq!(format!("{state:?}"), "Ready(constant)");
    }

    #[cfg(not(feature = "fastembed-model"))]
    #[test]
    fn test_minilm_without_feature_fails_to_load() {
        let config = crate::config::ModelConfig {
            kind: crate::config::ModelKind::MiniLm,
            show_download_progress: false,
        };
        let handle = handle_for(&config);
        assert_eq!(handle.ensure_loaded().label(), "failed");
    }
}
