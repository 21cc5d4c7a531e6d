//! Everything a command needs: config, catalog, storage and the persisted
//! draw engine.

use std::path::Path;

use drift_core::{
    Catalog, Config, DrawEngine, DriftSession, FavoritesStore, FileStorage, KeyValueStorage,
};

const ENGINE_KEY: &str = "drift_draw_state";

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub struct Context {
    pub config: Config,
    pub storage: FileStorage,
    pub session: DriftSession<FileStorage>,
}

impl Context {
    pub fn open(catalog_path: Option<&Path>) -> CliResult<Self> {
        let config = Config::load();
        let catalog = match catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::bundled()?,
        };
        let storage = FileStorage::new(config.storage_dir()?);
        let engine = load_engine(&storage, &config);
        let favorites = FavoritesStore::open(storage.clone());
        let session = DriftSession::new(catalog, engine, favorites)
            .with_share_config(config.share.clone());
        Ok(Self {
            config,
            storage,
            session,
        })
    }

    /// Persist the draw engine so the next invocation sees the same card
    /// and counter.
    pub fn save(self) -> CliResult {
        let Context {
            storage, session, ..
        } = self;
        save_engine(&storage, &session.into_engine())
    }
}

fn load_engine(storage: &FileStorage, config: &Config) -> DrawEngine {
    let mut engine = match storage.get(ENGINE_KEY) {
        Ok(Some(json)) => serde_json::from_str::<DrawEngine>(&json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding unreadable draw state");
            DrawEngine::default()
        }),
        Ok(None) => DrawEngine::default(),
        Err(e) => {
            tracing::warn!(error = %e, "draw state unavailable");
            DrawEngine::default()
        }
    };
    engine.set_config(config.shuffle());
    engine
}

fn save_engine(storage: &FileStorage, engine: &DrawEngine) -> CliResult {
    let json = serde_json::to_string(engine)?;
    storage.set(ENGINE_KEY, &json)?;
    Ok(())
}
