use crate::error::AppError;
use crate::templates;
use fridge_core::data::Database;
use minijinja::Environment;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    pub fn new(db: Database) -> Result<Self, AppError> {
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            templates: Arc::new(templates::environment()?),
        })
    }

    /// Locks the store. Never hold the guard across an await.
    pub fn db(&self) -> Result<MutexGuard<'_, Database>, AppError> {
        self.db.lock().map_err(|_| AppError::LockPoisoned)
    }

    pub fn render<S: serde::Serialize>(&self, name: &str, ctx: S) -> Result<String, AppError> {
        Ok(self.templates.get_template(name)?.render(ctx)?)
    }
}
