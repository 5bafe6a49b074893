// ABOUTME: Shared application state handed to every handler
// ABOUTME: Domain services over one pool plus token verification and PDF storage

use archive_programs::ProgramStorage;
use archive_security::{TokenService, UserStorage};
use archive_settings::SettingsStorage;
use archive_theses::ThesisService;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::pdf_store::PdfStore;

#[derive(Clone)]
pub struct AppState {
    pub theses: ThesisService,
    pub users: UserStorage,
    pub programs: ProgramStorage,
    pub settings: SettingsStorage,
    pub tokens: Arc<TokenService>,
    pub pdf_store: Arc<dyn PdfStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenService, pdf_store: Arc<dyn PdfStore>) -> Self {
        Self {
            theses: ThesisService::new(pool.clone()),
            users: UserStorage::new(pool.clone()),
            programs: ProgramStorage::new(pool.clone()),
            settings: SettingsStorage::new(pool),
            tokens: Arc::new(tokens),
            pdf_store,
        }
    }
}
