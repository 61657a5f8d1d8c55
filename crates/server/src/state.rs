use std::{path::PathBuf, sync::Arc};

use service::{
    auth::{repo::StoreAccountRepository, service::AuthConfig, AuthService},
    DocumentStore,
};

/// Where uploaded images land and how they are addressed publicly.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub url_prefix: String,
    pub max_bytes: usize,
}

impl From<&configs::UploadConfig> for UploadSettings {
    fn from(cfg: &configs::UploadConfig) -> Self {
        Self {
            dir: cfg.dir.clone(),
            url_prefix: cfg.url_prefix.trim_end_matches('/').to_string(),
            max_bytes: cfg.max_bytes,
        }
    }
}

impl UploadSettings {
    /// Public URL for a stored file name.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }

    /// Local path behind a URL this server handed out, if it is one.
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.url_prefix)?.strip_prefix('/')?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.starts_with('.') {
            return None;
        }
        Some(self.dir.join(name))
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<AuthService<StoreAccountRepository>>,
    pub uploads: Arc<UploadSettings>,
}

impl ServerState {
    pub fn new(store: Arc<dyn DocumentStore>, auth: AuthConfig, uploads: UploadSettings) -> Self {
        let repo = Arc::new(StoreAccountRepository::new(Arc::clone(&store)));
        Self { store, auth: Arc::new(AuthService::new(repo, auth)), uploads: Arc::new(uploads) }
    }
}
