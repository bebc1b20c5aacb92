//! Template sources: where template text comes from before rendering.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use bon::Builder;
use tracing::debug;

use crate::renderer::LoadError;

/// Maps template names to template text.
pub trait TemplateSource {
    /// Load the template stored under `name`.
    fn load(&self, name: &str) -> Result<String, LoadError>;
}

impl<S: TemplateSource + ?Sized> TemplateSource for &S {
    fn load(&self, name: &str) -> Result<String, LoadError> {
        (**self).load(name)
    }
}

/// Templates held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    templates: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under `name`, replacing any previous template.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.templates.insert(name.into(), content.into());
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template is stored.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for MemorySource {
    fn load(&self, name: &str) -> Result<String, LoadError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(name, content)| (name.into(), content.into()))
                .collect(),
        }
    }
}

/// Templates read from files under a views directory.
///
/// Names are paths relative to `root`. Successful reads are cached by name
/// unless caching is turned off; the cache sits behind a lock so one source
/// can be shared between threads.
///
/// # Example
///
/// ```no_run
/// use zero_template::{DirectorySource, TemplateSource};
///
/// let views = DirectorySource::builder()
///     .root("views")
///     .build();
/// let page = views.load("index.html");
/// ```
#[derive(Debug, Builder)]
pub struct DirectorySource {
    /// Directory the template names are relative to.
    #[builder(into)]
    root: PathBuf,

    /// Whether to keep loaded templates in memory.
    #[builder(default = true)]
    cache: bool,

    /// Loaded templates by name.
    #[builder(skip)]
    cached: RwLock<HashMap<String, String>>,
}

impl DirectorySource {
    /// Create a caching source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource::builder().root(root).build()
    }

    /// The views directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drop every cached template so the next load reads from disk.
    pub fn clear_cache(&self) {
        self.cached
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of templates currently cached.
    pub fn cached_len(&self) -> usize {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Resolve `name` to a file path inside the root.
    fn path_for(&self, name: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(name);
        let stays_inside = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || !stays_inside {
            return Err(LoadError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl TemplateSource for DirectorySource {
    fn load(&self, name: &str) -> Result<String, LoadError> {
        if self.cache {
            let cached = self.cached.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(content) = cached.get(name) {
                debug!(name, "template cache hit");
                return Ok(content.clone());
            }
        }

        let path = self.path_for(name)?;
        debug!(name, path = %path.display(), "reading template");
        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                name: name.to_string(),
            },
            _ => LoadError::Io { path, source },
        })?;

        if self.cache {
            self.cached
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(name.to_string(), content.clone());
        }
        Ok(content)
    }
}
