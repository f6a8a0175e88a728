//! Persistent visitor context shared across widget remounts.
//!
//! The store is the source of truth for language selection. The funnel keeps
//! a local mirror and re-syncs from `subscribe` notifications.

use crate::language::Level;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorContext {
    pub native_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default)]
    pub has_chosen_language: bool,
    #[serde(default)]
    pub has_chosen_level: bool,
}

impl VisitorContext {
    pub fn new(native_language: &str) -> Self {
        Self {
            native_language: native_language.to_string(),
            target_language: None,
            level: None,
            has_chosen_language: false,
            has_chosen_level: false,
        }
    }
}

pub trait VisitorStore {
    fn load(&self) -> VisitorContext;
    fn set(&mut self, context: VisitorContext) -> Result<()>;
    /// Every successful `set` is delivered to all live subscribers.
    fn subscribe(&mut self) -> Receiver<VisitorContext>;
}

#[derive(Debug, Default)]
struct Subscribers {
    senders: Vec<Sender<VisitorContext>>,
}

impl Subscribers {
    fn add(&mut self) -> Receiver<VisitorContext> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    fn notify(&mut self, context: &VisitorContext) {
        // Receivers that were dropped are pruned here.
        self.senders.retain(|tx| tx.send(context.clone()).is_ok());
    }
}

/// Session-scoped store.
#[derive(Debug)]
pub struct MemoryVisitorStore {
    context: VisitorContext,
    subscribers: Subscribers,
}

impl MemoryVisitorStore {
    pub fn new(context: VisitorContext) -> Self {
        Self {
            context,
            subscribers: Subscribers::default(),
        }
    }
}

impl VisitorStore for MemoryVisitorStore {
    fn load(&self) -> VisitorContext {
        self.context.clone()
    }

    fn set(&mut self, context: VisitorContext) -> Result<()> {
        self.context = context;
        self.subscribers.notify(&self.context);
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<VisitorContext> {
        self.subscribers.add()
    }
}

/// Local-storage style store backed by a TOML file under the cache dir.
///
/// Files live at `<cache_dir>/<sha256(visitor_id)>/visitor.toml`.
#[derive(Debug)]
pub struct FileVisitorStore {
    path: PathBuf,
    native_language: String,
    subscribers: Subscribers,
}

impl FileVisitorStore {
    pub fn new(cache_dir: &Path, visitor_id: &str, native_language: &str) -> Self {
        Self {
            path: visitor_path(cache_dir, visitor_id),
            native_language: native_language.to_string(),
            subscribers: Subscribers::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VisitorStore for FileVisitorStore {
    fn load(&self) -> VisitorContext {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return VisitorContext::new(&self.native_language),
        };
        match toml::from_str(&data) {
            Ok(context) => {
                debug!(path = %self.path.display(), "Loaded visitor context");
                context
            }
            Err(err) => {
                warn!(path = %self.path.display(), "Ignoring unreadable visitor context: {err}");
                VisitorContext::new(&self.native_language)
            }
        }
    }

    fn set(&mut self, context: VisitorContext) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let contents = toml::to_string(&context).context("serializing visitor context")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))?;
        self.subscribers.notify(&context);
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<VisitorContext> {
        self.subscribers.add()
    }
}

fn visitor_path(cache_dir: &Path, visitor_id: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(visitor_id.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    cache_dir.join(hash).join("visitor.toml")
}
