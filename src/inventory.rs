//! In-memory inventory of pharmaceutical item names.
//!
//! The store is an ordered list with first-match semantics: when a name
//! appears more than once, `delete` and `update` act on the earliest
//! occurrence. Duplicates are allowed.
//!
//! Each operation completes without yielding between reading and writing the
//! list. The handle wraps a `tokio::sync::RwLock` so tools can hold clones;
//! the run loop resolves one command at a time, so the lock is never contended.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Items present when the assistant starts.
pub const SEED_ITEMS: [&str; 3] = ["Paracetamol", "Aspirin", "Ibuprofen"];

/// Result of a single inventory mutation.
///
/// `NotFound` is a normal outcome, not an error. The `Display` form is the
/// status string handed back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryOutcome {
    Added(String),
    Deleted(String),
    Updated { old: String, new: String },
    NotFound(String),
}

impl fmt::Display for InventoryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(item) => write!(f, "Added: {}", item),
            Self::Deleted(item) => write!(f, "Deleted: {}", item),
            Self::Updated { old, new } => write!(f, "Updated: {} -> {}", old, new),
            Self::NotFound(item) => write!(f, "{} not found", item),
        }
    }
}

/// Shared handle to one inventory.
///
/// Clones point at the same list; separate `Inventory::new` calls never do.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Arc<RwLock<Vec<String>>>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory holding the given items, in order.
    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Arc::new(RwLock::new(items.into_iter().map(Into::into).collect())),
        }
    }

    /// Create an inventory holding [`SEED_ITEMS`].
    pub fn seeded() -> Self {
        Self::with_items(SEED_ITEMS)
    }

    /// Append `item` to the end. No duplicate check.
    pub async fn add(&self, item: &str) -> InventoryOutcome {
        self.items.write().await.push(item.to_string());
        tracing::debug!(item, "inventory add");
        InventoryOutcome::Added(item.to_string())
    }

    /// Remove the first occurrence of `item`.
    pub async fn delete(&self, item: &str) -> InventoryOutcome {
        let mut items = self.items.write().await;
        match items.iter().position(|i| i == item) {
            Some(idx) => {
                items.remove(idx);
                tracing::debug!(item, idx, "inventory delete");
                InventoryOutcome::Deleted(item.to_string())
            }
            None => InventoryOutcome::NotFound(item.to_string()),
        }
    }

    /// Replace the first occurrence of `old` with `new`, keeping its position.
    pub async fn update(&self, old: &str, new: &str) -> InventoryOutcome {
        let mut items = self.items.write().await;
        match items.iter().position(|i| i == old) {
            Some(idx) => {
                items[idx] = new.to_string();
                tracing::debug!(old, new, idx, "inventory update");
                InventoryOutcome::Updated {
                    old: old.to_string(),
                    new: new.to_string(),
                }
            }
            None => InventoryOutcome::NotFound(old.to_string()),
        }
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> Vec<String> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// Render a snapshot as a bracketed, quoted list: `["A", "B"]`.
pub fn format_snapshot(items: &[String]) -> String {
    let quoted = items
        .iter()
        .map(|i| format!("{:?}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", quoted)
}
