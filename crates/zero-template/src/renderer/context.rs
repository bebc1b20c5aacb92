//! Render context carried through the passes.

use std::mem;

use crate::renderer::RenderWarning;
use crate::renderer::error::compute_suggestions;
use crate::types::Value;

/// State threaded through one render call.
///
/// The context tracks:
/// - The root value that paths resolve against
/// - Warnings collected so far, deduplicated, in discovery order
///
/// An `each` body is rendered with an item context whose root is the current
/// item; its warnings are merged back into the parent afterwards.
pub struct RenderContext<'a> {
    /// Root that key paths are resolved against.
    root: &'a Value,
    /// Whether this context renders one `each` item.
    item_scope: bool,
    /// Warnings collected during rendering.
    warnings: Vec<RenderWarning>,
}

impl<'a> RenderContext<'a> {
    /// Create a context rooted at `root`.
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            item_scope: false,
            warnings: Vec::new(),
        }
    }

    /// Create a context for one `each` item.
    ///
    /// Markers that miss the item are left for the variable pass, which
    /// resolves them against the root; only that pass reports them.
    pub fn for_item(item: &'a Value) -> Self {
        Self {
            item_scope: true,
            ..Self::new(item)
        }
    }

    /// Whether this context renders one `each` item.
    pub fn is_item_scope(&self) -> bool {
        self.item_scope
    }

    /// Get the root value.
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Resolve a key path against the root.
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        self.root.lookup(path)
    }

    /// Suggest a corrected path for one that did not resolve.
    ///
    /// Walks `path` as far as it resolves and, at the first record missing
    /// the next segment, swaps in the closest existing key.
    pub fn suggest_path(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let mut current = self.root;
        for (position, segment) in segments.iter().enumerate() {
            let fields = current.as_record()?;
            match fields.get(*segment) {
                Some(next) => current = next,
                None => {
                    let best = compute_suggestions(segment, fields.keys())
                        .into_iter()
                        .next()?;
                    let mut corrected = segments[..position].to_vec();
                    corrected.push(&best);
                    corrected.extend(&segments[position + 1..]);
                    return Some(corrected.join("."));
                }
            }
        }
        None
    }

    /// Add a warning, unless an identical one was already recorded.
    pub fn add_warning(&mut self, warning: RenderWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Get a reference to collected warnings.
    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    /// Drain all collected warnings from this context.
    pub fn take_warnings(&mut self) -> Vec<RenderWarning> {
        mem::take(&mut self.warnings)
    }

    /// Merge warnings from a scoped child context into this context.
    pub fn merge_warnings_from(&mut self, child: &mut RenderContext<'_>) {
        for warning in child.take_warnings() {
            self.add_warning(warning);
        }
    }
}
