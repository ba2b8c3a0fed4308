//! In-memory `HostPage` double for resolver and session tests.
//!
//! Matching is exact-string against the selector tags a node was created
//! with; no real CSS engine is involved. Build a page by adding nodes with
//! the same selector strings the hint chains use.

use async_trait::async_trait;
use parking_lot::Mutex;

use replyforge_protocols::NodeHandle;

use crate::page::{HostPage, PageError};

#[derive(Debug, Clone)]
struct FakeNode {
    id: i64,
    parent: Option<i64>,
    selectors: Vec<String>,
    text: String,
    removed: bool,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<FakeNode>,
    location: String,
    compose_values: Vec<(i64, String)>,
    dispatched_events: Vec<(i64, String)>,
}

/// Synthetic host page built from tagged nodes.
#[derive(Debug, Default)]
pub struct FakePage {
    inner: Mutex<Inner>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(location: &str) -> Self {
        let page = Self::new();
        page.set_location(location);
        page
    }

    pub fn set_location(&self, location: &str) {
        self.inner.lock().location = location.to_string();
    }

    /// Add a node matching the given selector strings, returning its handle.
    pub fn add_node(
        &self,
        parent: Option<NodeHandle>,
        selectors: &[&str],
        text: &str,
    ) -> NodeHandle {
        let mut inner = self.inner.lock();
        let id = inner.nodes.len() as i64 + 1;
        inner.nodes.push(FakeNode {
            id,
            parent: parent.map(|p| p.0),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            text: text.to_string(),
            removed: false,
        });
        NodeHandle(id)
    }

    /// Detach a node (and implicitly everything under it).
    pub fn remove_node(&self, node: NodeHandle) {
        let mut inner = self.inner.lock();
        if let Some(n) = inner.nodes.iter_mut().find(|n| n.id == node.0) {
            n.removed = true;
        }
    }

    /// The last value written into the given compose node, if any.
    pub fn compose_value(&self, node: NodeHandle) -> Option<String> {
        self.inner
            .lock()
            .compose_values
            .iter()
            .rev()
            .find(|(id, _)| *id == node.0)
            .map(|(_, v)| v.clone())
    }

    /// Synthetic events dispatched on a node, in dispatch order.
    pub fn events_for(&self, node: NodeHandle) -> Vec<String> {
        self.inner
            .lock()
            .dispatched_events
            .iter()
            .filter(|(id, _)| *id == node.0)
            .map(|(_, e)| e.clone())
            .collect()
    }

    fn is_live(inner: &Inner, id: i64) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            match inner.nodes.iter().find(|n| n.id == cid) {
                Some(n) if !n.removed => current = n.parent,
                _ => return false,
            }
        }
        true
    }

    fn is_descendant_of(inner: &Inner, id: i64, ancestor: i64) -> bool {
        let mut current = inner
            .nodes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.parent);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = inner
                .nodes
                .iter()
                .find(|n| n.id == cid)
                .and_then(|n| n.parent);
        }
        false
    }

    fn matches(inner: &Inner, node: &FakeNode, scope: Option<&NodeHandle>, selector: &str) -> bool {
        if !Self::is_live(inner, node.id) {
            return false;
        }
        if !node.selectors.iter().any(|s| s == selector) {
            return false;
        }
        match scope {
            Some(scope) => Self::is_descendant_of(inner, node.id, scope.0),
            None => true,
        }
    }
}

#[async_trait]
impl HostPage for FakePage {
    async fn location(&self) -> Result<String, PageError> {
        Ok(self.inner.lock().location.clone())
    }

    async fn query(
        &self,
        scope: Option<&NodeHandle>,
        selector: &str,
    ) -> Result<Option<NodeHandle>, PageError> {
        let inner = self.inner.lock();
        Ok(inner
            .nodes
            .iter()
            .find(|n| Self::matches(&inner, n, scope, selector))
            .map(|n| NodeHandle(n.id)))
    }

    async fn query_all(
        &self,
        scope: Option<&NodeHandle>,
        selector: &str,
    ) -> Result<Vec<NodeHandle>, PageError> {
        let inner = self.inner.lock();
        Ok(inner
            .nodes
            .iter()
            .filter(|n| Self::matches(&inner, n, scope, selector))
            .map(|n| NodeHandle(n.id))
            .collect())
    }

    async fn text(&self, node: &NodeHandle) -> Result<String, PageError> {
        let inner = self.inner.lock();
        if !Self::is_live(&inner, node.0) {
            return Err(PageError::Detached(*node));
        }
        Ok(inner
            .nodes
            .iter()
            .find(|n| n.id == node.0)
            .map(|n| n.text.clone())
            .unwrap_or_default())
    }

    async fn is_attached(&self, node: &NodeHandle) -> Result<bool, PageError> {
        let inner = self.inner.lock();
        Ok(Self::is_live(&inner, node.0))
    }

    async fn set_compose_value(&self, node: &NodeHandle, text: &str) -> Result<(), PageError> {
        let mut inner = self.inner.lock();
        if !Self::is_live(&inner, node.0) {
            return Err(PageError::Detached(*node));
        }
        inner.compose_values.push((node.0, text.to_string()));
        inner.dispatched_events.push((node.0, "input".to_string()));
        inner.dispatched_events.push((node.0, "change".to_string()));
        Ok(())
    }
}
