//! `HostPage` implementation over one attached CDP page session.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use replyforge_protocols::NodeHandle;

use super::client::Dispatch;
use super::error::CdpError;
use crate::page::{HostPage, PageError};

/// JS run against a compose node to write text the way the host framework
/// expects: value assignment alone is invisible to it, the synthetic
/// `input`/`change` events are what make it pick the edit up.
const SET_COMPOSE_FN: &str = r#"function(text) {
    if ('value' in this) {
        this.value = text;
    } else {
        this.textContent = text;
    }
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}"#;

const TEXT_FN: &str = "function() { return (this.innerText || this.textContent || '').trim(); }";

/// One attached page, driven over the shared CDP socket.
pub struct CdpPage {
    dispatch: Arc<Dispatch>,
    session_id: String,
}

impl CdpPage {
    pub(super) fn new(dispatch: Arc<Dispatch>, session_id: String) -> Self {
        Self {
            dispatch,
            session_id,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub(super) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        Ok(())
    }

    async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.dispatch
            .call(method, params, Some(&self.session_id))
            .await
    }

    async fn document_root(&self) -> Result<i64, CdpError> {
        let result = self.call("DOM.getDocument", Some(json!({"depth": 0}))).await?;
        result["root"]["nodeId"]
            .as_i64()
            .ok_or_else(|| CdpError::InvalidResponse("Missing document root".to_string()))
    }

    async fn scope_node(&self, scope: Option<&NodeHandle>) -> Result<i64, PageError> {
        match scope {
            Some(node) => Ok(node.0),
            None => self.document_root().await.map_err(backend),
        }
    }

    /// Resolve a DOM node to a runtime object id for JS calls on it.
    async fn object_id(&self, node: &NodeHandle) -> Result<String, PageError> {
        let result = self
            .call("DOM.resolveNode", Some(json!({"nodeId": node.0})))
            .await
            .map_err(|e| detached_or_backend(e, node))?;
        result["object"]["objectId"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| PageError::Detached(*node))
    }

    async fn call_function_on(
        &self,
        node: &NodeHandle,
        declaration: &str,
        arguments: Vec<Value>,
    ) -> Result<Value, PageError> {
        let object_id = self.object_id(node).await?;
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": declaration,
                    "arguments": arguments,
                    "returnByValue": true,
                })),
            )
            .await
            .map_err(|e| detached_or_backend(e, node))?;
        Ok(result["result"]["value"].clone())
    }
}

#[async_trait]
impl HostPage for CdpPage {
    async fn location(&self) -> Result<String, PageError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": "window.location.href",
                    "returnByValue": true,
                })),
            )
            .await
            .map_err(backend)?;
        Ok(result["result"]["value"].as_str().unwrap_or("").to_string())
    }

    async fn query(
        &self,
        scope: Option<&NodeHandle>,
        selector: &str,
    ) -> Result<Option<NodeHandle>, PageError> {
        let node_id = self.scope_node(scope).await?;
        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({"nodeId": node_id, "selector": selector})),
            )
            .await
            .map_err(|e| match scope {
                Some(node) => detached_or_backend(e, node),
                None => backend(e),
            })?;

        match result["nodeId"].as_i64() {
            Some(0) | None => Ok(None),
            Some(id) => Ok(Some(NodeHandle(id))),
        }
    }

    async fn query_all(
        &self,
        scope: Option<&NodeHandle>,
        selector: &str,
    ) -> Result<Vec<NodeHandle>, PageError> {
        let node_id = self.scope_node(scope).await?;
        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({"nodeId": node_id, "selector": selector})),
            )
            .await
            .map_err(|e| match scope {
                Some(node) => detached_or_backend(e, node),
                None => backend(e),
            })?;

        let nodes = result["nodeIds"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_i64())
                    .filter(|id| *id != 0)
                    .map(NodeHandle)
                    .collect()
            })
            .unwrap_or_default();
        Ok(nodes)
    }

    async fn text(&self, node: &NodeHandle) -> Result<String, PageError> {
        let value = self.call_function_on(node, TEXT_FN, Vec::new()).await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    async fn is_attached(&self, node: &NodeHandle) -> Result<bool, PageError> {
        match self
            .call("DOM.resolveNode", Some(json!({"nodeId": node.0})))
            .await
        {
            Ok(result) => Ok(result["object"]["objectId"].is_string()),
            Err(CdpError::Protocol { .. }) => Ok(false),
            Err(e) => Err(backend(e)),
        }
    }

    async fn set_compose_value(&self, node: &NodeHandle, text: &str) -> Result<(), PageError> {
        self.call_function_on(node, SET_COMPOSE_FN, vec![json!({"value": text})])
            .await?;
        Ok(())
    }
}

fn backend(err: CdpError) -> PageError {
    PageError::Backend(err.to_string())
}

/// Stale node ids surface as protocol error -32000 ("No node with given
/// id found" and friends); report those as detachment so the resolver can
/// classify them as the container having vanished.
fn detached_or_backend(err: CdpError, node: &NodeHandle) -> PageError {
    match err {
        CdpError::Protocol { code: -32000, .. } => PageError::Detached(*node),
        other => PageError::Backend(other.to_string()),
    }
}
