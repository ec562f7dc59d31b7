// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-memory Kubernetes API server behind a `kube::Client`.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A request as seen by the fake server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct State {
    /// collection path -> name -> object
    collections: BTreeMap<String, BTreeMap<String, Value>>,
    overrides: HashMap<(String, String), (u16, String)>,
    requests: Vec<RecordedRequest>,
    resource_version: u64,
}

/// A fake API server that stores objects per collection path.
///
/// Handles create, get, list (with equality label selectors) and delete for any resource path.
/// Responses registered with [`FakeApiServer::respond`] take precedence.
#[derive(Clone, Default)]
pub struct FakeApiServer {
    state: Arc<Mutex<State>>,
}

/// The parts of a resource URL the fake server cares about
#[derive(Debug, PartialEq)]
struct Target {
    base: String,
    namespace: Option<String>,
    plural: String,
    name: Option<String>,
}

impl Target {
    fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let base_len = match segments.first() {
            Some(&"api") => 2,
            Some(&"apis") => 3,
            _ => return None,
        };
        if segments.len() <= base_len {
            return None;
        }
        let base = format!("/{}", segments[..base_len].join("/"));

        let (namespace, plural, name) = match &segments[base_len..] {
            [plural] => (None, plural, None),
            [plural, name] => (None, plural, Some(name)),
            ["namespaces", ns, plural] => (Some(ns), plural, None),
            ["namespaces", ns, plural, name] => (Some(ns), plural, Some(name)),
            _ => return None,
        };

        Some(Self {
            base,
            namespace: namespace.map(|s| s.to_string()),
            plural: plural.to_string(),
            name: name.map(|s| s.to_string()),
        })
    }

    fn collection(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/namespaces/{}/{}", self.base, ns, self.plural),
            None => format!("{}/{}", self.base, self.plural),
        }
    }

    /// Whether a stored collection belongs to this (possibly all-namespaces) list
    fn lists(&self, collection: &str) -> bool {
        if collection == self.collection() {
            return true;
        }
        let prefix = format!("{}/namespaces/", self.base);
        self.namespace.is_none()
            && collection.starts_with(&prefix)
            && collection.ends_with(&format!("/{}", self.plural))
    }

    fn api_version(&self) -> String {
        self.base
            .trim_start_matches("/api/")
            .trim_start_matches("/apis/")
            .to_string()
    }
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` on exactly `path` with a fixed response
    pub fn respond(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().overrides.insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    /// Build a kube Client from this fake server
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    fn handle(&self, req: &RecordedRequest) -> (u16, String) {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());

        if let Some(resp) = state
            .overrides
            .get(&(req.method.clone(), req.path.clone()))
        {
            return resp.clone();
        }

        let Some(target) = Target::parse(&req.path) else {
            let message = "the server could not find the requested resource";
            return (404, status_json(404, "NotFound", message));
        };

        match (req.method.as_str(), &target.name) {
            ("POST", None) => Self::create(&mut state, &target, &req.body),
            ("GET", Some(name)) => match state
                .collections
                .get(&target.collection())
                .and_then(|items| items.get(name))
            {
                Some(item) => (200, item.to_string()),
                None => not_found(&target.plural, name),
            },
            ("GET", None) => Self::list(&state, &target, req.query.as_deref()),
            ("DELETE", Some(name)) => match state
                .collections
                .get_mut(&target.collection())
                .and_then(|items| items.remove(name))
            {
                Some(item) => (200, item.to_string()),
                None => not_found(&target.plural, name),
            },
            _ => (405, status_json(405, "MethodNotAllowed", "method not allowed")),
        }
    }

    fn create(state: &mut State, target: &Target, body: &[u8]) -> (u16, String) {
        let mut object: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => return (400, status_json(400, "BadRequest", &e.to_string())),
        };
        let Some(name) = object["metadata"]["name"].as_str().map(str::to_string) else {
            return (422, status_json(422, "Invalid", "metadata.name: Required value"));
        };

        let collection = target.collection();
        if state
            .collections
            .get(&collection)
            .is_some_and(|items| items.contains_key(&name))
        {
            return (
                409,
                status_json(
                    409,
                    "AlreadyExists",
                    &format!("{} \"{}\" already exists", target.plural, name),
                ),
            );
        }

        state.resource_version += 1;
        let metadata = &mut object["metadata"];
        metadata["resourceVersion"] = json!(state.resource_version.to_string());
        metadata["uid"] = json!(format!("uid-{}", state.resource_version));
        if let Some(ns) = &target.namespace {
            metadata["namespace"] = json!(ns);
        }

        state
            .collections
            .entry(collection)
            .or_default()
            .insert(name, object.clone());
        (201, object.to_string())
    }

    fn list(state: &State, target: &Target, query: Option<&str>) -> (u16, String) {
        let selector: Vec<(String, String)> = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .filter(|(k, _)| k == "labelSelector")
                    .flat_map(|(_, v)| {
                        v.split(',')
                            .filter_map(|term| term.split_once('='))
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect::<Vec<_>>()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let items: Vec<Value> = state
            .collections
            .iter()
            .filter(|(collection, _)| target.lists(collection))
            .flat_map(|(_, items)| items.values())
            .filter(|item| {
                selector
                    .iter()
                    .all(|(k, v)| item["metadata"]["labels"][k].as_str() == Some(v.as_str()))
            })
            .cloned()
            .collect();

        let body = json!({
            "apiVersion": target.api_version(),
            "kind": "List",
            "metadata": { "resourceVersion": state.resource_version.to_string() },
            "items": items,
        });
        (200, body.to_string())
    }
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?.to_bytes().to_vec();
            let recorded = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(str::to_string),
                body,
            };

            let (status, body) = server.handle(&recorded);
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A `Status` failure body as the API server sends it
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found(resource: &str, name: &str) -> (u16, String) {
    (
        404,
        status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced_item() {
        let target = Target::parse("/apis/apps/v1/namespaces/web/deployments/frontend").unwrap();

        assert_eq!(target.base, "/apis/apps/v1");
        assert_eq!(target.namespace.as_deref(), Some("web"));
        assert_eq!(target.plural, "deployments");
        assert_eq!(target.name.as_deref(), Some("frontend"));
        assert_eq!(target.api_version(), "apps/v1");
    }

    #[test]
    fn test_parse_cluster_scoped_item() {
        let target = Target::parse("/api/v1/namespaces/kube-system").unwrap();

        assert_eq!(target.namespace, None);
        assert_eq!(target.plural, "namespaces");
        assert_eq!(target.name.as_deref(), Some("kube-system"));
        assert_eq!(target.collection(), "/api/v1/namespaces");
    }

    #[test]
    fn test_all_namespaces_list_matches_every_namespace() {
        let target = Target::parse("/api/v1/pods").unwrap();

        assert!(target.lists("/api/v1/namespaces/a/pods"));
        assert!(target.lists("/api/v1/pods"));
        assert!(!target.lists("/api/v1/namespaces/a/secrets"));
        assert!(!target.lists("/apis/batch/v1/namespaces/a/pods"));
    }
}
