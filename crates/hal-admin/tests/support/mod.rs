#![allow(dead_code)]

use hal_admin::{Error, Headers, HttpClient, Method, Request, Response, Result, Schema};
use hal_admin_core::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const ROOT: &str = "http://api.test";

/// An in-memory API answering from canned responses and recording every
/// request it receives.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    log: Vec<Request>,
}

#[derive(Debug)]
struct Route {
    method: Method,
    url: String,
    reply: std::result::Result<Response, String>,
}

impl MockClient {
    pub fn new() -> MockClient {
        MockClient::default()
    }

    /// Answers `method url` with `response`.
    pub fn on(&self, method: Method, url: &str, response: Response) -> &Self {
        self.state.lock().unwrap().routes.push(Route {
            method,
            url: url.to_string(),
            reply: Ok(response),
        });
        self
    }

    pub fn get(&self, url: &str, response: Response) -> &Self {
        self.on(Method::Get, url, response)
    }

    /// Fails `method url` at the transport level.
    pub fn fail(&self, method: Method, url: &str, message: &str) -> &Self {
        self.state.lock().unwrap().routes.push(Route {
            method,
            url: url.to_string(),
            reply: Err(message.to_string()),
        });
        self
    }

    /// Requests received so far, in the order they were sent.
    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.url).collect()
    }

    /// The decoded body of the only request sent.
    pub fn only_body(&self) -> Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {:#?}", requests);
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn send(&self, request: Request) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        state.log.push(request.clone());

        let reply = state
            .routes
            .iter()
            .find(|route| route.method == request.method && route.url == request.url)
            .map(|route| route.reply.clone());

        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::client(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message,
            ))),
            None => Ok(Response::json(
                404,
                Headers::new(),
                json!({"message": format!("no route for {} {}", request.method, request.url)}),
            )),
        }
    }
}

pub fn ok(json: Value) -> Response {
    Response::json(200, Headers::new(), json)
}

pub fn status(status: u16, json: Value) -> Response {
    Response::json(status, Headers::new(), json)
}

pub fn with_total(total: &str, json: Value) -> Response {
    Response::json(200, [("X-Total-Count", total)].into_iter().collect(), json)
}

/// A HAL collection page holding `items` under `_embedded[name]`.
pub fn page(name: &str, items: Vec<Value>, next: Option<&str>) -> Value {
    let mut page = json!({"_embedded": {name: items}, "_links": {}});
    if let Some(next) = next {
        page["_links"]["next"] = json!({"href": next});
    }
    page
}

/// Records `{"id": n, "title": "post n"}` for every `n` in `ids`.
pub fn posts(ids: std::ops::Range<i64>) -> Vec<Value> {
    ids.map(|id| json!({"id": id, "title": format!("post {}", id)}))
        .collect()
}

pub fn descriptor() -> Value {
    json!({
        "root_url": ROOT,
        "title": "Test Admin",
        "resources": {
            "users": {
                "title": "Users",
                "location": "/users",
                "id_field": "uid",
                "embedded_name": "users",
                "update_method": "PATCH",
                "deletable": true,
                "order_by": ["name"],
                "views": {
                    "list": {"fields": [{"type": "TextField", "source": "name"}]},
                    "create": {"fields": [
                        {"type": "TextInput", "source": "name"},
                        {"type": "FileInput", "source": "avatar"},
                        {"type": "MappingInput", "source": "profile", "params": {
                            "fields": [
                                {"type": "TextInput", "source": "city"},
                                {"type": "FileInput", "source": "photo"},
                            ]
                        }},
                        {"type": "ArrayInput", "source": "gallery", "params": {
                            "fields": [
                                {"type": "FileInput", "source": "image"},
                                {"type": "TextInput", "source": "caption"},
                            ]
                        }},
                    ]},
                },
            },
            "posts": {
                "title": "Posts",
                "location": "/posts",
                "id_field": "",
                "embedded_name": "posts",
                "order_by": ["title"],
                "views": {
                    "list": {"fields": [{"type": "TextField", "source": "title"}]},
                },
            },
            "events": {
                "title": "Events",
                "location": "/events",
                "id_field": "id",
                "embedded_name": "events",
                "infinite_pagination": true,
            },
        },
    })
}

pub fn schema() -> Schema {
    Schema::from_json(descriptor()).unwrap()
}

pub fn provider(client: &MockClient) -> hal_admin::DataProvider {
    hal_admin::DataProvider::new(Arc::new(schema()), Arc::new(client.clone()))
}
