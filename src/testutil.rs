// Canned CanvasApi implementation for tests: endpoints map to fixed JSON.
// Endpoints not registered behave like failed requests (None).
use crate::client::CanvasApi;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default)]
pub struct StubApi {
    objects: HashMap<String, Value>,
    lists: HashMap<String, Value>,
}

impl StubApi {
    pub fn new() -> Self {
        StubApi::default()
    }

    pub fn with(mut self, endpoint: &str, value: Value) -> Self {
        self.objects.insert(endpoint.to_string(), value);
        self
    }

    pub fn with_list(mut self, endpoint: &str, items: Value) -> Self {
        self.lists.insert(endpoint.to_string(), items);
        self
    }
}

impl CanvasApi for StubApi {
    fn get(&self, endpoint: &str) -> Option<Value> {
        self.objects.get(endpoint).cloned()
    }

    fn get_all(&self, endpoint: &str) -> Option<Vec<Value>> {
        self.lists
            .get(endpoint)
            .and_then(|value| value.as_array().cloned())
    }
}
