// HTTP access to the Canvas API. One attempt per logical page, no retries,
// no backoff: a failed call is reported and surfaces as `None`, and the
// caller skips the dependent unit of work instead of aborting the run.
use crate::credentials::Credentials;
use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// HTTP request methods the Canvas API is called with.
///
/// A closed enum rather than a method string: an unsupported verb is
/// unrepresentable instead of being a runtime error path.
#[derive(Clone)]
pub enum HttpMethod {
    Get,
    Post(Value),
    Put(Value),
    Delete,
}

/// Seam between the HTTP transport and everything above it.
///
/// The resolver and the analyzer only ever issue reads, so the trait is
/// read-only; tests substitute a canned implementation.
pub trait CanvasApi {
    /// Single request, first response body verbatim. `None` means the value
    /// could not be retrieved; the condition has already been reported.
    fn get(&self, endpoint: &str) -> Option<Value>;

    /// Paginated request, all page items accumulated in page order.
    fn get_all(&self, endpoint: &str) -> Option<Vec<Value>>;
}

/// Blocking Canvas API client.
///
/// Holds the credentials and the `reqwest` client injected at construction;
/// both are read-only after initialization.
pub struct CanvasClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
}

impl CanvasClient {
    pub fn new(credentials: Credentials) -> Self {
        CanvasClient {
            http: reqwest::blocking::Client::new(),
            credentials,
        }
    }

    fn execute(&self, method: &HttpMethod, url: &str) -> Option<reqwest::blocking::Response> {
        let request = match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post(body) => self.http.post(url).json(body),
            HttpMethod::Put(body) => self.http.put(url).json(body),
            HttpMethod::Delete => self.http.delete(url),
        }
        .bearer_auth(&self.credentials.token);

        match request.send() {
            Ok(response) if response.status().is_success() => Some(response),
            Ok(response) => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                error!("Request to {} failed ({}): {}", url, status, body);
                None
            }
            Err(e) => {
                error!("Request to {} failed: {}", url, e);
                None
            }
        }
    }

    /// Issues a single request against `endpoint` (e.g. `/courses/123`) and
    /// returns the parsed JSON body, or `None` on any failure.
    pub fn request(&self, method: HttpMethod, endpoint: &str) -> Option<Value> {
        let url = format!("{}{}", self.credentials.base_url, endpoint);
        let response = self.execute(&method, &url)?;
        match response.json() {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Response from {} was not valid JSON: {}", url, e);
                None
            }
        }
    }

    fn fetch_page(&self, url: &str) -> Option<(Vec<Value>, Option<String>)> {
        let response = self.execute(&HttpMethod::Get, url)?;
        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|header| header.to_str().ok())
            .and_then(next_page_url);
        match response.json::<Vec<Value>>() {
            Ok(items) => Some((items, next)),
            Err(e) => {
                error!("Paginated response from {} was not a JSON array: {}", url, e);
                None
            }
        }
    }

    /// GETs `endpoint` following Canvas `Link: rel="next"` headers until no
    /// further page is advertised.
    pub fn request_paginated(&self, endpoint: &str) -> Option<Vec<Value>> {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let first = format!(
            "{}{}{}per_page=100",
            self.credentials.base_url, endpoint, separator
        );
        paginate(first, |url| self.fetch_page(url))
    }
}

impl CanvasApi for CanvasClient {
    fn get(&self, endpoint: &str) -> Option<Value> {
        self.request(HttpMethod::Get, endpoint)
    }

    fn get_all(&self, endpoint: &str) -> Option<Vec<Value>> {
        self.request_paginated(endpoint)
    }
}

static NEXT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<([^<>]+)>;\s*rel="next""#).unwrap());

/// Extracts the `rel="next"` target from an RFC 5988 `Link` header, the
/// pagination metadata Canvas responds with.
pub fn next_page_url(link_header: &str) -> Option<String> {
    NEXT_LINK
        .captures(link_header)
        .map(|captures| captures[1].to_string())
}

/// Accumulates pages into one ordered sequence.
///
/// `fetch_page` returns the items of one page plus the URL of the next one;
/// the chain terminates when no next link is present. A failed page makes
/// the whole fetch fail: a partial listing would silently understate the
/// remote state being audited.
pub fn paginate<F>(first_url: String, mut fetch_page: F) -> Option<Vec<Value>>
where
    F: FnMut(&str) -> Option<(Vec<Value>, Option<String>)>,
{
    let mut items = Vec::new();
    let mut url = Some(first_url);
    while let Some(current) = url {
        let (page, next) = fetch_page(&current)?;
        items.extend(page);
        url = next;
    }
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_page_url_finds_next_among_other_rels() {
        let header = r#"<https://canvas.test/api/v1/courses/1/users?page=2&per_page=100>; rel="next",<https://canvas.test/api/v1/courses/1/users?page=1&per_page=100>; rel="first""#;
        assert_eq!(
            next_page_url(header).as_deref(),
            Some("https://canvas.test/api/v1/courses/1/users?page=2&per_page=100")
        );
    }

    #[test]
    fn next_page_url_is_none_on_last_page() {
        let header = r#"<https://canvas.test/x?page=1>; rel="first",<https://canvas.test/x?page=3>; rel="last""#;
        assert_eq!(next_page_url(header), None);
    }

    #[test]
    fn paginate_collects_chained_pages_in_order() {
        let collected = paginate("p1".to_string(), |url| match url {
            "p1" => Some((vec![json!(1), json!(2)], Some("p2".to_string()))),
            "p2" => Some((vec![json!(3), json!(4)], Some("p3".to_string()))),
            "p3" => Some((vec![json!(5)], None)),
            _ => None,
        });
        assert_eq!(
            collected,
            Some(vec![json!(1), json!(2), json!(3), json!(4), json!(5)])
        );
    }

    #[test]
    fn paginate_fails_when_a_page_fails() {
        let collected = paginate("p1".to_string(), |url| match url {
            "p1" => Some((vec![json!(1)], Some("p2".to_string()))),
            _ => None,
        });
        assert_eq!(collected, None);
    }
}
