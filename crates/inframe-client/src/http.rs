//! HTTP client for the Inframe backend

use std::sync::Arc;

use inframe_api::{
    AboutUsSection, BlogPost, Company, ContactSubmission, LifePost, Membership, Resource,
    ResourceKind,
};
use inframe_api::inframe_table::Record;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Cause, Result};
use crate::normalize::{Failure, normalize, unwrap_envelope};

/// HTTP client for communicating with the Inframe backend
///
/// Every request goes through [`execute`], which logs it and funnels all
/// failures through the normalizer.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    ///
    /// # Example
    /// ```no_run
    /// use inframe_client::HttpClient;
    ///
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new HTTP client with custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(|e| {
            normalize(Failure::local(format!(
                "invalid backend URL {:?}: {e}",
                base_url.as_ref()
            )))
        })?;
        Ok(Self { client, base_url })
    }

    /// Backend base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| normalize(Failure::local(format!("invalid request path {path:?}: {e}"))))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        execute(request, &method, path).await
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None::<&Value>).await
    }

    // Resource endpoints

    /// List every record of a resource
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// reports a failure.
    ///
    /// # Example
    /// ```no_run
    /// # use inframe_client::HttpClient;
    /// use inframe_api::Company;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// let partners = client.list::<Company>().await?;
    /// println!("{} partners", partners.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let rows: Vec<Value> = unwrap_envelope(self.get(R::KIND.path()).await?)?;
        let total = rows.len();
        let items: Vec<R> = rows
            .into_iter()
            .filter_map(|row| match R::from_json(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(resource = %R::KIND, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect();
        if items.len() < total {
            tracing::warn!(
                resource = %R::KIND,
                skipped = total - items.len(),
                "records could not be decoded"
            );
        }
        Ok(items)
    }

    /// List a resource as table records
    ///
    /// Records without an id are skipped.
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// reports a failure.
    pub async fn list_records(&self, kind: ResourceKind) -> Result<Vec<Record>> {
        match kind {
            ResourceKind::AboutUs => self.records_of::<AboutUsSection>().await,
            ResourceKind::Partners => self.records_of::<Company>().await,
            ResourceKind::LifeAtInframe => self.records_of::<LifePost>().await,
            ResourceKind::Contacts => self.records_of::<ContactSubmission>().await,
            ResourceKind::Memberships => self.records_of::<Membership>().await,
            ResourceKind::Blogs => self.records_of::<BlogPost>().await,
        }
    }

    async fn records_of<R: Resource>(&self) -> Result<Vec<Record>> {
        let items = self.list::<R>().await?;
        let records: Vec<Record> = items.iter().filter_map(Resource::to_record).collect();
        if records.len() < items.len() {
            tracing::warn!(
                resource = %R::KIND,
                skipped = items.len() - records.len(),
                "records without id skipped"
            );
        }
        Ok(records)
    }

    /// Fetch one record
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// reports a failure.
    pub async fn get_one<R: Resource>(&self, id: &str) -> Result<R> {
        decode_resource(unwrap_envelope(self.get(&R::KIND.item_path(id)).await?)?)
    }

    /// Fetch one record as raw JSON
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// reports a failure.
    pub async fn get_raw(&self, kind: ResourceKind, id: &str) -> Result<Value> {
        unwrap_envelope(self.get(&kind.item_path(id)).await?)
    }

    /// Create a record
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// rejects the record.
    ///
    /// # Example
    /// ```no_run
    /// # use inframe_client::HttpClient;
    /// use inframe_api::ContactSubmission;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// let contact = ContactSubmission {
    ///     id: None,
    ///     name: "Asha".into(),
    ///     email: "asha@example.com".into(),
    ///     phone: None,
    ///     subject: Some("Admissions".into()),
    ///     message: "When do applications open?".into(),
    ///     created_at: None,
    /// };
    /// let created = client.create(&contact).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create<R: Resource>(&self, record: &R) -> Result<R> {
        let body = self.send(Method::POST, R::KIND.path(), Some(record)).await?;
        decode_resource(unwrap_envelope(body)?)
    }

    /// Replace a record
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// rejects the record.
    pub async fn update<R: Resource>(&self, id: &str, record: &R) -> Result<R> {
        let body = self
            .send(Method::PUT, &R::KIND.item_path(id), Some(record))
            .await?;
        decode_resource(unwrap_envelope(body)?)
    }

    /// Delete a record
    ///
    /// # Errors
    /// Returns the normalized error if the request fails or the backend
    /// reports a failure.
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()> {
        let body = self
            .send(Method::DELETE, &kind.item_path(id), None::<&Value>)
            .await?;
        unwrap_envelope::<Value>(body).map(|_| ())
    }
}

/// Send a prepared request and classify the outcome
///
/// Logs the outbound request and the completed response. Error statuses and
/// transport failures come back normalized; a successful body is returned as
/// JSON (`null` when empty).
pub(crate) async fn execute(request: RequestBuilder, method: &Method, path: &str) -> Result<Value> {
    tracing::debug!(%method, path, "sending request");

    let response = request
        .send()
        .await
        .map_err(|e| normalize(Failure::from_reqwest(e)))?;

    let status = response.status();
    tracing::debug!(status = status.as_u16(), path, "response received");

    // The status line arrived, so a broken body is never a connectivity error
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(status = status.as_u16(), path, error = %e, "response body unreadable");
            return Err(if status.is_success() {
                normalize(Failure::Local(Cause::Transport(Arc::new(e))))
                    .with_status(Some(status.as_u16()))
            } else {
                normalize(Failure::Response {
                    status: status.as_u16(),
                    body: None,
                })
            });
        }
    };
    let body = parse_body(&text);

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), %method, path, "request failed");
        return Err(normalize(Failure::Response {
            status: status.as_u16(),
            body,
        }));
    }

    match body {
        Some(Value::String(raw)) if !text.trim_start().starts_with('"') => Err(normalize(
            Failure::local(format!("response from {path} is not JSON: {raw}")),
        )),
        Some(value) => Ok(value),
        None => Ok(Value::Null),
    }
}

fn decode_resource<R: Resource>(value: Value) -> Result<R> {
    R::from_json(value).map_err(|e| {
        normalize(Failure::local(format!(
            "invalid {} record in response: {e}",
            R::KIND.label()
        )))
    })
}

/// JSON body if it parses, raw text otherwise, `None` when empty
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("http://localhost:5000");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let err = HttpClient::new("not a url").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Unexpected);
        assert!(err.message().starts_with("An unexpected error occurred: invalid backend URL"));
    }

    #[test]
    fn test_url_building() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let url = client.url(&ResourceKind::Partners.item_path("42")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/company/42");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("   "), None);
        assert_eq!(parse_body(r#"{"a":1}"#), Some(serde_json::json!({"a": 1})));
        assert_eq!(
            parse_body("Bad Gateway"),
            Some(Value::String("Bad Gateway".into()))
        );
    }
}
