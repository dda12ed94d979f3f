//! Typed HTTP client for the Itemdesk API.

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ClientError, Result};
use crate::models::{
    DeleteItemResponse, ErrorBody, Item, ItemInput, LoginRequest, LoginResponse,
};

/// Thin wrapper over [`reqwest::Client`] bound to one API base URL.
///
/// Protected calls take the bearer token explicitly; the client itself
/// holds no session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(&base)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build(&self, method: Method, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!("{method} {url}");
        let request = self.http.request(method, url);
        Ok(match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    /// Send `request` and decode a success body, or turn a failure status
    /// into [`ClientError::Api`] carrying the server's `error` message.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("HTTP error! status: {}", status.as_u16()));
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .build(Method::POST, "login", None)?
            .json(&LoginRequest { username, password });
        Self::send(request).await
    }

    pub async fn list_items(&self, token: Option<&str>) -> Result<Vec<Item>> {
        Self::send(self.build(Method::GET, "items", token)?).await
    }

    pub async fn create_item(&self, token: Option<&str>, input: &ItemInput) -> Result<Item> {
        Self::send(self.build(Method::POST, "items", token)?.json(input)).await
    }

    pub async fn update_item(
        &self,
        token: Option<&str>,
        id: i64,
        input: &ItemInput,
    ) -> Result<Item> {
        let path = format!("items/{id}");
        Self::send(self.build(Method::PUT, &path, token)?.json(input)).await
    }

    pub async fn delete_item(&self, token: Option<&str>, id: i64) -> Result<DeleteItemResponse> {
        let path = format!("items/{id}");
        Self::send(self.build(Method::DELETE, &path, token)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::new("http://localhost:4000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:4000/");
        assert_eq!(
            client.base_url().join("items/3").unwrap().as_str(),
            "http://localhost:4000/items/3"
        );
    }

    #[test]
    fn base_url_with_prefix_keeps_it() {
        let client = ApiClient::new("http://localhost:4000/api/").unwrap();
        assert_eq!(
            client.base_url().join("login").unwrap().as_str(),
            "http://localhost:4000/api/login"
        );
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}
