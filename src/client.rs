//! main client
//!
//! get / put / delete primitives over the graph rest api, including the
//! pagination-following read loop.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::paging::PageAccumulator;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// query or form parameters for a single request
pub type Params = HashMap<String, String>;

/// one multipart file part of a write request
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// form field name (e.g. "source")
    pub field: String,
    /// file name reported to the api
    pub filename: String,
    /// raw file content
    pub bytes: Vec<u8>,
}

/// successful write response: the new object id, or a bare success flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutResponse {
    /// id of the newly created object
    Id(String),
    /// success flag for writes that return no id
    Success(bool),
}

impl PutResponse {
    /// the new object id, if the response carried one
    pub fn id(&self) -> Option<&str> {
        match self {
            PutResponse::Id(id) => Some(id),
            PutResponse::Success(_) => None,
        }
    }
}

/// rest client for the graph api
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    access_token: String,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = match &config.http_client {
            Some(client) => client.clone(),
            None => {
                let mut builder = reqwest::Client::builder()
                    .default_headers(config.extra_headers.clone())
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(!config.verify_ssl);
                if let Some(customize) = &config.http_client_builder {
                    builder = customize(builder);
                }
                builder.build().map_err(Error::from)?
            }
        };

        let access_token = config.access_token.clone();

        Ok(Self {
            config: Arc::new(config),
            access_token,
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// replace the access token used for subsequent requests
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = access_token.into();
    }

    /// request a graph node and return the response body, following
    /// `paging.next` links until the collection is exhausted.
    ///
    /// `access_token` and `format=json` are merged into `params`; a
    /// caller-supplied token wins over the configured one. `version`
    /// overrides the configured default for this request only.
    pub async fn get(
        &self,
        node: &str,
        params: Option<Params>,
        version: Option<&str>,
    ) -> Result<Value> {
        self.get_with(node, params, version, |url, params| async move {
            let response = self.http.get(url).query(&params).send().await?;
            let text = response.text().await?;
            Ok(text)
        })
        .await
    }

    /// publish to a graph node and return the created id or success flag.
    ///
    /// `post_args` go in the form body (with `access_token` injected if
    /// absent and `privacy` re-encoded to its nested json form); `params`
    /// go in the query string; `files` upload as multipart parts.
    pub async fn put(
        &self,
        node: &str,
        params: Option<Params>,
        post_args: Option<Params>,
        files: Vec<FileAttachment>,
        version: Option<&str>,
    ) -> Result<PutResponse> {
        self.put_with(
            node,
            params,
            post_args,
            files,
            version,
            |url, query, form, files| async move {
                let mut request = self.http.post(url).query(&query);
                if files.is_empty() {
                    request = request.form(&form);
                } else {
                    let mut multipart = reqwest::multipart::Form::new();
                    for (key, value) in form {
                        multipart = multipart.text(key, value);
                    }
                    for file in files {
                        let part = reqwest::multipart::Part::bytes(file.bytes)
                            .file_name(file.filename);
                        multipart = multipart.part(file.field, part);
                    }
                    request = request.multipart(multipart);
                }
                let response = request.send().await?;
                let text = response.text().await?;
                Ok(text)
            },
        )
        .await
    }

    /// delete a graph node
    pub async fn delete(
        &self,
        node: &str,
        params: Option<Params>,
        version: Option<&str>,
    ) -> Result<bool> {
        self.delete_with(node, params, version, |url, params| async move {
            let response = self.http.delete(url).query(&params).send().await?;
            let text = response.text().await?;
            Ok(text)
        })
        .await
    }

    /// merge the mandatory read parameters into a caller-supplied set
    fn read_params(&self, params: Option<Params>) -> Params {
        let mut params = params.unwrap_or_default();
        params
            .entry("access_token".to_string())
            .or_insert_with(|| self.access_token.clone());
        params.insert("format".to_string(), "json".to_string());
        params
    }
}

/// parse a response body into a json object
fn parse_object(text: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Unexpected(format!(
            "expected a json object, got: {other}"
        ))),
    }
}

/// parse a write response: `{"id": ...}`, `{"success": ...}`, or an error
fn parse_put_response(text: &str) -> Result<PutResponse> {
    let body = parse_object(text)?;

    if let Some(id) = body.get("id") {
        let id = match id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        };
        return Ok(PutResponse::Id(id));
    }

    if body.contains_key("success") {
        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        return Ok(PutResponse::Success(success));
    }

    Err(Error::from_body(Value::Object(body)))
}

/// parse a delete response: any body with a `success` key counts
fn parse_delete_response(text: &str) -> Result<bool> {
    let body = parse_object(text)?;

    if body.contains_key("success") {
        return Ok(true);
    }

    Err(Error::from_body(Value::Object(body)))
}

impl Client {
    pub(crate) async fn get_with<F, Fut>(
        &self,
        node: &str,
        params: Option<Params>,
        version: Option<&str>,
        mut send: F,
    ) -> Result<Value>
    where
        F: FnMut(Url, Params) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let version = version.unwrap_or(&self.config.version);
        let url = self.config.node_url(version, node)?;
        let mut params = self.read_params(params);

        let mut pages = PageAccumulator::new();
        let mut fetched = 0usize;

        loop {
            if let Some(limit) = self.config.page_limit {
                if fetched >= limit {
                    return Err(Error::PageOverflow(limit));
                }
            }
            fetched += 1;

            debug!(url = %url, page = fetched, "GET");
            let text = send(url.clone(), params.clone()).await?;
            let page = parse_object(&text)?;

            match pages.push(page) {
                Some(next) => params = next,
                None => break,
            }
        }

        let result = pages.finish();
        if result.contains_key("error") {
            return Err(Error::from_body(Value::Object(result)));
        }

        Ok(Value::Object(result))
    }

    pub(crate) async fn put_with<F, Fut>(
        &self,
        node: &str,
        params: Option<Params>,
        post_args: Option<Params>,
        files: Vec<FileAttachment>,
        version: Option<&str>,
        send: F,
    ) -> Result<PutResponse>
    where
        F: FnOnce(Url, Params, Params, Vec<FileAttachment>) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let version = version.unwrap_or(&self.config.version);
        let url = self.config.node_url(version, node)?;
        let query = params.unwrap_or_default();
        let mut form = post_args.unwrap_or_default();

        if let Some(privacy) = form.remove("privacy") {
            let wrapped = serde_json::json!({ "value": privacy }).to_string();
            form.insert("privacy".to_string(), wrapped);
        }
        form.entry("access_token".to_string())
            .or_insert_with(|| self.access_token.clone());

        debug!(url = %url, files = files.len(), "POST");
        let text = send(url, query, form, files).await?;
        parse_put_response(&text)
    }

    pub(crate) async fn delete_with<F, Fut>(
        &self,
        node: &str,
        params: Option<Params>,
        version: Option<&str>,
        send: F,
    ) -> Result<bool>
    where
        F: FnOnce(Url, Params) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let version = version.unwrap_or(&self.config.version);
        let url = self.config.node_url(version, node)?;
        let params = self.read_params(params);

        debug!(url = %url, "DELETE");
        let text = send(url, params).await?;
        parse_delete_response(&text)
    }
}
