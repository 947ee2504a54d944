//! resource accessors
//!
//! fixed field-set wrappers over [`Client::get_fields`] and [`Client::put`]
//! for the common graph resources. every reader defaults to the current
//! user (`"me"`) when no node is given.

use crate::client::{Client, FileAttachment, Params, PutResponse};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

const DEFAULT_NODE: &str = "me";

/// which photo collection to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoKind {
    /// photos uploaded by the user
    #[default]
    Uploaded,
    /// photos the user is tagged in
    Tagged,
}

impl PhotoKind {
    fn as_str(self) -> &'static str {
        match self {
            PhotoKind::Uploaded => "uploaded",
            PhotoKind::Tagged => "tagged",
        }
    }
}

/// pull a string value out of a response object
fn string_field(response: &Value, key: &str) -> Result<String> {
    response
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Unexpected(format!("missing {key} in response")))
}

/// names of the permissions whose status is granted, in source order
fn granted_permissions(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.get("status").and_then(Value::as_str) == Some("granted"))
        .filter_map(|entry| entry.get("permission").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// where the content of an image reference comes from
enum ImageSource {
    /// an existing local file, uploaded as the multipart `source` part
    File(FileAttachment),
    /// anything else, passed through as the remote `url` argument
    Remote(String),
}

fn image_source(image: &str) -> Result<ImageSource> {
    let path = Path::new(image);
    if path.is_file() {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("source")
            .to_string();
        let bytes = fs::read(path)?;
        Ok(ImageSource::File(FileAttachment {
            field: "source".to_string(),
            filename,
            bytes,
        }))
    } else {
        Ok(ImageSource::Remote(image.to_string()))
    }
}

impl Client {
    /// retrieve the current user id
    pub async fn get_uid(&self) -> Result<String> {
        let response = self.get_fields(DEFAULT_NODE, "id", None, None).await?;
        string_field(&response, "id")
    }

    /// retrieve basic profile information for a user
    ///
    /// default fields: `id`, `name`
    pub async fn get_user_info(
        &self,
        node: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let fields = fields.unwrap_or(&["id", "name"]);
        self.get_fields(node, fields, None, None).await
    }

    /// retrieve the profile picture url for a user
    pub async fn get_user_picture_url(&self, node: Option<&str>) -> Result<String> {
        let node = node.unwrap_or(DEFAULT_NODE);

        let mut params = Params::new();
        params.insert("type".to_string(), "large".to_string());
        params.insert("redirect".to_string(), "false".to_string());

        let path = format!("{node}/picture");
        let response = self.get_fields(path.as_str(), "url", Some(params), None).await?;
        string_field(&response, "url")
    }

    /// retrieve the groups joined by a user.
    ///
    /// pinned to api version 2.3: the edge returns an empty result on every
    /// later version. works reliably only for the user the token belongs to.
    pub async fn get_user_groups(
        &self,
        node: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let fields = fields.unwrap_or(&["id", "name", "privacy", "description"]);

        warn!("the groups edge is pinned to api version 2.3");

        let path = format!("{node}/groups");
        self.get_fields(path.as_str(), fields, None, Some("2.3")).await
    }

    /// retrieve the pages managed by a user.
    ///
    /// works reliably only for the user the token belongs to.
    pub async fn get_user_pages(
        &self,
        node: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let fields = fields.unwrap_or(&["id", "name", "about", "access_token"]);

        let path = format!("{node}/accounts");
        self.get_fields(path.as_str(), fields, None, None).await
    }

    /// retrieve the permissions of the current token and their status
    pub async fn get_token_permissions(&self, node: Option<&str>) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let path = format!("{node}/permissions");
        self.get_fields(path.as_str(), &["permission", "status"], None, None)
            .await
    }

    /// retrieve the names of the permissions granted to the current token
    pub async fn get_token_granted_permissions(&self) -> Result<Vec<String>> {
        let permissions = self.get_token_permissions(None).await?;
        let entries = permissions
            .as_array()
            .ok_or_else(|| Error::Unexpected("permissions response is not a list".to_string()))?;
        Ok(granted_permissions(entries))
    }

    /// retrieve a user's photos, either uploaded or tagged
    ///
    /// default fields: `id`
    pub async fn get_user_photos(
        &self,
        node: Option<&str>,
        kind: PhotoKind,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let fields = fields.unwrap_or(&["id"]);

        let mut params = Params::new();
        params.insert("type".to_string(), kind.as_str().to_string());

        let path = format!("{node}/photos");
        self.get_fields(path.as_str(), fields, Some(params), None).await
    }

    /// retrieve a user's feed
    ///
    /// default fields: `id`
    pub async fn get_user_feed(
        &self,
        node: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let fields = fields.unwrap_or(&["id"]);

        let path = format!("{node}/feed");
        self.get_fields(path.as_str(), fields, None, None).await
    }

    /// retrieve the pages liked by a user
    pub async fn get_user_likes(
        &self,
        node: Option<&str>,
        fields: Option<&[&str]>,
    ) -> Result<Value> {
        let node = node.unwrap_or(DEFAULT_NODE);
        let fields = fields.unwrap_or(&["id", "name", "about", "can_post"]);

        let path = format!("{node}/likes");
        self.get_fields(path.as_str(), fields, None, None).await
    }

    /// publish a post to a node's feed.
    ///
    /// `args` take the feed fields (`message`, `link`, `picture`, `name`,
    /// `caption`, `description`, `place`, `tags`, `privacy`, ...); at least
    /// one of `message`, `link`, or `place` must be supplied.
    pub async fn put_post(
        &self,
        node: &str,
        args: Params,
        version: Option<&str>,
    ) -> Result<PutResponse> {
        let path = format!("{node}/feed");
        self.put(&path, None, Some(args), Vec::new(), version).await
    }

    /// publish a text post to a node's feed
    pub async fn put_message(
        &self,
        node: &str,
        message: impl Into<String>,
        mut args: Params,
        version: Option<&str>,
    ) -> Result<PutResponse> {
        args.insert("message".to_string(), message.into());
        self.put_post(node, args, version).await
    }

    /// publish a link post to a node's feed
    pub async fn put_link(
        &self,
        node: &str,
        link: impl Into<String>,
        mut args: Params,
        version: Option<&str>,
    ) -> Result<PutResponse> {
        args.insert("link".to_string(), link.into());
        self.put_post(node, args, version).await
    }

    /// upload a photo to a node.
    ///
    /// `image` naming an existing local file uploads its content as the
    /// multipart `source` part; anything else is passed through as the
    /// remote `url` argument.
    pub async fn put_image(
        &self,
        node: &str,
        image: &str,
        mut args: Params,
        version: Option<&str>,
    ) -> Result<PutResponse> {
        let mut files = Vec::new();
        match image_source(image)? {
            ImageSource::File(file) => files.push(file),
            ImageSource::Remote(url) => {
                args.insert("url".to_string(), url);
            }
        }

        let path = format!("{node}/photos");
        self.put(&path, None, Some(args), files, version).await
    }

    /// publish a comment on a node.
    ///
    /// `args` take one of `message`, `attachment_id`, `attachment_url`, or
    /// `source`.
    pub async fn put_comment(
        &self,
        node: &str,
        args: Params,
        version: Option<&str>,
    ) -> Result<PutResponse> {
        let path = format!("{node}/comments");
        self.put(&path, None, Some(args), Vec::new(), version).await
    }
}
