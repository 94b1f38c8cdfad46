use common::content_type::ContentType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("node type metadata missing for content type {content_type}")]
    MissingNodeType { content_type: ContentType },
}
