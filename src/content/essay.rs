//! Essay query
//!
//! One GraphQL round trip per request; the response becomes the essay page's
//! props without any local recovery.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

use super::graphql::{GraphQlError, GraphQlRequest, GraphQlResponse, QueryOutcome};
use super::{ContentError, ContentSource};
use crate::logger;
use crate::pipeline::Props;

pub const ESSAY_QUERY: &str = r"
    query getEssay($slug: String!) {
      getEssay(slug: $slug) {
        title
        slug
        content
        date
        description
      }
    }
";

/// An essay as delivered by the content service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Essay {
    pub title: String,
    pub slug: String,
    /// Markdown source
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Optional schema fields may arrive as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct EssayData {
    #[serde(rename = "getEssay")]
    get_essay: Option<Essay>,
}

/// Fetch the essay identified by `slug` and turn the response into props.
///
/// Errors reported by the service are passed through as they are. Failures
/// below GraphQL (transport, status, undecodable body) become a single
/// error entry describing them. A `null` essay yields `Props::NotFound`.
pub async fn fetch_essay(source: &dyn ContentSource, slug: Option<&str>) -> Props<Essay> {
    let Some(slug) = slug.filter(|s| !s.is_empty()) else {
        return Props::Failed {
            errors: vec![GraphQlError::from_message("missing slug")],
        };
    };

    let request = GraphQlRequest {
        query: ESSAY_QUERY,
        variables: json!({ "slug": slug }),
    };

    let started = Instant::now();
    let result = source.execute(&request).await.and_then(decode);
    logger::log_content_fetch(source.describe(), slug, started.elapsed(), result.is_ok());

    match result {
        Ok(QueryOutcome::Errors(errors)) => Props::Failed { errors },
        Ok(QueryOutcome::Data(EssayData {
            get_essay: Some(essay),
        })) => Props::Ready(essay),
        Ok(QueryOutcome::Data(EssayData { get_essay: None })) => Props::NotFound,
        Err(e) => {
            logger::log_error(&format!("Essay '{slug}' could not be fetched: {e}"));
            Props::Failed {
                errors: vec![e.into()],
            }
        }
    }
}

fn decode(value: Value) -> Result<QueryOutcome<EssayData>, ContentError> {
    serde_json::from_value::<GraphQlResponse<EssayData>>(value)?.into_outcome()
}
