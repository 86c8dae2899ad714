//! Outgoing character listing requests.
//!
//! A [`FetchRequest`] is created by the state controller whenever the page or the
//! committed search term changes. The plugin shim turns it into exactly one
//! `web_request` call and stores the request in the host's context map, which the
//! host hands back untouched together with the response.

use super::trace::TraceContext;
use crate::domain::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Context key marking a web request as one of ours.
const SOURCE_KEY: &str = "source";
const SOURCE_VALUE: &str = "mortydex";

const ID_KEY: &str = "request_id";
const PAGE_KEY: &str = "page";
const NAME_KEY: &str = "name";
const ISSUED_AT_KEY: &str = "issued_at_ms";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_KEY: &str = "parent_span_id";

/// One fetch of the character listing for a `(page, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Monotonically increasing generation number assigned by the state.
    pub id: u64,

    /// Requested page, 1-based.
    pub page: u32,

    /// Name filter. Empty means no filter.
    pub name: String,

    /// Unix time in milliseconds when the request was issued.
    pub issued_at_ms: i64,

    /// Trace context of the issuing span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl FetchRequest {
    /// Creates a request stamped with the current time and trace context.
    #[must_use]
    pub fn new(id: u64, page: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            page,
            name: name.into(),
            issued_at_ms: chrono::Utc::now().timestamp_millis(),
            trace_context: TraceContext::from_current(),
        }
    }

    /// Builds the listing URL with `page` and `name` query parameters.
    ///
    /// The `name` parameter is always sent, empty when there is no filter.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::InvalidUrl`] if `base` does not parse.
    ///
    /// # Example
    ///
    /// ```
    /// use mortydex::client::FetchRequest;
    ///
    /// let request = FetchRequest::new(1, 2, "pickle rick");
    /// let url = request.url("https://rickandmortyapi.com/api/character")?;
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://rickandmortyapi.com/api/character?page=2&name=pickle+rick"
    /// );
    /// # Ok::<(), mortydex::BrowserError>(())
    /// ```
    pub fn url(&self, base: &str) -> Result<Url> {
        let page = self.page.to_string();
        let url = Url::parse_with_params(base, &[(PAGE_KEY, page.as_str()), (NAME_KEY, self.name.as_str())])?;
        Ok(url)
    }

    /// Encodes the request into a web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(SOURCE_KEY.to_string(), SOURCE_VALUE.to_string());
        context.insert(ID_KEY.to_string(), self.id.to_string());
        context.insert(PAGE_KEY.to_string(), self.page.to_string());
        context.insert(NAME_KEY.to_string(), self.name.clone());
        context.insert(ISSUED_AT_KEY.to_string(), self.issued_at_ms.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Whether a web request result's context map was produced by [`to_context`](Self::to_context).
    #[must_use]
    pub fn is_own_context(context: &BTreeMap<String, String>) -> bool {
        context.get(SOURCE_KEY).map(String::as_str) == Some(SOURCE_VALUE)
    }

    /// Reads only the generation number from one of our context maps.
    ///
    /// Lets a result be matched to its request even when another field is
    /// corrupt.
    #[must_use]
    pub fn request_id(context: &BTreeMap<String, String>) -> Option<u64> {
        if !Self::is_own_context(context) {
            return None;
        }
        parse_field::<u64>(context, ID_KEY).ok()
    }

    /// Decodes a request from the context map returned with a web request result.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Context`] if the map was not produced by
    /// [`to_context`](Self::to_context) or a numeric field does not parse.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        if !Self::is_own_context(context) {
            return Err(BrowserError::Context("not a character request".to_string()));
        }

        let id = parse_field::<u64>(context, ID_KEY)?;
        let page = parse_field::<u32>(context, PAGE_KEY)?;
        let issued_at_ms = parse_field::<i64>(context, ISSUED_AT_KEY)?;
        let name = context.get(NAME_KEY).cloned().unwrap_or_default();

        let trace_context = match (context.get(TRACE_ID_KEY), context.get(PARENT_SPAN_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            id,
            page,
            name,
            issued_at_ms,
            trace_context,
        })
    }

    /// Milliseconds elapsed since the request was issued.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis() - self.issued_at_ms
    }
}

fn parse_field<T: std::str::FromStr>(context: &BTreeMap<String, String>, key: &str) -> Result<T> {
    context
        .get(key)
        .ok_or_else(|| BrowserError::Context(format!("missing `{key}`")))?
        .parse::<T>()
        .map_err(|_| BrowserError::Context(format!("invalid `{key}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://rickandmortyapi.com/api/character";

    #[test]
    fn url_always_carries_name_parameter() {
        let request = FetchRequest::new(1, 1, "");
        let url = request.url(BASE).unwrap();
        assert_eq!(url.as_str(), format!("{BASE}?page=1&name="));
    }

    #[test]
    fn url_encodes_name_filter() {
        let request = FetchRequest::new(7, 3, "Mr. Poopy & co");
        let url = request.url(BASE).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("name".to_string(), "Mr. Poopy & co".to_string()),
            ]
        );
        assert!(!url.as_str().contains(" & "));
    }

    #[test]
    fn url_rejects_invalid_base() {
        let request = FetchRequest::new(1, 1, "");
        assert!(matches!(request.url("not a url"), Err(BrowserError::InvalidUrl(_))));
    }

    #[test]
    fn context_survives_host_round_trip() {
        let mut request = FetchRequest::new(42, 5, "morty");
        request.trace_context = Some(TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        });

        let decoded = FetchRequest::from_context(&request.to_context()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut context = BTreeMap::new();
        context.insert("page".to_string(), "1".to_string());
        assert!(matches!(
            FetchRequest::from_context(&context),
            Err(BrowserError::Context(_))
        ));
    }

    #[test]
    fn corrupt_page_is_rejected() {
        let mut context = FetchRequest::new(1, 1, "").to_context();
        context.insert("page".to_string(), "first".to_string());
        let err = FetchRequest::from_context(&context).unwrap_err();
        assert_eq!(err.to_string(), "Malformed request context: invalid `page`");
    }
}
