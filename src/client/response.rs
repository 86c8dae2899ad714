//! Decoding of character listing responses and the fail-soft policy.
//!
//! The UI has no error state distinct from "no matches": [`resolve`] turns every
//! failure into [`CharacterPage::empty`] after logging the cause.

use crate::domain::error::{BrowserError, Result};
use crate::domain::{Character, CharacterPage};
use serde::Deserialize;

/// Listing response body: `{ info: { pages, .. }, results: [..] }`.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    info: ListingInfo,
    results: Vec<Character>,
}

#[derive(Debug, Deserialize)]
struct ListingInfo {
    pages: u32,
}

/// Decodes a listing response.
///
/// # Errors
///
/// - [`BrowserError::Status`] for any status outside `200..300`
/// - [`BrowserError::Decode`] if the body is not a listing document
pub fn parse_page(status: u16, body: &[u8]) -> Result<CharacterPage> {
    if !(200..300).contains(&status) {
        return Err(BrowserError::Status(status));
    }

    let response: ListingResponse = serde_json::from_slice(body)?;
    Ok(CharacterPage {
        characters: response.results,
        total_pages: response.info.pages,
    })
}

/// Decodes a listing response, degrading any failure to an empty page.
///
/// # Example
///
/// ```
/// use mortydex::client::resolve;
///
/// let page = resolve(404, br#"{"error":"There is nothing here"}"#);
/// assert!(page.characters.is_empty());
/// assert_eq!(page.total_pages, 0);
/// ```
#[must_use]
pub fn resolve(status: u16, body: &[u8]) -> CharacterPage {
    match parse_page(status, body) {
        Ok(page) => {
            tracing::debug!(
                character_count = page.characters.len(),
                total_pages = page.total_pages,
                "listing decoded"
            );
            page
        }
        Err(BrowserError::Status(404)) => {
            tracing::debug!("no characters match the filter");
            CharacterPage::empty()
        }
        Err(e) => {
            tracing::warn!(status = status, error = %e, "fetch failed, showing no results");
            CharacterPage::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TWO_CHARACTERS: &str = r#"{
        "info": { "count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null },
        "results": [
            { "id": 1, "name": "Rick Sanchez", "status": "Alive", "species": "Human", "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg" },
            { "id": 265, "name": "Pickle Rick", "image": "https://rickandmortyapi.com/api/character/avatar/265.jpeg" }
        ]
    }"#;

    #[test]
    fn decodes_results_in_response_order() {
        let page = parse_page(200, TWO_CHARACTERS.as_bytes()).unwrap();

        assert_eq!(page.total_pages, 42);
        let ids: Vec<u64> = page.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 265]);
        assert_eq!(page.characters[0].species, "Human");
        assert_eq!(page.characters[1].status, "");
    }

    #[test]
    fn zero_pages_is_a_valid_empty_listing() {
        let page = parse_page(200, br#"{"info":{"pages":0},"results":[]}"#).unwrap();
        assert_eq!(page, CharacterPage::empty());
    }

    #[test]
    fn non_success_status_is_an_error() {
        assert!(matches!(
            parse_page(500, TWO_CHARACTERS.as_bytes()),
            Err(BrowserError::Status(500))
        ));
    }

    #[rstest]
    #[case(200, "")]
    #[case(200, "<html>rate limited</html>")]
    #[case(200, r#"{"results":[]}"#)]
    #[case(200, r#"{"info":{"pages":1},"results":[{"id":1}]}"#)]
    #[case(404, r#"{"error":"There is nothing here"}"#)]
    #[case(502, "")]
    fn failures_degrade_to_empty_page(#[case] status: u16, #[case] body: &str) {
        assert_eq!(resolve(status, body.as_bytes()), CharacterPage::empty());
    }

    #[test]
    fn resolve_passes_successful_pages_through() {
        let page = resolve(200, TWO_CHARACTERS.as_bytes());
        assert_eq!(page.characters.len(), 2);
        assert_eq!(page.total_pages, 42);
    }
}
