//! # Page Context
//!
//! The slice of the hosting page the flows touch: the query string, one text
//! element, and full-page navigation.

use crate::error::CheckoutResult;
use crate::session::SessionId;

/// Query parameter carrying the session identifier on the return page
pub const SESSION_ID_PARAM: &str = "session_id";

/// Page surface used by the return reporter
pub trait PageContext {
    /// Current `location.search` (with or without the leading `?`)
    fn query_string(&self) -> String;

    /// Replace the text content of the element with the given id
    fn set_text_content(&self, element_id: &str, text: &str) -> CheckoutResult<()>;

    /// Navigate away, replacing the current history entry
    fn replace_location(&self, url: &str) -> CheckoutResult<()>;
}

/// Read `session_id` from a query string.
///
/// First occurrence wins, values are percent-decoded, and an empty value
/// counts as absent.
pub fn session_id_from_query(query: &str) -> Option<SessionId> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SESSION_ID_PARAM)
        .and_then(|(_, value)| SessionId::new(value.into_owned()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_present() {
        let id = session_id_from_query("?session_id=cs_test_abc").unwrap();
        assert_eq!(id.as_str(), "cs_test_abc");

        let id = session_id_from_query("foo=1&session_id=cs_2&bar=x").unwrap();
        assert_eq!(id.as_str(), "cs_2");
    }

    #[test]
    fn test_session_id_absent() {
        for query in ["", "?", "?foo=bar", "?session=cs_1", "?SESSION_ID=cs_1", "?session_id="] {
            assert!(session_id_from_query(query).is_none(), "query {:?}", query);
        }
    }

    #[test]
    fn test_first_occurrence_and_decoding() {
        let id = session_id_from_query("?session_id=cs%2Fa+b&session_id=second").unwrap();
        assert_eq!(id.as_str(), "cs/a b");
    }
}
