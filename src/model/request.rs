use std::fmt::Display;

use serde::Serialize;

/// A request for one page of the repository listing.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Hash)]
pub struct PageRequest {
    /// The page number, starting at 1. `None` requests the listing without pagination.
    pub(crate) page: Option<u32>,

    /// The number of repositories per page.
    pub(crate) per_page: u16,

    /// Whether the configured credentials are attached to the request.
    pub(crate) authenticated: bool,
}

impl PageRequest {
    /// Creates a request for the given page of the listing.
    pub fn new(page: u32, per_page: u16, authenticated: bool) -> Self {
        Self {
            page: Some(page),
            per_page,
            authenticated,
        }
    }

    /// Creates an anonymous, unpaginated request for the first page-size worth of records.
    pub fn fallback(per_page: u16) -> Self {
        Self {
            page: None,
            per_page,
            authenticated: false,
        }
    }

    /// Retrieves the page number.
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Whether the request carries credentials.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the same request without credentials.
    pub fn anonymous(&self) -> Self {
        Self {
            authenticated: false,
            ..self.clone()
        }
    }
}

impl Display for PageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PageRequest: page={:?}, per_page={}, authenticated={}",
            self.page, self.per_page, self.authenticated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_request_is_anonymous_and_unpaginated() {
        let request = PageRequest::fallback(100);

        assert_eq!(None, request.page());
        assert_eq!(100, request.per_page);
        assert!(!request.is_authenticated());
    }

    #[test]
    fn anonymous_keeps_page() {
        let request = PageRequest::new(3, 50, true);

        assert_eq!(PageRequest::new(3, 50, false), request.anonymous());
    }
}
