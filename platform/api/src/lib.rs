//! Shared wire types for the REST surface: the uniform `{ data, errors }`
//! envelope, paginated payloads, and the ordered validation-error collector
//! threaded through the registration and time-entry pipelines.

use serde::Serialize;

/// Uniform response envelope. Accepted outcomes carry `data`; rejected
/// outcomes carry the accumulated error messages and a null `data`.
#[derive(Clone, Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// An accepted outcome with nothing to return (e.g. delete).
    pub fn empty() -> Self {
        Self {
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: ErrorList) -> Self {
        Self {
            data: None,
            errors: errors.into_messages(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![message.into()],
        }
    }
}

/// Ordered collector for user-correctable validation errors. Checks append
/// independently; nothing short-circuits, so one response carries every
/// problem found.
#[derive(Clone, Debug, Default)]
pub struct ErrorList {
    messages: Vec<String>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// One page of results plus the totals the client needs to paginate.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_envelope_preserves_error_order() {
        let mut errors = ErrorList::new();
        errors.add("first");
        errors.add("second");
        let envelope: Envelope<()> = Envelope::rejected(errors);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors, vec!["first", "second"]);
    }

    #[test]
    fn ok_envelope_serializes_with_empty_errors() {
        let envelope = Envelope::ok(42);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"], 42);
        assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn empty_envelope_serializes_null_data() {
        let envelope: Envelope<String> = Envelope::empty();
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json["data"].is_null());
    }

    #[test]
    fn page_map_keeps_totals() {
        let page = Page {
            items: vec![1, 2],
            page: 0,
            page_size: 10,
            total_elements: 2,
            total_pages: 1,
        };
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2"]);
        assert_eq!(mapped.total_elements, 2);
    }
}
