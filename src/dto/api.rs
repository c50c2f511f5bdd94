//! Wire shapes of the booking backend's REST API.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::query::QueryState;

/// Envelope wrapping every backend response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// Optional pagination block some endpoints attach.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// `data` of a list response: either a bare array or an object with `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListData {
    Items(Vec<Value>),
    Paged(PagedData),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedData {
    pub items: Vec<Value>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// One page of undecoded records as returned by a list endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage {
    pub items: Vec<Value>,
    /// `None` when the endpoint sent no pagination metadata.
    pub total_pages: Option<u32>,
}

impl ListPage {
    /// Extracts the page from a successful envelope. The most specific
    /// pagination metadata wins: `data` over the envelope, `totalPages` over a
    /// `pagination` block.
    pub fn from_envelope(envelope: ApiEnvelope<Value>) -> Result<Self, serde_json::Error> {
        let outer = envelope
            .total_pages
            .or_else(|| envelope.pagination.and_then(|p| p.total_pages));
        let data = envelope
            .data
            .ok_or_else(|| {
                <serde_json::Error as serde::de::Error>::custom("list response carries no data")
            })?;

        match serde_json::from_value::<ListData>(data)? {
            ListData::Items(items) => Ok(Self {
                items,
                total_pages: outer,
            }),
            ListData::Paged(paged) => {
                let inner = paged
                    .total_pages
                    .or_else(|| paged.pagination.and_then(|p| p.total_pages));
                Ok(Self {
                    items: paged.items,
                    total_pages: inner.or(outer),
                })
            }
        }
    }
}

/// Result of a successful single-item call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Acknowledgement {
    /// Record echoed back by the backend, if any.
    pub data: Option<Value>,
    pub message: Option<String>,
}

impl From<ApiEnvelope<Value>> for Acknowledgement {
    fn from(envelope: ApiEnvelope<Value>) -> Self {
        Self {
            data: envelope.data.filter(|value| !value.is_null()),
            message: envelope.message.filter(|m| !m.trim().is_empty()),
        }
    }
}

/// Query-string parameters of a list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: String,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Parameters in the order the backend logs them: paging, search, sort,
    /// then filters sorted by key.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.push(("sort".to_string(), self.sort.clone()));
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

impl From<&QueryState> for ListQuery {
    fn from(state: &QueryState) -> Self {
        let search = Some(state.search().trim().to_string()).filter(|s| !s.is_empty());
        Self {
            page: state.page(),
            limit: state.limit().get(),
            search,
            sort: state.sort().as_str().to_string(),
            filters: state
                .filters()
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::query::QueryAction;
    use crate::domain::types::FilterKey;

    fn parse(value: Value) -> ApiEnvelope<Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn bare_array_without_pagination_leaves_total_unset() {
        let page = ListPage::from_envelope(parse(json!({
            "success": true,
            "data": [{ "_id": "1" }, { "_id": "2" }]
        })))
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn items_object_carries_total_pages() {
        let page = ListPage::from_envelope(parse(json!({
            "success": true,
            "data": { "items": [{ "_id": "1" }], "totalPages": 3 }
        })))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, Some(3));
    }

    #[test]
    fn inner_metadata_wins_over_envelope() {
        let page = ListPage::from_envelope(parse(json!({
            "success": true,
            "totalPages": 9,
            "data": { "items": [], "pagination": { "totalPages": 2 } }
        })))
        .unwrap();
        assert_eq!(page.total_pages, Some(2));

        let page = ListPage::from_envelope(parse(json!({
            "success": true,
            "pagination": { "totalPages": 4 },
            "data": []
        })))
        .unwrap();
        assert_eq!(page.total_pages, Some(4));
    }

    #[test]
    fn missing_data_is_not_a_page() {
        assert!(ListPage::from_envelope(parse(json!({ "success": true }))).is_err());
        assert!(
            ListPage::from_envelope(parse(json!({ "success": true, "data": { "tours": [] } })))
                .is_err()
        );
    }

    #[test]
    fn query_pairs_skip_blank_search() {
        let mut state = QueryState::default();
        state.apply(QueryAction::SetSearch("   ".into()));
        state.apply(QueryAction::SetFilter(
            FilterKey::new("isActive").unwrap(),
            "true".into(),
        ));
        state.apply(QueryAction::SetFilter(
            FilterKey::new("destination").unwrap(),
            "nepal".into(),
        ));

        let pairs = ListQuery::from(&state).to_pairs();
        let pairs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("page", "1"),
                ("limit", "8"),
                ("sort", "-createdAt"),
                ("destination", "nepal"),
                ("isActive", "true"),
            ]
        );
    }

    #[test]
    fn acknowledgement_drops_null_data_and_blank_message() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_value(json!({ "success": true, "data": null, "message": " " }))
                .unwrap();
        assert_eq!(Acknowledgement::from(envelope), Acknowledgement::default());
    }
}
