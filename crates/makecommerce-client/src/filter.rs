//! Query filters for list endpoints.

use typed_builder::TypedBuilder;

/// Filter for [`get_transactions`](crate::MakeCommerceClient::get_transactions).
///
/// Only fields that are set are sent. Timestamps are passed through as given
/// (ISO 8601 strings).
///
/// # Examples
///
/// ```
/// use makecommerce_client::TransactionFilter;
///
/// let filter = TransactionFilter::builder()
///     .since(Some("2024-01-01T00:00:00+0000".into()))
///     .status(vec!["COMPLETED".into(), "REFUNDED".into()])
///     .per_page(Some(50))
///     .build();
/// assert_eq!(
///     filter.to_query(),
///     vec![
///         ("since", "2024-01-01T00:00:00+0000".to_owned()),
///         ("status", "COMPLETED,REFUNDED".to_owned()),
///         ("per_page", "50".to_owned()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct TransactionFilter {
    /// Created at or after.
    #[builder(default)]
    pub since: Option<String>,
    /// Created at or before.
    #[builder(default)]
    pub until: Option<String>,
    /// Completed at or after.
    #[builder(default)]
    pub completed_since: Option<String>,
    /// Completed at or before.
    #[builder(default)]
    pub completed_until: Option<String>,
    /// Refunded at or after.
    #[builder(default)]
    pub refunded_since: Option<String>,
    /// Refunded at or before.
    #[builder(default)]
    pub refunded_until: Option<String>,
    /// Transaction statuses; sent comma-separated.
    #[builder(default)]
    pub status: Vec<String>,
    /// Page number, starting from 1.
    #[builder(default)]
    pub page: Option<u32>,
    /// Page size.
    #[builder(default)]
    pub per_page: Option<u32>,
}

impl TransactionFilter {
    /// Render the filter as ordered query parameters, skipping empty values.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let text_fields = [
            ("since", &self.since),
            ("until", &self.until),
            ("completed_since", &self.completed_since),
            ("completed_until", &self.completed_until),
            ("refunded_since", &self.refunded_since),
            ("refunded_until", &self.refunded_until),
        ];
        for (name, value) in text_fields {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((name, v.to_owned()));
            }
        }
        if !self.status.is_empty() {
            params.push(("status", self.status.join(",")));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page.filter(|p| *p > 0) {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }
}
