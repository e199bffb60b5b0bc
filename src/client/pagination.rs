use serde::de::DeserializeOwned;

use super::{ApiRequest, TelnyxClient, TelnyxError};
use crate::domain::{Page, PageMeta};

/// One page of list results plus what is needed to fetch the following pages.
///
/// Fetching the next page re-issues the originating request with `page[number]` bumped
/// by one; every other query parameter is kept. The page number counts from what this
/// client requested, never from the `page_number` echoed by the server.
pub struct Paginated<'c, T> {
    client: &'c TelnyxClient,
    request: ApiRequest,
    number: u32,
    page: Page<T>,
}

impl<T> std::fmt::Debug for Paginated<'_, T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginated")
            .field("request", &self.request)
            .field("number", &self.number)
            .field("page", &self.page)
            .finish()
    }
}

impl<'c, T: DeserializeOwned> Paginated<'c, T> {
    pub(crate) fn new(client: &'c TelnyxClient, request: ApiRequest, page: Page<T>) -> Self {
        let number = request
            .page_number()
            .and_then(|number| u32::try_from(number).ok())
            .unwrap_or(1);
        Self {
            client,
            request,
            number,
            page,
        }
    }

    /// Items of this page, in server order.
    pub fn items(&self) -> &[T] {
        &self.page.data
    }

    /// Consume the page and keep only its items.
    pub fn into_items(self) -> Vec<T> {
        self.page.data
    }

    /// Page metadata, if the response carried any.
    pub fn meta(&self) -> Option<&PageMeta> {
        self.page.meta.as_ref()
    }

    /// Page number this client asked for (1 when the request left it unset).
    pub fn page_number(&self) -> u32 {
        self.number
    }

    /// `false` when the response carried no page metadata or `total_pages` is reached.
    pub fn has_next_page(&self) -> bool {
        self.page
            .meta
            .is_some_and(|meta| meta.has_next_page() && self.number < meta.total_pages)
    }

    /// Fetch the following page, or `None` without any request when this is the last one.
    pub async fn next_page(&self) -> Result<Option<Paginated<'c, T>>, TelnyxError> {
        let Some(meta) = self.page.meta.filter(|_| self.has_next_page()) else {
            return Ok(None);
        };
        let next_number = self.number + 1;
        tracing::debug!(
            path = self.request.template(),
            page = next_number,
            total_pages = meta.total_pages,
            "fetching next page"
        );
        let request = self.request.with_page_number(next_number);
        self.client.send_page(request).await.map(Some)
    }

    /// Walk this page and every following one, returning all items in page order.
    pub async fn collect_all(self) -> Result<Vec<T>, TelnyxError> {
        let mut items = Vec::new();
        let mut current = self;
        loop {
            let next = current.next_page().await?;
            items.extend(current.page.data);
            match next {
                Some(page) => current = page,
                None => return Ok(items),
            }
        }
    }
}
