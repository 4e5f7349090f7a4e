//! Document store

use shared::{Document, DocumentFilterPatch, DocumentFilters, NewDocument};

use super::{Entity, EntityStore, FetchOutcome, StoreMessages, StoreResult};
use crate::client::{HttpClient, NetworkHttpClient};

impl Entity for Document {
    type Input = NewDocument;
    type Filter = DocumentFilters;

    const RESOURCE: &'static str = "documents";

    const MESSAGES: StoreMessages = StoreMessages {
        fetch_list: "Failed to load documents",
        fetch_one: "Failed to load document",
        create: "Failed to create document",
        update: "Failed to update document",
        delete: "Failed to delete document",
    };
}

/// Store of document records
pub type DocumentStore<C = NetworkHttpClient> = EntityStore<Document, C>;

impl<C: HttpClient> EntityStore<Document, C> {
    /// Load one page of documents narrowed server-side by `filters`
    pub async fn fetch_documents(
        &self,
        page: u32,
        limit: u32,
        filters: DocumentFilters,
    ) -> StoreResult<FetchOutcome> {
        self.fetch_list(page, limit, filters).await
    }

    /// Loaded documents matching the stored filters (current page only)
    pub fn filtered_documents(&self) -> Vec<Document> {
        self.filtered_items()
    }

    /// Merge a partial filter update into the stored filters.
    ///
    /// Takes effect locally right away and on the server with the next fetch.
    pub fn set_filters(&self, patch: DocumentFilterPatch) {
        self.update_filters(|filters| filters.merge(patch));
    }

    pub fn clear_filters(&self) {
        self.update_filters(|filters| *filters = DocumentFilters::default());
    }
}
