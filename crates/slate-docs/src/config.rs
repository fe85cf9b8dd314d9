/// Configuration for a document store backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocStoreConfig {
    /// Maximum number of times a transaction body is re-executed after a
    /// read-set conflict before the store gives up with
    /// [`DocError::Conflict`](crate::DocError::Conflict).
    pub max_tx_retries: u32,
}

impl Default for DocStoreConfig {
    fn default() -> Self {
        Self { max_tx_retries: 5 }
    }
}
