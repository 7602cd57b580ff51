/// Store-layer errors for the persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("store backend error: {message}")]
    Backend { message: String },
}
