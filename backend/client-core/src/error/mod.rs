pub mod api;
pub mod config;
pub mod session;
pub mod token_store;
pub mod validation;

pub use api::ApiError;
pub use config::ConfigError;
pub use session::SessionError;
pub use token_store::TokenStoreError;
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] api::ApiError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Session(#[from] session::SessionError),

    #[error(transparent)]
    TokenStore(#[from] token_store::TokenStoreError),

    #[error(transparent)]
    Validation(#[from] validation::ValidationError),
}
