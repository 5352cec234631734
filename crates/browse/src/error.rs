#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Catalog API error: {0}")]
    Api(#[from] metflix_api::error::Error),

    #[error("Invalid application page: {0}")]
    InvalidPage(u32),
}
