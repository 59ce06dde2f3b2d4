use thiserror::Error;

use crate::model::{MalformedContent, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedContent),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
