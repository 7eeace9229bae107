use crate::entry::Label;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("cannot display menu with zero entries")]
    EmptyMenu,
    #[error("invalid menu style: {0}")]
    InvalidStyle(String),
    #[error("action '{label}' failed")]
    Action {
        label: Label,
        #[source]
        source: anyhow::Error,
    },
}
