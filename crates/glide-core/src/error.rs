use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The bound selection store could not be read or written.
    #[error("selection store error: {0}")]
    Store(String),

    /// A host collaborator the component cannot run without was not supplied.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("component '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("no component registered under '{0}'")]
    UnknownComponent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
