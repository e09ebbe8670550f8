use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("logging could not be initialized: {_0}")]
    Logging(#[error(not(source))] String),
    #[display("store operation failed")]
    Store,
    #[display("could not write output")]
    Output,
}
