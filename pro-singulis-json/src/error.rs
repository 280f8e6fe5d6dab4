use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("JSON value does not have the expected structure: {0}")]
    Decode(#[source] serde_json::Error),
}

// well-formed JSON of the wrong structure is a decode failure, anything else a
// parse failure
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            Error::Decode(err)
        } else {
            Error::Parse(err)
        }
    }
}
