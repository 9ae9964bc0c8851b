use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("failed to read scene file {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse scene")]
  Parse(#[from] serde_yaml::Error),

  #[error("invalid parameter `{name}`: {reason}")]
  InvalidParameter { name: String, reason: String },

  #[error("invalid body `{body}`: {reason}")]
  InvalidBody { body: String, reason: String },

  #[error("duplicate body name `{0}`")]
  DuplicateBody(String),

  #[error("bodies `{first}` and `{second}` start at the same position")]
  CoincidentBodies { first: String, second: String },

  #[error("invalid distribution parameters")]
  Distribution(#[from] rand_distr::NormalError),
}
