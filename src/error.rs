// none of these are recoverable inside the engine; retransmission keeps
// running regardless of what a caller does with a returned error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("would block: no complete message ready")]
    WouldBlock,

    #[error("buffer too small: need {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("message requires {0} fragments, limit is 255")]
    FragmentOverflow(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
