mod error;
mod kcp;
mod output;
mod segment;
mod seq;

pub use error::{Error, Result};
pub use kcp::Kcp;
pub use output::Output;
pub use segment::{Segment, CMD_ACK, CMD_PUSH, CMD_WASK, CMD_WINS, HEADER_SIZE};
