//! Writing S-expressions.
//!
//! - [`stream`] - byte sink with column tracking and a base64 channel
//! - [`printer`] - canonical, advanced and transport emitters

pub mod printer;
pub mod stream;

pub use printer::{
    to_advanced, to_canonical, to_transport, write_advanced, write_canonical, write_transport,
};
pub use stream::{OutputStream, DEFAULT_LINE_LENGTH};
