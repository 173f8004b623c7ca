//! Monitor channel: WebSocket transport for server-pushed scraping events.
mod channel;
mod decode;
mod endpoint;
mod types;

pub use channel::ChannelHandle;
pub use decode::{decode_frame, DecodeError};
pub use endpoint::{channel_endpoint, EndpointError};
pub use types::{LinkEvent, WireEvent};
