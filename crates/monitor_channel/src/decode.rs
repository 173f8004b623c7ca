use serde::Deserialize;
use serde_json::Value;

use crate::WireEvent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {message}")]
    InvalidJson { message: String },
    #[error("frame has no string `type` discriminator")]
    MissingDiscriminator,
    #[error("bad `{kind}` payload: {message}")]
    BadPayload { kind: String, message: String },
}

#[derive(Debug, Deserialize)]
struct ProgressPayload {
    current: f64,
    total: f64,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletePayload {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

/// Decode one UTF-8 text frame into a [`WireEvent`].
///
/// The discriminator is read first so an unrecognized `type` comes back as
/// `WireEvent::Unknown` rather than an error; only known tags get their
/// payload shape enforced.
pub fn decode_frame(frame: &str) -> Result<WireEvent, DecodeError> {
    let value: Value = serde_json::from_str(frame).map_err(|err| DecodeError::InvalidJson {
        message: err.to_string(),
    })?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingDiscriminator)?
        .to_string();

    match kind.as_str() {
        "scraping_progress" => {
            let payload: ProgressPayload = payload_from(&kind, value)?;
            Ok(WireEvent::Progress {
                current: payload.current,
                total: payload.total,
                message: payload.message,
            })
        }
        "scraping_complete" => {
            let payload: CompletePayload = payload_from(&kind, value)?;
            Ok(WireEvent::Complete {
                count: payload.count,
            })
        }
        "error" => {
            let payload: ErrorPayload = payload_from(&kind, value)?;
            Ok(WireEvent::ServerError {
                message: payload.message,
            })
        }
        _ => Ok(WireEvent::Unknown { kind }),
    }
}

fn payload_from<T: serde::de::DeserializeOwned>(
    kind: &str,
    value: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|err| DecodeError::BadPayload {
        kind: kind.to_string(),
        message: err.to_string(),
    })
}
