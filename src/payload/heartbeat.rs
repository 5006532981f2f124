//! The heartbeat channel keeps the transport alive with PING/PONG.

use serde_derive::Serialize;
use serde_json::Value;

pub const NAMESPACE: &str = "urn:x-cast:com.google.cast.tp.heartbeat";

const MESSAGE_TYPE_PING: &str = "PING";
const MESSAGE_TYPE_PONG: &str = "PONG";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    Ping,
    Pong,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ping,
    Pong,
    Unknown { response_type: String, payload: Value },
}

impl Response {
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tag = super::discriminator(&value).unwrap_or("").to_owned();
        let response = match tag.as_str() {
            MESSAGE_TYPE_PING => Response::Ping,
            MESSAGE_TYPE_PONG => Response::Pong,
            _ => Response::Unknown {
                response_type: tag,
                payload: value,
            },
        };
        Ok(response)
    }

    fn to_value(&self) -> Value {
        match self {
            Response::Ping => serde_json::json!({ "type": MESSAGE_TYPE_PING }),
            Response::Pong => serde_json::json!({ "type": MESSAGE_TYPE_PONG }),
            Response::Unknown { payload, .. } => payload.clone(),
        }
    }
}

impl serde::Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_value(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Response::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_serializes_with_canonical_tag() {
        let payload = serde_json::to_string(&Request::Ping).unwrap();
        assert_eq!(payload, r#"{"type":"PING"}"#);
    }

    #[test]
    fn pong_parses_from_either_discriminator() {
        let by_type: Response = serde_json::from_str(r#"{"type":"PONG"}"#).unwrap();
        let by_response_type: Response =
            serde_json::from_str(r#"{"responseType":"PONG"}"#).unwrap();
        assert_eq!(by_type, Response::Pong);
        assert_eq!(by_response_type, Response::Pong);
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let response: Response = serde_json::from_str(r#"{"type":"HEARTBEAT_V2"}"#).unwrap();
        match response {
            Response::Unknown { response_type, .. } => assert_eq!(response_type, "HEARTBEAT_V2"),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
