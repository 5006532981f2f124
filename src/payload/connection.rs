//! The connection channel manages virtual connections to cast transports.

use serde_derive::Serialize;
use serde_json::Value;

pub const NAMESPACE: &str = "urn:x-cast:com.google.cast.tp.connection";

/// Reason code sent with CLOSE: closed gracefully by the sender.
pub(crate) const CLOSE_REASON_GRACEFUL: i64 = 5;

const MESSAGE_TYPE_CONNECT: &str = "CONNECT";
const MESSAGE_TYPE_CLOSE: &str = "CLOSE";

/// The `origin` field of CONNECT. The receivers require the key to be
/// present and serialized as `{}`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Strong,
    Weak,
    Invisible,
}

impl ConnectionType {
    pub fn code(self) -> u8 {
        match self {
            ConnectionType::Strong => 0,
            ConnectionType::Weak => 1,
            ConnectionType::Invisible => 2,
        }
    }

    pub fn parse_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ConnectionType::Strong),
            1 => Some(ConnectionType::Weak),
            2 => Some(ConnectionType::Invisible),
            _ => None,
        }
    }
}

impl serde::Serialize for ConnectionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    Connect {
        origin: Origin,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_agent: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        conn_type: Option<ConnectionType>,
    },
    #[serde(rename_all = "camelCase")]
    Close { reason_code: i64 },
}

impl Request {
    pub(crate) fn connect(user_agent: Option<String>, conn_type: Option<ConnectionType>) -> Self {
        Request::Connect {
            origin: Origin::default(),
            user_agent,
            conn_type,
        }
    }

    pub(crate) fn close() -> Self {
        Request::Close {
            reason_code: CLOSE_REASON_GRACEFUL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Close { reason_code: Option<i64> },
    Unknown { response_type: String, payload: Value },
}

impl Response {
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tag = super::discriminator(&value).unwrap_or("").to_owned();
        let response = match tag.as_str() {
            MESSAGE_TYPE_CLOSE => Response::Close {
                reason_code: value.get("reasonCode").and_then(Value::as_i64),
            },
            _ => Response::Unknown {
                response_type: tag,
                payload: value,
            },
        };
        Ok(response)
    }

    fn to_value(&self) -> Value {
        match self {
            Response::Close { reason_code } => match reason_code {
                Some(code) => {
                    serde_json::json!({ "type": MESSAGE_TYPE_CLOSE, "reasonCode": code })
                }
                None => serde_json::json!({ "type": MESSAGE_TYPE_CLOSE }),
            },
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
