//! The media channel controls playback inside a launched application.

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use super::NamedEnum;
use crate::payload::receiver::Volume;

pub const NAMESPACE: &str = "urn:x-cast:com.google.cast.media";

const MESSAGE_TYPE_MEDIA_STATUS: &str = "MEDIA_STATUS";
const MESSAGE_TYPE_LOAD_CANCELLED: &str = "LOAD_CANCELLED";
const MESSAGE_TYPE_LOAD_FAILED: &str = "LOAD_FAILED";
const MESSAGE_TYPE_INVALID_PLAYER_STATE: &str = "INVALID_PLAYER_STATE";
const MESSAGE_TYPE_INVALID_REQUEST: &str = "INVALID_REQUEST";
const MESSAGE_TYPE_ERROR: &str = "ERROR";

const METADATA_TYPE_MUSIC_TRACK: u32 = 3;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    Load {
        session_id: String,
        media: MediaInformation,
        #[serde(skip_serializing_if = "Option::is_none")]
        autoplay: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        current_time: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        active_track_ids: Option<Vec<i64>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        credentials: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        playback_rate: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        queue_data: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_data: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    Play {
        media_session_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_data: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    Pause {
        media_session_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_data: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    Stop {
        media_session_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_data: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    Seek {
        media_session_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        resume_state: Option<ResumeState>,
        #[serde(skip_serializing_if = "Option::is_none")]
        current_time: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_data: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    GetStatus {
        #[serde(skip_serializing_if = "Option::is_none")]
        media_session_id: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The receiver reports media status as a single object, an array, or
    /// not at all. All three normalize to a list.
    MediaStatus {
        request_id: u64,
        status: Vec<MediaStatus>,
    },
    LoadCancelled {
        request_id: u64,
    },
    LoadFailed {
        request_id: u64,
    },
    InvalidPlayerState {
        request_id: u64,
    },
    InvalidRequest {
        request_id: u64,
        reason: Option<String>,
    },
    Error {
        request_id: u64,
        reason: Option<String>,
        detailed_error_code: Option<i64>,
        item_id: Option<i64>,
    },
    Unknown {
        request_id: u64,
        response_type: String,
        payload: Value,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    #[serde(default, deserialize_with = "super::lenient_request_id")]
    request_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detailed_error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_id: Option<i64>,
}

impl Response {
    pub fn request_id(&self) -> u64 {
        match self {
            Response::MediaStatus { request_id, .. }
            | Response::LoadCancelled { request_id }
            | Response::LoadFailed { request_id }
            | Response::InvalidPlayerState { request_id }
            | Response::InvalidRequest { request_id, .. }
            | Response::Error { request_id, .. }
            | Response::Unknown { request_id, .. } => *request_id,
        }
    }

    fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        let tag = super::discriminator(&value).unwrap_or("").to_owned();
        let response = match tag.as_str() {
            MESSAGE_TYPE_MEDIA_STATUS => Response::MediaStatus {
                request_id: super::raw_request_id(&value),
                status: status_list(&mut value)?,
            },
            MESSAGE_TYPE_LOAD_CANCELLED => Response::LoadCancelled {
                request_id: super::raw_request_id(&value),
            },
            MESSAGE_TYPE_LOAD_FAILED => Response::LoadFailed {
                request_id: super::raw_request_id(&value),
            },
            MESSAGE_TYPE_INVALID_PLAYER_STATE => Response::InvalidPlayerState {
                request_id: super::raw_request_id(&value),
            },
            MESSAGE_TYPE_INVALID_REQUEST => {
                let payload: ErrorPayload = serde_json::from_value(value)?;
                Response::InvalidRequest {
                    request_id: payload.request_id,
                    reason: payload.reason,
                }
            }
            MESSAGE_TYPE_ERROR => {
                let payload: ErrorPayload = serde_json::from_value(value)?;
                Response::Error {
                    request_id: payload.request_id,
                    reason: payload.reason,
                    detailed_error_code: payload.detailed_error_code,
                    item_id: payload.item_id,
                }
            }
            _ => Response::Unknown {
                request_id: super::raw_request_id(&value),
                response_type: tag,
                payload: value,
            },
        };
        Ok(response)
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        let value = match self {
            Response::MediaStatus { request_id, status } => serde_json::json!({
                "type": MESSAGE_TYPE_MEDIA_STATUS,
                "requestId": request_id,
                "status": serde_json::to_value(status)?,
            }),
            Response::LoadCancelled { request_id } => serde_json::json!({
                "type": MESSAGE_TYPE_LOAD_CANCELLED,
                "requestId": request_id,
            }),
            Response::LoadFailed { request_id } => serde_json::json!({
                "type": MESSAGE_TYPE_LOAD_FAILED,
                "requestId": request_id,
            }),
            Response::InvalidPlayerState { request_id } => serde_json::json!({
                "type": MESSAGE_TYPE_INVALID_PLAYER_STATE,
                "requestId": request_id,
            }),
            Response::InvalidRequest { request_id, reason } => super::tagged(
                MESSAGE_TYPE_INVALID_REQUEST,
                serde_json::to_value(ErrorPayload {
                    request_id: *request_id,
                    reason: reason.clone(),
                    detailed_error_code: None,
                    item_id: None,
                })?,
            ),
            Response::Error {
                request_id,
                reason,
                detailed_error_code,
                item_id,
            } => super::tagged(
                MESSAGE_TYPE_ERROR,
                serde_json::to_value(ErrorPayload {
                    request_id: *request_id,
                    reason: reason.clone(),
                    detailed_error_code: *detailed_error_code,
                    item_id: *item_id,
                })?,
            ),
            Response::Unknown { payload, .. } => payload.clone(),
        };
        Ok(value)
    }
}

/// Normalize the `status` field: single object, array, or absent.
fn status_list(value: &mut Value) -> Result<Vec<MediaStatus>, serde_json::Error> {
    match value.get_mut("status").map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<MediaStatus>, _>>(),
        Some(entry) => Ok(vec![serde_json::from_value(entry)?]),
    }
}

impl serde::Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = self.to_value().map_err(serde::ser::Error::custom)?;
        serde::Serialize::serialize(&value, serializer)
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

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaInformation {
    pub content_id: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::lenient_enum"
    )]
    pub stream_type: Option<StreamType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
}

impl MediaInformation {
    /// A buffered stream at `url` with the given MIME type.
    pub fn buffered<T: Into<String>, U: Into<String>>(content_id: T, content_type: U) -> Self {
        MediaInformation {
            content_id: content_id.into(),
            content_type: content_type.into(),
            stream_type: Some(StreamType::Buffered),
            duration: None,
            metadata: None,
            tracks: Vec::new(),
            custom_data: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamType {
    None,
    Buffered,
    Live,
}

impl NamedEnum for StreamType {
    fn parse_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "NONE" => Some(StreamType::None),
            "BUFFERED" => Some(StreamType::Buffered),
            "LIVE" => Some(StreamType::Live),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub metadata_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<u32>,
}

impl MediaMetadata {
    pub fn music_default() -> Self {
        MediaMetadata {
            metadata_type: METADATA_TYPE_MUSIC_TRACK,
            ..MediaMetadata::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track_id: i64,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::lenient_enum"
    )]
    pub track_type: Option<TrackType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_content_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackType {
    Text,
    Audio,
    Video,
}

impl NamedEnum for TrackType {
    fn parse_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "TEXT" => Some(TrackType::Text),
            "AUDIO" => Some(TrackType::Audio),
            "VIDEO" => Some(TrackType::Video),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResumeState {
    PlaybackStart,
    PlaybackPause,
}

impl NamedEnum for ResumeState {
    fn parse_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "PLAYBACK_START" => Some(ResumeState::PlaybackStart),
            "PLAYBACK_PAUSE" => Some(ResumeState::PlaybackPause),
            _ => None,
        }
    }
}

fn default_playback_rate() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaStatus {
    pub media_session_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaInformation>,
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::lenient_enum"
    )]
    pub player_state: Option<PlayerState>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::lenient_enum"
    )]
    pub idle_reason: Option<IdleReason>,
    #[serde(default)]
    pub current_time: f64,
    #[serde(default)]
    pub supported_media_commands: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
}

impl MediaStatus {
    /// Decompose the `supportedMediaCommands` bitmask. Unknown bits are
    /// ignored.
    pub fn supported_commands(&self) -> Vec<MediaCommand> {
        MediaCommand::decompose(self.supported_media_commands)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    Idle,
    Playing,
    Paused,
    Buffering,
}

impl NamedEnum for PlayerState {
    fn parse_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "IDLE" => Some(PlayerState::Idle),
            "PLAYING" => Some(PlayerState::Playing),
            "PAUSED" => Some(PlayerState::Paused),
            "BUFFERING" => Some(PlayerState::Buffering),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdleReason {
    Cancelled,
    Interrupted,
    Finished,
    Error,
    Completed,
}

impl NamedEnum for IdleReason {
    fn parse_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "CANCELLED" => Some(IdleReason::Cancelled),
            "INTERRUPTED" => Some(IdleReason::Interrupted),
            "FINISHED" => Some(IdleReason::Finished),
            "ERROR" => Some(IdleReason::Error),
            "COMPLETED" => Some(IdleReason::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCommand {
    Pause,
    Seek,
    StreamVolume,
    StreamMute,
    SkipForward,
    SkipBackward,
    QueueNext,
    QueuePrev,
    QueueShuffle,
    SkipAd,
    QueueRepeatAll,
    QueueRepeatOne,
    EditTracks,
    PlaybackRate,
    Like,
    Dislike,
    Follow,
    Unfollow,
}

impl MediaCommand {
    const ALL: [MediaCommand; 18] = [
        MediaCommand::Pause,
        MediaCommand::Seek,
        MediaCommand::StreamVolume,
        MediaCommand::StreamMute,
        MediaCommand::SkipForward,
        MediaCommand::SkipBackward,
        MediaCommand::QueueNext,
        MediaCommand::QueuePrev,
        MediaCommand::QueueShuffle,
        MediaCommand::SkipAd,
        MediaCommand::QueueRepeatAll,
        MediaCommand::QueueRepeatOne,
        MediaCommand::EditTracks,
        MediaCommand::PlaybackRate,
        MediaCommand::Like,
        MediaCommand::Dislike,
        MediaCommand::Follow,
        MediaCommand::Unfollow,
    ];

    pub fn mask(self) -> u64 {
        match self {
            MediaCommand::Pause => 1,
            MediaCommand::Seek => 1 << 1,
            MediaCommand::StreamVolume => 1 << 2,
            MediaCommand::StreamMute => 1 << 3,
            MediaCommand::SkipForward => 1 << 4,
            MediaCommand::SkipBackward => 1 << 5,
            MediaCommand::QueueNext => 1 << 6,
            MediaCommand::QueuePrev => 1 << 7,
            MediaCommand::QueueShuffle => 1 << 8,
            MediaCommand::SkipAd => 1 << 9,
            MediaCommand::QueueRepeatAll => 1 << 10,
            MediaCommand::QueueRepeatOne => 1 << 11,
            MediaCommand::EditTracks => 1 << 12,
            MediaCommand::PlaybackRate => 1 << 13,
            MediaCommand::Like => 1 << 14,
            MediaCommand::Dislike => 1 << 15,
            MediaCommand::Follow => 1 << 16,
            MediaCommand::Unfollow => 1 << 17,
        }
    }

    pub fn decompose(mask: u64) -> Vec<MediaCommand> {
        MediaCommand::ALL
            .iter()
            .copied()
            .filter(|command| mask & command.mask() != 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_omits_unset_optional_fields() {
        let request = Request::Load {
            session_id: "jkl34d".to_owned(),
            media: MediaInformation::buffered("http://host/track.mp3", "audio/mpeg"),
            autoplay: None,
            current_time: None,
            active_track_ids: None,
            credentials: None,
            playback_rate: None,
            queue_data: None,
            custom_data: None,
        };
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "type": "LOAD",
                "sessionId": "jkl34d",
                "media": {
                    "contentId": "http://host/track.mp3",
                    "contentType": "audio/mpeg",
                    "streamType": "BUFFERED",
                },
            })
        );
    }

    #[test]
    fn seek_serializes_resume_state_name() {
        let request = Request::Seek {
            media_session_id: 7,
            resume_state: Some(ResumeState::PlaybackStart),
            current_time: Some(31.5),
            custom_data: None,
        };
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "type": "SEEK",
                "mediaSessionId": 7,
                "resumeState": "PLAYBACK_START",
                "currentTime": 31.5,
            })
        );
    }

    #[test]
    fn unknown_player_state_parses_as_absent() {
        let status: MediaStatus = serde_json::from_str(
            r#"{"mediaSessionId":1,"playerState":"DREAMING","currentTime":2.0}"#,
        )
        .unwrap();
        assert_eq!(status.player_state, None);
        assert_eq!(status.playback_rate, 1.0);
    }

    #[test]
    fn supported_commands_ignore_unknown_bits() {
        let status: MediaStatus = serde_json::from_str(
            r#"{"mediaSessionId":1,"supportedMediaCommands":274877906947}"#,
        )
        .unwrap();
        let commands = status.supported_commands();
        assert!(commands.contains(&MediaCommand::Pause));
        assert!(commands.contains(&MediaCommand::Seek));
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn error_response_round_trips_detail_fields() {
        let response = Response::Error {
            request_id: 99,
            reason: Some("APP_ERROR".to_owned()),
            detailed_error_code: Some(104),
            item_id: Some(3),
        };
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: Response = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
    }
}
