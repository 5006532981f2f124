//! Wire fixture scenarios for the payload model.

use std::collections::BTreeMap;

use serde_json::json;

use cast_sender::payload::{self, media, multizone, receiver};

#[test]
fn receiver_status_fixture_decodes() {
    let fixture = json!({
        "type": "RECEIVER_STATUS",
        "requestId": 3591,
        "status": {
            "volume": {
                "level": 0.55,
                "muted": true,
                "stepInterval": 0.01,
                "controlType": "ATTENUATION"
            },
            "applications": [{
                "appId": "appId",
                "displayName": "appName",
                "iconUrl": "iconURL",
                "isIdleScreen": true,
                "launchedFromCloud": false,
                "namespaces": [
                    { "name": "some.name.space" },
                    { "name": "some.other.name.space" }
                ],
                "sessionId": "jkl34d",
                "statusText": "single",
                "transportId": "55",
                "universalAppId": "universalAppId"
            }],
            "isActiveInput": false,
            "isStandBy": true
        }
    });
    let response =
        payload::Response::parse(receiver::NAMESPACE, &fixture.to_string()).unwrap();
    assert_eq!(response.request_id(), 3591);
    let status = match &response {
        payload::Response::Receiver(receiver::Response::ReceiverStatus { status, .. }) => status,
        other => panic!("unexpected response: {:?}", other),
    };
    assert_eq!(status.volume.level, Some(0.55));
    assert_eq!(status.volume.muted, Some(true));
    assert_eq!(status.volume.step_interval, Some(0.01));
    assert_eq!(
        status.volume.control_type,
        Some(receiver::VolumeControlType::Attenuation)
    );
    assert!(status.is_stand_by);
    assert!(!status.is_active_input);
    let app = &status.applications[0];
    assert_eq!(app.namespaces.len(), 2);
    assert_eq!(app.transport_id, "55");
    assert_eq!(app.session_id, "jkl34d");
    assert!(app.is_idle_screen);
    assert!(!app.launched_from_cloud);
    assert_eq!(app.universal_app_id.as_deref(), Some("universalAppId"));

    // Re-encoding and decoding yields the same value.
    let encoded = match &response {
        payload::Response::Receiver(inner) => serde_json::to_string(inner).unwrap(),
        other => panic!("unexpected response: {:?}", other),
    };
    let again = payload::Response::parse(receiver::NAMESPACE, &encoded).unwrap();
    assert_eq!(again, response);
}

#[test]
fn app_availability_round_trips_every_entry() {
    let mut availability = BTreeMap::new();
    availability.insert("key1".to_owned(), "value1".to_owned());
    availability.insert("key2".to_owned(), "value2".to_owned());
    availability.insert("key3".to_owned(), "value3".to_owned());
    let response = receiver::Response::AppAvailability {
        request_id: 22391,
        availability: availability.clone(),
    };

    let encoded = serde_json::to_string(&response).unwrap();
    let decoded: receiver::Response = serde_json::from_str(&encoded).unwrap();
    match decoded {
        receiver::Response::AppAvailability {
            request_id,
            availability: decoded_map,
        } => {
            assert_eq!(request_id, 22391);
            assert_eq!(decoded_map, availability);
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn multizone_status_accepts_renamed_discriminator() {
    let fixture = json!({
        "responseType": "MULTIZONE_STATUS",
        "requestId": 0,
        "status": {
            "devices": [{
                "capabilities": 196612,
                "deviceId": "a1b2c3",
                "name": "Living Room speaker",
                "volume": { "level": 0.35, "muted": false }
            }],
            "isMultichannel": false
        }
    });
    let response =
        payload::Response::parse(multizone::NAMESPACE, &fixture.to_string()).unwrap();
    match response {
        payload::Response::Multizone(multizone::Response::MultizoneStatus {
            status, ..
        }) => {
            assert_eq!(status.devices.len(), 1);
            let device = &status.devices[0];
            assert_eq!(device.name, "Living Room speaker");
            assert_eq!(device.capabilities, 196_612);
            assert!(device.volume.is_some());
            assert!(!status.is_multichannel);
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn invalid_request_error_round_trips() {
    let response = media::Response::InvalidRequest {
        request_id: 442,
        reason: Some("INVALID_COMMAND".to_owned()),
    };
    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded["type"], "INVALID_REQUEST");
    assert_eq!(encoded["requestId"], 442);
    assert_eq!(encoded["reason"], "INVALID_COMMAND");

    let decoded: media::Response = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn media_status_accepts_object_array_or_absent() {
    let single = json!({
        "responseType": "MEDIA_STATUS",
        "requestId": 1,
        "status": { "mediaSessionId": 1, "playerState": "PLAYING", "currentTime": 1.5 }
    });
    let response = payload::Response::parse(media::NAMESPACE, &single.to_string()).unwrap();
    match response {
        payload::Response::Media(media::Response::MediaStatus { status, .. }) => {
            assert_eq!(status.len(), 1);
            assert_eq!(status[0].player_state, Some(media::PlayerState::Playing));
        }
        other => panic!("unexpected response: {:?}", other),
    }

    let array = json!({
        "responseType": "MEDIA_STATUS",
        "requestId": 1,
        "status": [
            { "mediaSessionId": 1, "playerState": "PLAYING", "currentTime": 1.5 },
            { "mediaSessionId": 2, "playerState": "IDLE", "idleReason": "FINISHED", "currentTime": 0.0 }
        ]
    });
    let response = payload::Response::parse(media::NAMESPACE, &array.to_string()).unwrap();
    match response {
        payload::Response::Media(media::Response::MediaStatus { status, .. }) => {
            assert_eq!(status.len(), 2);
            assert_eq!(status[1].idle_reason, Some(media::IdleReason::Finished));
        }
        other => panic!("unexpected response: {:?}", other),
    }

    let absent = json!({ "responseType": "MEDIA_STATUS", "requestId": 1 });
    let response = payload::Response::parse(media::NAMESPACE, &absent.to_string()).unwrap();
    match response {
        payload::Response::Media(media::Response::MediaStatus { status, request_id }) => {
            assert_eq!(request_id, 1);
            assert!(status.is_empty());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn unknown_media_response_still_correlates() {
    let fixture = json!({
        "responseType": "QUEUE_CHANGE",
        "requestId": 77,
        "changeType": "ITEMS_INSERTED"
    });
    let response = payload::Response::parse(media::NAMESPACE, &fixture.to_string()).unwrap();
    assert_eq!(response.request_id(), 77);
    match response {
        payload::Response::Media(media::Response::Unknown { response_type, .. }) => {
            assert_eq!(response_type, "QUEUE_CHANGE");
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

mod roundtrip {
    use proptest::prelude::*;

    use cast_sender::payload::{media, receiver};

    fn player_state() -> impl Strategy<Value = Option<media::PlayerState>> {
        prop_oneof![
            Just(None),
            Just(Some(media::PlayerState::Idle)),
            Just(Some(media::PlayerState::Playing)),
            Just(Some(media::PlayerState::Paused)),
            Just(Some(media::PlayerState::Buffering)),
        ]
    }

    proptest! {
        #[test]
        fn media_status_survives_encode_decode(
            media_session_id in 1_i64..10_000,
            playback_rate in 0.25_f64..4.0,
            current_time in 0.0_f64..86_400.0,
            supported_media_commands in 0_u64..(1 << 20),
            player_state in player_state(),
            request_id in 1_u64..100_000,
        ) {
            let status = media::MediaStatus {
                media_session_id,
                media: None,
                playback_rate,
                player_state,
                idle_reason: None,
                current_time,
                supported_media_commands,
                volume: None,
                queue_data: None,
                extended_status: None,
                custom_data: None,
            };
            let response = media::Response::MediaStatus {
                request_id,
                status: vec![status],
            };
            let encoded = serde_json::to_string(&response).unwrap();
            let decoded: media::Response = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(decoded, response);
        }

        #[test]
        fn volume_survives_encode_decode(
            level in proptest::option::of(0.0_f64..1.0),
            muted in proptest::option::of(proptest::bool::ANY),
            step_interval in proptest::option::of(0.001_f64..0.5),
        ) {
            let volume = receiver::Volume {
                level,
                muted,
                step_interval,
                control_type: Some(receiver::VolumeControlType::Master),
            };
            let encoded = serde_json::to_string(&volume).unwrap();
            let decoded: receiver::Volume = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(decoded, volume);
        }
    }
}
