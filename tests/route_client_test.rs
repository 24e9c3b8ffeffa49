//! Route client tests against a local directions endpoint

mod common;

use common::{heidelberg_route, spawn_provider, spawn_provider_with_delay, two_waypoints, TEST_KEY};
use pathx::{parse_waypoints, ErrorCode, ErrorKind, Profile, RouteClient, RouteConfig, RouteResult, Waypoint};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_single_waypoint_is_rejected_before_any_request() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;
    let client = provider.client();

    let err = client
        .compute_route(&[Waypoint::from([8.68, 49.41])], Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.code, ErrorCode::ValidationTooFewWaypoints);
    assert_eq!(provider.hits(), 0);
}

#[tokio::test]
async fn test_empty_waypoints_are_rejected() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;

    let err = provider
        .client()
        .compute_route(&[], Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(provider.hits(), 0);
}

#[tokio::test]
async fn test_out_of_range_waypoint_is_rejected() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;
    let waypoints = [Waypoint::from([8.68, 49.41]), Waypoint::from([200.0, 49.42])];

    let err = provider
        .client()
        .compute_route(&waypoints, Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationOutOfRange);
    assert_eq!(provider.hits(), 0);
}

#[tokio::test]
async fn test_non_finite_waypoint_is_rejected() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;
    let waypoints = [Waypoint::from([8.68, 49.41]), Waypoint::from([f64::NAN, 49.42])];

    let err = provider
        .client()
        .compute_route(&waypoints, Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(provider.hits(), 0);
}

#[test]
fn test_raw_coordinate_shapes() {
    let err = parse_waypoints(&[json!([8.68, 49.41]), json!([8.69])]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationMalformedCoordinate);

    let err = parse_waypoints(&[json!([8.68, 49.41]), json!(["a", "b"])]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationNonNumeric);

    let waypoints = parse_waypoints(&[json!([8.68, 49.41]), json!([8.69, 49.42])]).unwrap();
    assert_eq!(waypoints[1], Waypoint::from([8.69, 49.42]));
}

#[tokio::test]
async fn test_missing_key_fails_without_request() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;
    let client = RouteClient::new(RouteConfig::default().base_url(&provider.base_url)).unwrap();

    let err = client
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.code, ErrorCode::ConfigMissingApiKey);
    assert_eq!(provider.hits(), 0);
}

#[tokio::test]
async fn test_blank_key_fails_without_request() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;

    for key in ["", "   "] {
        let client =
            RouteClient::new(RouteConfig::with_api_key(key).base_url(&provider.base_url)).unwrap();
        let err = client
            .compute_route(&two_waypoints(), Profile::DrivingCar)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    assert_eq!(provider.hits(), 0);
}

#[tokio::test]
async fn test_first_route_is_returned() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;

    let route = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap();

    assert_eq!(
        route,
        RouteResult {
            distance: 1500.0,
            duration: 300.0,
            geometry: vec![Waypoint::from([8.68, 49.41]), Waypoint::from([8.69, 49.42])],
        }
    );
    assert_eq!(provider.hits(), 1);
}

#[tokio::test]
async fn test_only_first_candidate_is_used() {
    let mut body = heidelberg_route();
    let mut second = body["features"][0].clone();
    second["properties"]["summary"] = json!({"distance": 9999, "duration": 9999});
    body["features"].as_array_mut().unwrap().push(second);
    let provider = spawn_provider(200, body.to_string()).await;

    let route = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap();

    assert_eq!(route.distance, 1500.0);
}

#[tokio::test]
async fn test_request_shape() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;

    provider
        .client()
        .compute_route(&two_waypoints(), Profile::FootWalking)
        .await
        .unwrap();

    let seen = provider.last_request().unwrap();
    assert_eq!(seen.profile, "foot-walking");
    assert_eq!(seen.authorization.as_deref(), Some(TEST_KEY));
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        seen.body,
        json!({
            "coordinates": [[8.681495, 49.41461], [8.687872, 49.420318]],
            "elevation": false,
            "instructions": false,
            "preference": "fastest",
            "units": "m"
        })
    );
}

#[tokio::test]
async fn test_empty_features_is_no_route() {
    let provider = spawn_provider(200, json!({"features": []}).to_string()).await;

    let err = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoRoute);
    assert_eq!(err.message, "No route found");
    assert_eq!(provider.hits(), 1);
}

#[tokio::test]
async fn test_missing_geometry_is_format_error() {
    let mut body = heidelberg_route();
    body["features"][0].as_object_mut().unwrap().remove("geometry");
    let provider = spawn_provider(200, body.to_string()).await;

    let err = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseFormat);
    assert!(err.message.contains("geometry"));
}

#[tokio::test]
async fn test_non_json_body_is_format_error() {
    let provider = spawn_provider(200, "<html>gateway</html>").await;

    let err = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseFormat);
}

#[tokio::test]
async fn test_error_status_carries_code_and_body() {
    let provider = spawn_provider(500, "server error").await;

    let err = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Request);
    assert_eq!(err.code, ErrorCode::RequestHttpStatus);
    assert_eq!(err.http_status, Some(500));
    assert!(err.message.contains("500"));
    assert!(err.message.contains("server error"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_client_error_status_is_not_retryable() {
    let body = json!({"error": {"code": 2010, "message": "Could not find routable point"}});
    let provider = spawn_provider(404, body.to_string()).await;

    let err = provider
        .client()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.http_status, Some(404));
    assert!(err.message.contains("Could not find routable point"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_repeated_calls_are_independent() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;
    let client = provider.client();

    let first = client
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap();
    let second = client
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.hits(), 2);
}

#[tokio::test]
async fn test_concurrent_calls() {
    let provider = spawn_provider(200, heidelberg_route().to_string()).await;
    let client = provider.client();

    let calls = (0..4).map(|_| {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .compute_route(&two_waypoints(), Profile::DrivingCar)
                .await
        })
    });

    for handle in calls.collect::<Vec<_>>() {
        assert_eq!(handle.await.unwrap().unwrap().distance, 1500.0);
    }
    assert_eq!(provider.hits(), 4);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let provider = spawn_provider_with_delay(
        200,
        heidelberg_route().to_string(),
        Duration::from_secs(3),
    )
    .await;
    let config = RouteConfig::with_api_key(TEST_KEY)
        .base_url(&provider.base_url)
        .timeout(Duration::from_millis(200));

    let err = RouteClient::new(config)
        .unwrap()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::RequestTimeout);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RouteConfig::with_api_key(TEST_KEY).base_url(format!("http://{}", addr));
    let err = RouteClient::new(config)
        .unwrap()
        .compute_route(&two_waypoints(), Profile::DrivingCar)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Request);
    assert_eq!(err.code, ErrorCode::RequestTransport);
}
