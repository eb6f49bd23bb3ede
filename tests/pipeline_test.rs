//! Input-role pipeline tests against mock upstreams.

use axum::http::StatusCode;
use temperature_by_cep::lifecycle::{build_router, Role};
use temperature_by_cep::TemperatureResult;

mod common;

#[tokio::test]
async fn test_invalid_codes_rejected_without_outbound_calls() {
    let postal = common::start_mock_upstream(200, common::VIACEP_SAO_PAULO).await;
    let weather = common::start_mock_upstream(200, common::WEATHER_25C).await;
    let (_provider, _exporter, tracer) = common::recording_tracer();
    let router = build_router(
        Role::Input,
        &common::input_config(&postal.url(), &weather.url()),
        tracer,
    )
    .unwrap();

    let bodies = [
        r#"{"cep": "0100100"}"#,
        r#"{"cep": "010010000"}"#,
        r#"{"cep": "0100100a"}"#,
        r#"{"cep": "01001-00"}"#,
        r#"{"cep": ""}"#,
        r#"{"cep": 1001000}"#,
        r#"{"zipcode": "01001000"}"#,
        r#"not json"#,
        "",
    ];
    for body in bodies {
        let (status, text) = common::post_json(router.clone(), "/v1/temperature", body, &[]).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body:?}");
        assert_eq!(text, "invalid zipcode");
    }

    assert_eq!(postal.calls(), 0);
    assert_eq!(weather.calls(), 0);
}

#[tokio::test]
async fn test_unknown_code_is_404_and_skips_weather() {
    let postal = common::start_mock_upstream(200, common::VIACEP_NOT_FOUND).await;
    let weather = common::start_mock_upstream(200, common::WEATHER_25C).await;
    let (_provider, _exporter, tracer) = common::recording_tracer();
    let router = build_router(
        Role::Input,
        &common::input_config(&postal.url(), &weather.url()),
        tracer,
    )
    .unwrap();

    let (status, text) =
        common::post_json(router, "/v1/temperature", r#"{"cep": "99999999"}"#, &[]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text, "can not find zipcode");
    assert_eq!(postal.calls(), 1);
    assert_eq!(weather.calls(), 0);
}

#[tokio::test]
async fn test_textual_not_found_flag_is_404() {
    let postal = common::start_mock_upstream(200, r#"{"erro": "true"}"#).await;
    let weather = common::start_mock_upstream(200, common::WEATHER_25C).await;
    let (_provider, _exporter, tracer) = common::recording_tracer();
    let router = build_router(
        Role::Input,
        &common::input_config(&postal.url(), &weather.url()),
        tracer,
    )
    .unwrap();

    let (status, _) = common::post_json(router, "/v1/temperature", r#"{"cep": "99999999"}"#, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(weather.calls(), 0);
}

#[tokio::test]
async fn test_successful_chain_converts_temperature() {
    let postal = common::start_mock_upstream(200, common::VIACEP_SAO_PAULO).await;
    let weather = common::start_mock_upstream(200, common::WEATHER_25C).await;
    let (_provider, _exporter, tracer) = common::recording_tracer();
    let router = build_router(
        Role::Input,
        &common::input_config(&postal.url(), &weather.url()),
        tracer,
    )
    .unwrap();

    let (status, text) =
        common::post_json(router, "/v1/temperature", r#"{"cep": "01001000"}"#, &[]).await;
    assert_eq!(status, StatusCode::OK, "body: {text}");

    let result: TemperatureResult = serde_json::from_str(&text).unwrap();
    assert_eq!(result.city, "São Paulo");
    assert_eq!(result.celsius, 25.0);
    assert_eq!(result.fahrenheit, 77.0);
    assert_eq!(result.kelvin, 298.15);

    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    for key in ["city", "temp_C", "temp_F", "temp_K"] {
        assert!(raw.get(key).is_some(), "missing {key}");
    }

    let postal_calls = postal.recorded();
    assert_eq!(postal_calls[0].method, "GET");
    assert_eq!(postal_calls[0].path, "/ws/01001000/json/");

    let weather_calls = weather.recorded();
    assert_eq!(weather_calls.len(), 1);
    assert_eq!(weather_calls[0].method, "POST");
    assert_eq!(weather_calls[0].path, "/v1/weather");
    let sent: serde_json::Value = serde_json::from_slice(&weather_calls[0].body).unwrap();
    assert_eq!(sent["city"], "São Paulo");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_provider, _exporter, tracer) = common::recording_tracer();
    let router = build_router(
        Role::Input,
        &common::input_config("http://127.0.0.1:9", "http://127.0.0.1:9"),
        tracer,
    )
    .unwrap();

    use tower::ServiceExt;
    let response = router
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
