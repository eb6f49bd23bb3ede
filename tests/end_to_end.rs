//! Both roles running on real listeners, driven through the client SDK.

use std::time::Duration;
use temperature_by_cep::lifecycle::{build_router, Role, Shutdown};
use temperature_by_cep::observability::propagation::parse_trace_id;
use temperature_by_cep::HttpServer;
use temperature_client::{ServiceError, TemperatureClient};
use tokio::net::TcpListener;

mod common;

async fn spawn_role(role: Role, router: axum::Router, shutdown: &Shutdown) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(router, role.as_str());
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_chain_through_weather_service() {
    let viacep = common::start_mock_upstream(200, common::VIACEP_SAO_PAULO).await;
    let weatherapi = common::start_mock_upstream(200, r#"{"current": {"temp_c": 25.0}}"#).await;
    let (_provider, exporter, tracer) = common::recording_tracer();
    let shutdown = Shutdown::new();

    let weather_router = build_router(Role::Weather, &common::weather_config(&weatherapi.url()), tracer.clone()).unwrap();
    let weather_url = spawn_role(Role::Weather, weather_router, &shutdown).await;

    let input_router = build_router(Role::Input, &common::input_config(&viacep.url(), &weather_url), tracer).unwrap();
    let input_url = spawn_role(Role::Input, input_router, &shutdown).await;

    let client = TemperatureClient::new(&input_url);
    assert!(client.health().await.unwrap());

    let temperature = client
        .temperature_traced("01001000", common::INBOUND_TRACEPARENT)
        .await
        .unwrap();
    assert_eq!(temperature.city, "São Paulo");
    assert_eq!(temperature.celsius, 25.0);
    assert_eq!(temperature.fahrenheit, 77.0);
    assert_eq!(temperature.kelvin, 298.15);

    // weatherapi.com sees the folded locality and the same trace.
    let api_call = &weatherapi.recorded()[0];
    assert!(api_call.query.as_deref().unwrap().contains("q=Sao+Paulo"));
    let traceparent = api_call.header("traceparent").unwrap();
    assert_eq!(parse_trace_id(traceparent), Some(common::INBOUND_TRACE_ID));

    // The weather role's request span nests under the input role's hop span.
    let spans = exporter.get_finished_spans().unwrap();
    let input_request = common::finished_span(&spans, "temperature-request");
    let input_hop = spans
        .iter()
        .find(|s| s.name == "weather-lookup" && s.parent_span_id == input_request.span_context.span_id())
        .unwrap();
    let weather_request = common::finished_span(&spans, "weather-request");
    assert_eq!(weather_request.parent_span_id, input_hop.span_context.span_id());
    assert!(spans
        .iter()
        .all(|s| s.span_context.trace_id().to_string() == common::INBOUND_TRACE_ID));

    shutdown.trigger();
}

#[tokio::test]
async fn test_error_statuses_reach_the_client() {
    let viacep = common::start_programmable_upstream(|req| async move {
        if req.path.contains("99999999") {
            (200, common::VIACEP_NOT_FOUND.to_string())
        } else {
            (200, common::VIACEP_SAO_PAULO.to_string())
        }
    })
    .await;
    let weatherapi = common::start_mock_upstream(401, r#"{"error": {"message": "API key is invalid."}}"#).await;
    let (_provider, _exporter, tracer) = common::recording_tracer();
    let shutdown = Shutdown::new();

    let weather_router = build_router(Role::Weather, &common::weather_config(&weatherapi.url()), tracer.clone()).unwrap();
    let weather_url = spawn_role(Role::Weather, weather_router, &shutdown).await;
    let input_router = build_router(Role::Input, &common::input_config(&viacep.url(), &weather_url), tracer).unwrap();
    let input_url = spawn_role(Role::Input, input_router, &shutdown).await;
    let client = TemperatureClient::new(&input_url);

    let err = client.temperature("123").await.unwrap_err();
    let err = err.downcast_ref::<ServiceError>().unwrap();
    assert_eq!(err.status.as_u16(), 422);

    let err = client.temperature("99999999").await.unwrap_err();
    let err = err.downcast_ref::<ServiceError>().unwrap();
    assert_eq!(err.status.as_u16(), 404);
    assert_eq!(err.body, "can not find zipcode");

    let err = client.temperature("01001000").await.unwrap_err();
    let err = err.downcast_ref::<ServiceError>().unwrap();
    assert_eq!(err.status.as_u16(), 502);
    assert!(err.body.contains("weather"), "body: {}", err.body);
    assert!(err.body.contains("API key is invalid."), "body: {}", err.body);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(50)).await;
}
