//! Integration tests for the parking feed clients (wiremock-based)

use domain::{City, ParkingId};
use integration_parking::{
    MetzWfsClient, ParkingClient, ParkingConfig, ParkingError, TflCarParkClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const fn sample_metz_json() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "totalFeatures": 3,
        "features": [
            {
                "type": "Feature",
                "id": "pub_tsp_sta.1",
                "geometry": { "type": "Point", "coordinates": [6.1760, 49.1205] },
                "properties": {
                    "typ": "Parking en ouvrage",
                    "lib": "Cathédrale",
                    "place_total": 50,
                    "place_libre": 10,
                    "cout": "1.80 €/h"
                }
            },
            {
                "type": "Feature",
                "id": "pub_tsp_sta.2",
                "geometry": { "type": "Point", "coordinates": [6.1985, 49.1003] },
                "properties": {
                    "typ": "Parking relais",
                    "lib": "P+R Foire Expo",
                    "place_total": null,
                    "place_libre": null,
                    "cout": "gratuit"
                }
            },
            {
                "type": "Feature",
                "id": "pub_tsp_sta.3",
                "geometry": null,
                "properties": { "lib": "Sans géométrie" }
            }
        ]
    }"#
}

const fn sample_tfl_json() -> &'static str {
    r#"[
        {
            "id": "CarParks_800491",
            "commonName": "Barkingside Stn (LUL)",
            "placeType": "CarPark",
            "lat": 51.585685,
            "lon": 0.088556
        },
        {
            "id": "CarParks_800000",
            "commonName": "Unlocated",
            "placeType": "CarPark"
        }
    ]"#
}

#[tokio::test]
async fn test_metz_fetch_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/ows"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_metz_json()))
        .mount(&server)
        .await;

    let config = ParkingConfig::for_testing(&server.uri());
    let client = MetzWfsClient::new(&config).unwrap();

    let parkings = client.fetch_parkings().await.unwrap();
    assert_eq!(parkings.len(), 2);

    assert_eq!(parkings[0].id, ParkingId::from("pub_tsp_sta.1"));
    assert_eq!(parkings[0].total_spaces, Some(50));
    assert_eq!(parkings[0].available_spaces, Some(10));
    assert_eq!(parkings[0].city, City::Metz);

    assert_eq!(parkings[1].label, "P+R Foire Expo");
    assert!(!parkings[1].has_known_occupancy());
}

#[tokio::test]
async fn test_metz_keeps_endpoint_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/ows"))
        .and(query_param("service", "WFS"))
        .and(query_param("typeName", "public:pub_tsp_sta"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "features": [] }"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = ParkingConfig {
        metz_endpoint: format!(
            "{}/public/ows?service=WFS&request=GetFeature&typeName=public:pub_tsp_sta",
            server.uri()
        ),
        ..ParkingConfig::for_testing(&server.uri())
    };
    let client = MetzWfsClient::new(&config).unwrap();

    let parkings = client.fetch_parkings().await.unwrap();
    assert!(parkings.is_empty());
}

#[tokio::test]
async fn test_metz_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/ows"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ows:ExceptionReport/>"))
        .mount(&server)
        .await;

    let config = ParkingConfig::for_testing(&server.uri());
    let client = MetzWfsClient::new(&config).unwrap();

    let result = client.fetch_parkings().await;
    assert!(matches!(result, Err(ParkingError::ParseError(_))));
}

#[tokio::test]
async fn test_metz_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/ows"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = ParkingConfig::for_testing(&server.uri());
    let client = MetzWfsClient::new(&config).unwrap();

    let err = client.fetch_parkings().await.unwrap_err();
    assert!(matches!(err, ParkingError::RequestFailed(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_tfl_fetch_sends_app_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Place/Type/CarPark"))
        .and(query_param("app_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_tfl_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ParkingConfig::for_testing(&server.uri());
    let client = TflCarParkClient::new(&config).unwrap();

    let parkings = client.fetch_parkings().await.unwrap();
    assert_eq!(parkings.len(), 1);
    assert_eq!(parkings[0].label, "Barkingside Stn (LUL)");
    assert_eq!(parkings[0].city, City::London);
    assert!(parkings[0].total_spaces.is_none());
}

#[tokio::test]
async fn test_tfl_fetch_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Place/Type/CarPark"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let config = ParkingConfig {
        tfl_api_key: None,
        ..ParkingConfig::for_testing(&server.uri())
    };
    let client = TflCarParkClient::new(&config).unwrap();

    let parkings = client.fetch_parkings().await.unwrap();
    assert!(parkings.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_tfl_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Place/Type/CarPark"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ParkingConfig::for_testing(&server.uri());
    let client = TflCarParkClient::new(&config).unwrap();

    let err = client.fetch_parkings().await.unwrap_err();
    assert!(matches!(err, ParkingError::RequestFailed(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_tfl_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Place/Type/CarPark"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let config = ParkingConfig::for_testing(&server.uri());
    let client = TflCarParkClient::new(&config).unwrap();

    let err = client.fetch_parkings().await.unwrap_err();
    assert!(matches!(
        err,
        ParkingError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/ows"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "features": [] }"#)
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ParkingConfig {
        timeout_secs: 1,
        ..ParkingConfig::for_testing(&server.uri())
    };
    let client = MetzWfsClient::new(&config).unwrap();

    let err = client.fetch_parkings().await.unwrap_err();
    assert!(matches!(err, ParkingError::Timeout { timeout_secs: 1 }));
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on the discard port
    let config = ParkingConfig::for_testing("http://127.0.0.1:9");
    let client = TflCarParkClient::new(&config).unwrap();

    let err = client.fetch_parkings().await.unwrap_err();
    assert!(matches!(err, ParkingError::ConnectionFailed(_)));
}
