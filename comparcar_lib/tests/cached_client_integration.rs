use std::time::Duration;

use comparcar_lib::cache::MemoryCache;
use comparcar_lib::types::{BodyType, CarRecord, FuelType};
use comparcar_lib::{CachedClient, CarQuery, ComparcarError};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn car_json(id: i64, model: &str, price: f64) -> Value {
    json!({
        "id": id, "model": model, "manufacturingYear": 2019, "engineVolume": 2.0,
        "bodyType": "SEDAN", "fuelType": "DIESEL", "trunkSize": 480,
        "fuelConsumption": 5.9, "averageServicePrice": 450.0, "price": price,
        "mileage": 60000
    })
}

fn page_json(content: Vec<Value>) -> Value {
    let total = content.len();
    json!({
        "content": content, "totalElements": total, "totalPages": if total == 0 { 0 } else { 1 },
        "size": 20, "number": 0, "first": true, "last": true
    })
}

fn client_for(server: &MockServer) -> CachedClient {
    CachedClient::with_base_url(
        &format!("{}/api", server.uri()),
        MemoryCache::new(Duration::from_secs(60)),
    )
}

#[tokio::test]
async fn identical_list_queries_hit_backend_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![car_json(1, "BMW X5", 25000.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.list_cars(&CarQuery::default()).await.unwrap();
    let second = client.list_cars(&CarQuery::default()).await.unwrap();
    assert_eq!(first, second);
    assert!(first.first && first.last);
}

#[tokio::test]
async fn different_queries_are_cached_separately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.list_cars(&CarQuery::default()).await.unwrap();
    client
        .list_cars(&CarQuery::default().with_model("Golf"))
        .await
        .unwrap();
    client
        .list_cars(&CarQuery::default().with_model("Golf"))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_invalidates_cached_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cars/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.list_cars(&CarQuery::default()).await.unwrap();
    client.delete_car(1).await.unwrap();
    client.list_cars(&CarQuery::default()).await.unwrap();
}

#[tokio::test]
async fn failed_delete_keeps_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cars/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.list_cars(&CarQuery::default()).await.unwrap();
    let err = client.delete_car(404).await.unwrap_err();
    assert!(err.is_not_found());
    client.list_cars(&CarQuery::default()).await.unwrap();
}

#[tokio::test]
async fn update_invalidates_the_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(car_json(5, "Golf", 9000.0)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cars/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(car_json(5, "Golf", 8500.0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut car = client.get_car(5).await.unwrap();
    client.get_car(5).await.unwrap();
    car.price = 8500.0;
    client.update_car(5, &car).await.unwrap();
    client.get_car(5).await.unwrap();
}

#[tokio::test]
async fn errors_are_not_cached_or_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars/all"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for _ in 0..2 {
        let err = client.list_all_cars().await.unwrap_err();
        assert!(matches!(
            err,
            ComparcarError::Api(comparcar_lib::comparcar_api::Error::HttpStatus { status: 503, .. })
        ));
    }
}

#[tokio::test]
async fn create_then_get_matches_submitted_fields() {
    let server = MockServer::start().await;
    let submitted = CarRecord {
        id: None,
        model: "Tesla Model 3".to_string(),
        manufacturing_year: 2022,
        engine_volume: 0.5,
        body_type: BodyType::Sedan,
        fuel_type: FuelType::Electric,
        trunk_size: 425,
        fuel_consumption: 1.0,
        average_service_price: 150.0,
        price: 38990.0,
        mileage: 12000,
    };
    let stored = submitted.with_id(314);

    Mock::given(method("POST"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&stored))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cars/314"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client.create_car(&submitted).await.unwrap();
    let fetched = client.get_car(created.id.unwrap()).await.unwrap();
    assert_eq!(fetched.id, Some(314));
    assert_eq!(fetched.without_id(), submitted);
}

#[tokio::test]
async fn reference_data_is_reconciled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars/body-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["SUV", "SEDAN", "TANK"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cars/fuel-types"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let data = client.reference_data().await;
    assert_eq!(data.body_types, vec![BodyType::Suv, BodyType::Sedan]);
    assert!(data.fuel_types.is_empty());

    // body types are served from the cache the second time
    let again = client.reference_data().await;
    assert_eq!(again.body_types, data.body_types);
}

#[tokio::test]
async fn scenario_bmw_price_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .and(query_param("model", "BMW"))
        .and(query_param("priceFrom", "20000"))
        .and(query_param("priceTo", "40000"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![car_json(1, "BMW 320d", 25000.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .list_cars(
            &CarQuery::default()
                .with_model("BMW")
                .with_price_from(20000.0)
                .with_price_to(40000.0),
        )
        .await
        .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].model, "BMW 320d");
}

#[tokio::test]
async fn invalid_record_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = CarRecord {
        id: None,
        model: "Lada Niva".to_string(),
        manufacturing_year: 1985,
        engine_volume: 1.7,
        body_type: BodyType::Suv,
        fuel_type: FuelType::Gasoline,
        trunk_size: 265,
        fuel_consumption: 10.5,
        average_service_price: 200.0,
        price: 50.0,
        mileage: 240000,
    };
    let err = client.create_car(&record).await.unwrap_err();
    match err {
        ComparcarError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.get(comparcar_lib::CarField::Price).is_some());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
