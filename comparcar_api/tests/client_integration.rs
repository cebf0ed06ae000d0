use comparcar_api::types::{BodyType, CarRecord, FuelType};
use comparcar_api::{CarQuery, Client, Error};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client_for(server: &MockServer) -> Client {
    Client::with_base_url(&format!("{}/api", server.uri()))
}

fn new_car() -> CarRecord {
    CarRecord {
        id: None,
        model: "VW Golf".to_string(),
        manufacturing_year: 2018,
        engine_volume: 1.4,
        body_type: BodyType::Hatchback,
        fuel_type: FuelType::Gasoline,
        trunk_size: 380,
        fuel_consumption: 5.6,
        average_service_price: 350.0,
        price: 14500.0,
        mileage: 76000,
    }
}

#[tokio::test]
async fn list_cars_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("cars_page.json");

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.list_cars(&CarQuery::default()).await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].model, "BMW X5");
}

#[tokio::test]
async fn list_cars_default_query_sends_no_extra_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("cars_empty_page.json")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.list_cars(&CarQuery::default()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let names: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(names, vec!["page", "size", "sortBy", "sortDirection"]);
}

#[tokio::test]
async fn list_cars_filtered_scenario() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .and(query_param("model", "BMW"))
        .and(query_param("priceFrom", "20000"))
        .and(query_param("priceTo", "40000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "id": 1, "model": "BMW X5", "manufacturingYear": 2019, "engineVolume": 3.0,
                "bodyType": "SUV", "fuelType": "DIESEL", "trunkSize": 650,
                "fuelConsumption": 7.2, "averageServicePrice": 850.0, "price": 25000.0,
                "mileage": 98000
            }],
            "totalElements": 1, "totalPages": 1, "size": 20, "number": 0,
            "first": true, "last": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = CarQuery::default()
        .with_model("BMW")
        .with_price_from(20000.0)
        .with_price_to(40000.0);
    let page = client.list_cars(&query).await.unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].model, "BMW X5");
    assert!(page.first && page.last);
}

#[tokio::test]
async fn list_cars_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.list_cars(&CarQuery::default()).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {:?}", other.map(|p| p.total_elements)),
    }
}

#[tokio::test]
async fn list_cars_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.list_cars(&CarQuery::default()).await;
    assert!(matches!(result, Err(Error::InvalidResponse(_))));
}

#[tokio::test]
async fn unreachable_backend_is_request_failed() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = Client::with_base_url(&format!("{}/api", uri));
    let result = client.list_body_types().await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn list_all_cars_success() {
    let mock_server = MockServer::start().await;
    let car = load_fixture("car.json");

    Mock::given(method("GET"))
        .and(path("/api/cars/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("[{}]", car)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let cars = client.list_all_cars().await.unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].id, Some(42));
}

#[tokio::test]
async fn get_car_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("car.json")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let car = client.get_car(42).await.unwrap();
    assert_eq!(car.model, "Skoda Octavia");
}

#[tokio::test]
async fn get_car_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_car(7).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    let mock_server = MockServer::start().await;
    let car = new_car();
    let stored = car.with_id(101);

    Mock::given(method("POST"))
        .and(path("/api/cars"))
        .and(body_json(serde_json::to_value(&car).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(&stored))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cars/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client.create_car(&car.with_id(5)).await.unwrap();
    assert_eq!(created.id, Some(101));

    let fetched = client.get_car(101).await.unwrap();
    assert_eq!(fetched.without_id(), car);
}

#[tokio::test]
async fn update_car_sends_path_id_in_body() {
    let mock_server = MockServer::start().await;
    let car = new_car();
    let expected = car.with_id(9);

    Mock::given(method("PUT"))
        .and(path("/api/cars/9"))
        .and(body_json(serde_json::to_value(&expected).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let updated = client.update_car(9, &car.with_id(3)).await.unwrap();
    assert_eq!(updated.id, Some(9));
}

#[tokio::test]
async fn delete_car_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/cars/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.delete_car(3).await.is_ok());
}

#[tokio::test]
async fn delete_missing_car_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/cars/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete_car(404).await.unwrap_err();
    assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn reference_lists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars/body-types"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("body_types.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cars/fuel-types"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("fuel_types.json")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.list_body_types().await.unwrap();
    let fuel = client.list_fuel_types().await.unwrap();
    assert_eq!(body.first().map(String::as_str), Some("SEDAN"));
    assert_eq!(fuel.len(), 11);
}
