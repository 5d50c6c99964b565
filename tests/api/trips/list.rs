use crate::helpers::{
    assert_is_trip, create_trip, get_json_response_body, get_session, login,
    member_names, register, get_random_email, trip_body, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_if_no_trips(app: &mut TestApp) {
    let (_email, customer_id) = get_session(app).await;

    let response = app.get_trips_with_members(&customer_id).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(get_json_response_body(response).await, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_trips_with_members_latest_start_first(app: &mut TestApp) {
    let (_email, customer_id) = get_session(app).await;

    create_trip(
        app,
        &trip_body(&customer_id, "Winter", "2025-01-10", "2025-01-12", &[]),
    )
    .await;
    let paris = create_trip(
        app,
        &trip_body(
            &customer_id,
            "Paris Trip",
            "2025-06-01",
            "2025-06-10",
            &[("Ann", "ann@x.com"), ("Bo", "bo@x.com")],
        ),
    )
    .await;
    create_trip(
        app,
        &trip_body(&customer_id, "Spring", "2025-03-01", "2025-03-05", &[("Cy", "cy@x.com")]),
    )
    .await;

    let response = app.get_trips_with_members(&customer_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let trips = get_json_response_body(response).await;
    let trips = trips.as_array().expect("trips should be an array");

    let names: Vec<&str> = trips
        .iter()
        .map(|trip| trip["trip_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Paris Trip", "Spring", "Winter"]);

    for trip in trips {
        assert_is_trip(trip);
    }
    assert_eq!(trips[0], paris);
    assert_eq!(member_names(&trips[0]), ["Ann", "Bo"]);
    assert_eq!(member_names(&trips[1]), ["Cy"]);
    assert!(member_names(&trips[2]).is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_not_list_other_customers_trips(app: &mut TestApp) {
    let (_email, first_customer) = get_session(app).await;
    create_trip(
        app,
        &trip_body(&first_customer, "Mine", "2025-06-01", "2025-06-10", &[]),
    )
    .await;

    let second_email = get_random_email();
    register(app, &second_email).await;
    let second_customer = login(app, &second_email).await;

    let response = app.get_trips_with_members(&second_customer).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(get_json_response_body(response).await, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_customer_does_not_match_session(app: &mut TestApp) {
    let _session = get_session(app).await;

    let response = app
        .get_trips_with_members(&uuid::Uuid::new_v4().to_string())
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response = app
        .get_trips_with_members(&uuid::Uuid::new_v4().to_string())
        .await;
    assert_eq!(response.status().as_u16(), 401);
}
