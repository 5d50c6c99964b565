use crate::helpers::{
    assert_is_trip, create_trip, get_json_response_body, get_random_email,
    get_session, login, register, trip_body, TestApp,
};
use test_context::test_context;
use trip_planner::ErrorResponse;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_owned_trip(app: &mut TestApp) {
    let (_email, customer_id) = get_session(app).await;
    let trip = create_trip(
        app,
        &trip_body(
            &customer_id,
            "Rome",
            "2025-07-01",
            "2025-07-08",
            &[("Ann", "ann@x.com")],
        ),
    )
    .await;

    let response = app.get_trip(trip["trip_id"].as_str().unwrap()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_is_trip(&body);
    assert_eq!(body, trip);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_trip(app: &mut TestApp) {
    let _session = get_session(app).await;

    let response = app.get_trip(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status().as_u16(), 404);
    assert!(response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialize response body to ErrorResponse")
        .error
        .starts_with("Trip not found"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_another_customers_trip(app: &mut TestApp) {
    let (_email, owner) = get_session(app).await;
    let trip = create_trip(
        app,
        &trip_body(&owner, "Private", "2025-07-01", "2025-07-08", &[]),
    )
    .await;

    let intruder = get_random_email();
    register(app, &intruder).await;
    login(app, &intruder).await;

    let response = app.get_trip(trip["trip_id"].as_str().unwrap()).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_malformed_trip_id(app: &mut TestApp) {
    let _session = get_session(app).await;

    let response = app.get_trip("not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response = app.get_trip(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status().as_u16(), 401);
}
