use crate::helpers::{
    assert_is_trip, create_trip, get_json_response_body, get_random_email,
    get_session, login, register, trip_body, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_link_invitations_on_registration(app: &mut TestApp) {
    let (_owner_email, owner) = get_session(app).await;
    let invitee = get_random_email();
    let shouted = invitee.to_uppercase();

    let trip = create_trip(
        app,
        &trip_body(
            &owner,
            "Lisbon",
            "2025-09-01",
            "2025-09-05",
            &[("Ann", shouted.as_str()), ("Bo", "bo@x.com")],
        ),
    )
    .await;
    create_trip(
        app,
        &trip_body(&owner, "Not invited", "2025-10-01", "2025-10-05", &[("Bo", "bo@x.com")]),
    )
    .await;

    register(app, &invitee).await;
    let invitee_id = login(app, &invitee).await;

    let response = app.get_trips_invited(&invitee_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let trips = get_json_response_body(response).await;
    let trips = trips.as_array().expect("trips should be an array");

    assert_eq!(trips.len(), 1);
    assert_is_trip(&trips[0]);
    assert_eq!(trips[0]["trip_id"], trip["trip_id"]);

    let statuses: Vec<&str> = trips[0]["group_members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|member| member["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["accepted", "pending"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_if_not_invited(app: &mut TestApp) {
    let (_email, customer_id) = get_session(app).await;

    let response = app.get_trips_invited(&customer_id).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(get_json_response_body(response).await, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_customer_does_not_match_session(app: &mut TestApp) {
    let _session = get_session(app).await;

    let response = app
        .get_trips_invited(&uuid::Uuid::new_v4().to_string())
        .await;
    assert_eq!(response.status().as_u16(), 401);
}
