use crate::helpers::{get_random_email, register_body, TestApp};
use serde_json::json;
use test_context::test_context;
use trip_planner::{routes::auth::RegisterResponse, ErrorResponse};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_if_valid_input(app: &mut TestApp) {
    let response = app.post_register(&register_body(&get_random_email())).await;
    assert_eq!(response.status().as_u16(), 201);

    let expected_response = RegisterResponse {
        message: "User registered successfully".to_owned(),
    };
    assert_eq!(
        response
            .json::<RegisterResponse>()
            .await
            .expect("Could not deserialize response body to RegisterResponse"),
        expected_response
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_with_only_required_fields(app: &mut TestApp) {
    let body = json!({
        "first_name": "Ann",
        "last_name": "Lee",
        "email": get_random_email(),
        "password": "password123",
        "address": "",
        "phone_number": "",
        "dob": null
    });

    let response = app.post_register(&body).await;
    assert_eq!(response.status().as_u16(), 201);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_input(app: &mut TestApp) {
    let random_email = get_random_email();

    let test_cases = [
        json!({
            "password": "password123",
            "first_name": "Ann",
            "last_name": "Lee"
        }),
        json!({
            "email": random_email,
            "first_name": "Ann",
            "last_name": "Lee"
        }),
        json!({
            "email": random_email,
            "password": "password123"
        }),
        json!({
            "email": random_email,
            "password": true,
            "first_name": "Ann",
            "last_name": "Lee"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_register(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let mut invalid_email = register_body("not-an-email");
    invalid_email["email"] = json!("not-an-email");

    let mut short_password = register_body(&get_random_email());
    short_password["password"] = json!("short");

    let mut blank_name = register_body(&get_random_email());
    blank_name["first_name"] = json!("   ");

    let mut bad_phone = register_body(&get_random_email());
    bad_phone["phone_number"] = json!("call me maybe");

    let mut bad_dob = register_body(&get_random_email());
    bad_dob["dob"] = json!("12/04/1990");

    for test_case in [invalid_email, short_password, blank_name, bad_phone, bad_dob] {
        let response = app.post_register(&test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {test_case}"
        );
        assert!(!response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialize response body to ErrorResponse")
            .error
            .is_empty());
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_email_already_exists(app: &mut TestApp) {
    let email = get_random_email();
    let response = app.post_register(&register_body(&email)).await;
    assert_eq!(response.status().as_u16(), 201);

    for duplicate in [email.clone(), email.to_uppercase()] {
        let response = app.post_register(&register_body(&duplicate)).await;
        assert_eq!(response.status().as_u16(), 409, "Failed for {duplicate}");
        assert_eq!(
            response
                .json::<ErrorResponse>()
                .await
                .expect("Could not deserialize response body to ErrorResponse")
                .error,
            "User already exists".to_owned()
        );
    }
}
