use reqwest::{cookie::Jar, Client, Response};
use secrecy::Secret;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use trip_planner::{
    app_state::{AppState, TripStoreType, UserStoreType},
    domain::Email,
    services::{
        data_stores::{HashmapTripStore, HashmapUserStore},
        postmark_email_client::PostmarkEmailClient,
    },
    utils::constants::{env, test},
    Application,
};
use uuid::Uuid;
use wiremock::{
    matchers::method, matchers::path, Mock, MockServer, ResponseTemplate,
};

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub cookie_jar: Arc<Jar>,
    pub email_server: MockServer,
    pub http_client: reqwest::Client,
    pub user_store: UserStoreType,
    pub trip_store: TripStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        if std::env::var(env::JWT_SECRET_ENV_VAR).is_err() {
            std::env::set_var(env::JWT_SECRET_ENV_VAR, "integration-test-secret");
        }

        let user_store: UserStoreType =
            Arc::new(RwLock::new(HashmapUserStore::default()));
        let trip_store: TripStoreType =
            Arc::new(RwLock::new(HashmapTripStore::default()));

        let email_server = MockServer::start().await;
        Mock::given(path("/email"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&email_server)
            .await;
        let email_client =
            Arc::new(configure_postmark_email_client(email_server.uri()));

        let app_state =
            AppState::new(user_store.clone(), trip_store.clone(), email_client);

        let app = Application::build(app_state, test::APP_ADDRESS, &[])
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address,
            cookie_jar,
            email_server,
            http_client,
            user_store,
            trip_store,
        }
    }

    pub async fn post_register<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_create_trip<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/create-trip", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_trips_with_members(&self, customer_id: &str) -> Response {
        self.http_client
            .get(format!("{}/trips-with-members/{customer_id}", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_trips_invited(&self, customer_id: &str) -> Response {
        self.http_client
            .get(format!("{}/trips-invited/{customer_id}", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_trip(&self, trip_id: &str) -> Response {
        self.http_client
            .get(format!("{}/trips/{trip_id}", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_trip<Body>(&self, trip_id: &str, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/trips/{trip_id}", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_trip(&self, trip_id: &str) -> Response {
        self.http_client
            .delete(format!("{}/trips/{trip_id}", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

pub fn get_random_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

fn configure_postmark_email_client(base_url: String) -> PostmarkEmailClient {
    let postmark_auth_token = Secret::new("auth_token".to_owned());

    let sender = Email::parse(Secret::new("trips@example.com".to_owned()))
        .expect("Failed to parse sender email");

    let http_client = Client::builder()
        .timeout(test::email_client::TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");

    PostmarkEmailClient::new(base_url, sender, postmark_auth_token, http_client)
}

pub fn register_body(email: &str) -> Value {
    serde_json::json!({
        "first_name": "Test",
        "last_name": "Traveller",
        "email": email,
        "password": PASSWORD,
        "address": "1 Main Street",
        "phone_number": "+44 20 7946 0958",
        "travel_interests": "museums",
        "dob": "1990-04-12"
    })
}

pub async fn register(app: &TestApp, email: &str) {
    assert_eq!(
        app.post_register(&register_body(email)).await.status().as_u16(),
        201,
        "Failed to register {email}"
    );
}

/// Logs in and returns the customer id from the response.
pub async fn login(app: &TestApp, email: &str) -> String {
    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": PASSWORD
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200, "Failed to log in {email}");

    let body = get_json_response_body(response).await;
    body["customer"]["customer_id"]
        .as_str()
        .expect("No customer_id in login response")
        .to_owned()
}

/// Registers a fresh customer and logs them in. Returns (email, customer_id).
pub async fn get_session(app: &TestApp) -> (String, String) {
    let email = get_random_email();
    register(app, &email).await;
    let customer_id = login(app, &email).await;
    (email, customer_id)
}

pub fn trip_body(
    customer_id: &str,
    trip_name: &str,
    start_date: &str,
    end_date: &str,
    members: &[(&str, &str)],
) -> Value {
    let group_members: Vec<Value> = members
        .iter()
        .map(|(name, email)| serde_json::json!({"name": name, "email": email}))
        .collect();
    serde_json::json!({
        "customer_id": customer_id,
        "trip_name": trip_name,
        "start_date": start_date,
        "end_date": end_date,
        "group_members": group_members
    })
}

/// Creates a trip and returns the `trip` object of the response.
pub async fn create_trip(app: &TestApp, body: &Value) -> Value {
    let response = app.post_create_trip(body).await;
    assert_eq!(response.status().as_u16(), 201, "Failed to create trip");
    get_json_response_body(response).await["trip"].clone()
}

pub async fn get_json_response_body(response: Response) -> Value {
    response
        .json()
        .await
        .expect("failed to parse response body JSON")
}

pub fn member_names(trip: &Value) -> Vec<String> {
    trip["group_members"]
        .as_array()
        .expect("group_members should be an array")
        .iter()
        .map(|member| member["name"].as_str().unwrap().to_owned())
        .collect()
}

pub fn member_id(trip: &Value, email: &str) -> String {
    trip["group_members"]
        .as_array()
        .expect("group_members should be an array")
        .iter()
        .find(|member| member["email"] == email)
        .and_then(|member| member["member_id"].as_str())
        .unwrap_or_else(|| panic!("no member with email {email}"))
        .to_owned()
}

/// Invitations are sent on background tasks. Waits until the mock Postmark
/// server has seen `expected` emails, then returns the recipients.
pub async fn wait_for_emails(app: &TestApp, expected: usize) -> Vec<String> {
    for _ in 0..50 {
        let received = app
            .email_server
            .received_requests()
            .await
            .expect("request recording is enabled");
        if received.len() >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    // Give any unexpected extra sends a chance to land.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut recipients: Vec<String> = app
        .email_server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| {
            let body: Value =
                serde_json::from_slice(&request.body).expect("JSON email body");
            body["To"].as_str().unwrap_or_default().to_owned()
        })
        .collect();
    recipients.sort();
    recipients
}

pub const TRIP_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "trip_id": { "type": "string", "minLength": 36, "maxLength": 36 },
    "trip_name": { "type": "string", "minLength": 1, "maxLength": 255 },
    "start_date": { "type": "string", "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$" },
    "end_date": { "type": "string", "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$" },
    "customer_id": { "type": "string", "minLength": 36, "maxLength": 36 },
    "group_members": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "member_id": { "type": "string", "minLength": 36, "maxLength": 36 },
          "name": { "type": "string", "minLength": 1 },
          "email": { "type": "string", "minLength": 3 },
          "status": { "enum": ["pending", "accepted"] }
        },
        "required": ["member_id", "name", "email", "status"]
      }
    }
  },
  "required": ["trip_id", "trip_name", "start_date", "end_date", "customer_id", "group_members"]
}"#;

pub fn assert_is_trip(value: &Value) {
    let schema: Value =
        serde_json::from_str(TRIP_SCHEMA).expect("trip schema is valid JSON");
    assert!(
        jsonschema::is_valid(&schema, value),
        "response does not match trip schema: {value}"
    );
}
