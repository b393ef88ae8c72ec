use wiremock::{
    matchers::{any, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{links, spawn_app};

const SUCCESS: &str = "Free subscription created successfully";
const DUPLICATE: &str =
    "A user with this email or phone number already exists. Please sign in to manage your subscription.";

fn body(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap()
}

fn valid_body(extra: &[(&str, &str)]) -> String {
    let mut pairs = vec![
        ("preferred_name", "Ursula"),
        ("email", "ursula_le_guin@gmail.com"),
        ("whatsapp_number", "15550001111"),
    ];
    pairs.extend_from_slice(extra);
    body(&pairs)
}

#[tokio::test]
async fn valid_signup_shows_both_success_blocks() {
    let app = spawn_app().await;

    Mock::given(path("/subscriptions/free-plan-signup"))
        .and(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "preferredName": "Ursula",
            "email": "ursula_le_guin@gmail.com",
            "phoneNumber": "+15550001111",
            "channelPreference": "both",
            "telegramId": "@ursula",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "message": SUCCESS })))
        .expect(1)
        .mount(&app.api_server)
        .await;

    let res = app
        .post_signup(valid_body(&[
            ("whatsapp", "whatsapp"),
            ("telegram", "telegram"),
            ("telegram_id", "@ursula"),
        ]))
        .await;
    assert_eq!(200, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert!(html.contains("Registration Successful!"));
    assert!(html.contains("+1 365-9989-385"));
    assert!(links(&html).contains(&"https://t.me/p365education_bot".to_string()));
    // the form starts over after a successful signup
    assert!(!html.contains("ursula_le_guin@gmail.com"));
    assert!(!html.contains("Ursula"));
}

#[tokio::test]
async fn whatsapp_only_signup_drops_the_telegram_id() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "channelPreference": "whatsapp",
            "telegramId": "",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "message": SUCCESS })))
        .expect(1)
        .mount(&app.api_server)
        .await;

    let res = app
        .post_signup(valid_body(&[("whatsapp", "whatsapp"), ("telegram_id", "@ursula")]))
        .await;
    assert_eq!(200, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert!(html.contains("+1 365-9989-385"));
    assert!(html.contains("Click Me to Download Contact"));
    assert!(!html.contains("Join Telegram Channel"));

    let request = &app.api_server.received_requests().await.unwrap()[0];
    let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert!(sent.get("preferences").is_none());
}

#[tokio::test]
async fn invalid_signup_never_calls_the_service() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.api_server)
        .await;

    let datas = [
        (
            body(&[("email", ""), ("whatsapp_number", "1555"), ("whatsapp", "whatsapp")]),
            "Please fill in all required fields.",
            "email is empty.",
        ),
        (
            body(&[("email", "a@b.com"), ("whatsapp_number", ""), ("telegram", "telegram")]),
            "Please fill in all required fields.",
            "whatsapp number is empty.",
        ),
        (
            body(&[("email", "a@b.com"), ("whatsapp_number", "1555")]),
            "Please select at least one contact method.",
            "no contact method.",
        ),
        (
            body(&[("email", "a@b.com"), ("whatsapp_number", "1555"), ("whatsapp", "signal")]),
            "Invalid contact method selection.",
            "unknown contact method.",
        ),
    ];
    for (body, message, payload) in datas {
        let res = app.post_signup(body).await;
        assert_eq!(400, res.status().as_u16(), "{payload}");

        let html = res.text().await.unwrap();
        assert!(html.contains(message), "{payload}");
        assert!(!html.contains("Registration Successful!"), "{payload}");
    }
}

#[tokio::test]
async fn duplicate_account_links_to_sign_in() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({ "message": DUPLICATE })))
        .expect(1)
        .mount(&app.api_server)
        .await;

    let res = app.post_signup(valid_body(&[("whatsapp", "whatsapp")])).await;
    assert_eq!(409, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert_eq!(links(&html), vec!["https://app.profit365.com/sign-in".to_string()]);
    assert!(html.contains("to your dashboard."));
    // what the user typed is kept for another try
    assert!(html.contains(r#"value="ursula_le_guin@gmail.com""#));
}

#[tokio::test]
async fn other_server_messages_are_shown_as_text() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": "Phone number <invalid>" })),
        )
        .expect(1)
        .mount(&app.api_server)
        .await;

    let res = app.post_signup(valid_body(&[("telegram", "telegram")])).await;
    assert_eq!(502, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert!(html.contains("Phone number &lt;invalid&gt;"));
    assert!(links(&html).is_empty());
}

#[tokio::test]
async fn failure_without_message_asks_to_try_again() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.api_server)
        .await;

    let res = app.post_signup(valid_body(&[("whatsapp", "whatsapp")])).await;
    assert_eq!(502, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert!(html.contains("An error occurred. Please try again."));
}

#[tokio::test]
async fn unexpected_success_body_asks_to_retry() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })))
        .expect(1)
        .mount(&app.api_server)
        .await;

    let res = app.post_signup(valid_body(&[("whatsapp", "whatsapp")])).await;
    assert_eq!(502, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert!(html.contains("Failed to create subscription. Please try again."));
    assert!(!html.contains("Registration Successful!"));
}
