use crate::helper::spawn_app;

#[tokio::test]
async fn health_check() {
    let app = spawn_app().await;

    let res = app.get("/health_check").await;

    assert!(res.status().is_success());
    assert_eq!(res.content_length(), Some(0));
}

#[tokio::test]
async fn signup_page_starts_empty() {
    let app = spawn_app().await;

    let res = app.get("/").await;
    assert_eq!(200, res.status().as_u16());

    let html = res.text().await.unwrap();
    assert!(html.contains(r#"action="/signup""#));
    assert!(html.contains("Join For Free"));
    assert!(!html.contains("Registration Successful!"));
    assert!(!html.contains(r#"role="alert""#));
    // debounce window handed to the page script
    assert!(html.contains("}, 600);"));
}

#[tokio::test]
async fn page_script_drops_suggestions_for_outdated_input() {
    let app = spawn_app().await;

    let html = app.get("/").await.text().await.unwrap();

    // replies for an address the user already changed are ignored
    assert!(html.contains("if (checked !== email.value) return;"));
    // a check with no match hides the previous hint
    assert!(html.contains("if (!suggestion) {\n                hint.hidden = true;"));
}
