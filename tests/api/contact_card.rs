use crate::helper::spawn_app;

#[tokio::test]
async fn contact_card_downloads_as_attachment() {
    let app = spawn_app().await;

    let res = app.get("/contact.vcf").await;
    assert_eq!(200, res.status().as_u16());

    let headers = res.headers();
    assert!(headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/vcard"));
    let disposition = headers["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("contact.vcf"));

    let card = res.text().await.unwrap();
    assert!(card.starts_with("BEGIN:VCARD"));
    assert!(card.contains("P365 Stocks & Crypto"));
}
