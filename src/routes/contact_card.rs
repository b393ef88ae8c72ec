use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse, Responder,
};

use crate::config::SignupConfig;

const CONTACT_CARD: &str = include_str!("../../static/contact.vcf");

pub async fn contact_card(config: web::Data<SignupConfig>) -> impl Responder {
    let file_name = config
        .vcard_path
        .rsplit('/')
        .next()
        .unwrap_or("contact.vcf")
        .to_owned();

    HttpResponse::Ok()
        .content_type("text/vcard; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(CONTACT_CARD)
}
