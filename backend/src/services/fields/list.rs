use actix_web::{HttpResponse, Responder};
use common::registry::fields;

pub async fn process() -> impl Responder {
    HttpResponse::Ok().json(fields::all())
}
