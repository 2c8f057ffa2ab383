use actix_web::{HttpResponse, Responder};
use common::registry::stages::all_stages;

pub async fn process() -> impl Responder {
    HttpResponse::Ok().json(all_stages())
}
