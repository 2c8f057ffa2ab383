use actix_web::{web, HttpResponse, Responder};
use common::registry::fields;
use common::requests::FieldSearchRequest;

pub async fn process(query: web::Query<FieldSearchRequest>) -> impl Responder {
    let found = fields::search(&query.term, query.category.as_deref());
    HttpResponse::Ok().json(found)
}
