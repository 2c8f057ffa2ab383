//! # Stage Registry Service
//!
//! Serves the fixed fourteen-stage GeM lifecycle so the frontend can lay out
//! its kanban, list and timeline views.

mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/stages";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(list::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use common::model::stage::Stage;

    #[actix_web::test]
    async fn lists_fourteen_ordered_stages() {
        let app = test::init_service(App::new().service(configure_routes())).await;
        let req = test::TestRequest::get().uri("/api/stages").to_request();
        let stages: Vec<Stage> = test::call_and_read_body_json(&app, req).await;
        let numbers: Vec<u8> = stages.iter().map(|s| s.stage_number).collect();
        assert_eq!(numbers, (1..=14).collect::<Vec<u8>>());
        assert_eq!(stages[5].field_keys, vec!["unitRate", "gstRate", "boqFormatUpload", "priceBreakup"]);
    }
}
