pub mod page;
pub mod upload;

use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use tracing::{error, info_span, Instrument, Span};
use uuid::Uuid;

use crate::application::SessionHandler;
use crate::domain::config::AppConfig;
use crate::domain::error::ParseError;
use crate::domain::upload::UploadedFile;
use crate::domain::views::RenderModel;

use self::page::render_page;
use self::upload::{accept_upload, InspectRequest, InteractionForm};

pub struct HttpState {
    pub handler: SessionHandler,
    pub max_upload_bytes: usize,
}

impl HttpState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            handler: SessionHandler::from_config(config),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Result of one evaluated interaction, with the upload handed back for re-rendering
struct Interaction {
    model: RenderModel,
    upload: Option<UploadedFile>,
}

#[get("/")]
async fn index(data: web::Data<HttpState>) -> impl Responder {
    let model = data.handler.handle(None, false);
    html(render_page(&model, None))
}

#[post("/")]
async fn interact(data: web::Data<HttpState>, form: web::Form<InteractionForm>) -> HttpResponse {
    let form = form.into_inner();
    let show_full_table = form.show_full_table();
    let span = info_span!("interaction", id = %Uuid::new_v4(), surface = "page");

    let accepted = accept_upload(
        form.file_name.as_deref(),
        form.file_data.as_deref(),
        data.max_upload_bytes,
    );

    match evaluate(data, form.file_name, accepted, show_full_table)
        .instrument(span)
        .await
    {
        Ok(interaction) => html(render_page(&interaction.model, interaction.upload.as_ref())),
        Err(response) => response,
    }
}

#[post("/inspect")]
async fn inspect(data: web::Data<HttpState>, req: web::Json<InspectRequest>) -> HttpResponse {
    let req = req.into_inner();
    let span = info_span!("interaction", id = %Uuid::new_v4(), surface = "api");

    let accepted = accept_upload(
        req.file_name.as_deref(),
        req.file_data.as_deref(),
        data.max_upload_bytes,
    );

    match evaluate(data, req.file_name, accepted, req.show_full)
        .instrument(span)
        .await
    {
        Ok(interaction) => HttpResponse::Ok().json(interaction.model),
        Err(response) => response,
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// Run the session handler for one interaction.
///
/// Parsing happens on the blocking pool; the request still waits for it to finish.
async fn evaluate(
    data: web::Data<HttpState>,
    file_name: Option<String>,
    accepted: Result<Option<UploadedFile>, ParseError>,
    show_full_table: bool,
) -> Result<Interaction, HttpResponse> {
    let upload = match accepted {
        Ok(upload) => upload,
        Err(err) => {
            return Ok(Interaction {
                model: data.handler.reject(file_name, &err),
                upload: None,
            })
        }
    };

    let span = Span::current();
    tokio::task::spawn_blocking(move || {
        span.in_scope(|| {
            let model = data.handler.handle(upload.as_ref(), show_full_table);
            Interaction { model, upload }
        })
    })
    .await
    .map_err(|err| {
        error!(error = %err, "Interaction worker failed");
        HttpResponse::InternalServerError().body("Failed to process the upload")
    })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Request body limit: base64 inflates uploads by 4/3, plus room for the other fields
pub fn payload_limit(max_upload_bytes: usize) -> usize {
    (max_upload_bytes / 3 + 1)
        .saturating_mul(4)
        .saturating_add(64 * 1024)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(interact).service(
        web::scope("/api")
            .wrap(Cors::permissive()) // Allow all origins for local tool
            .service(inspect)
            .service(health),
    );
}

pub fn start_server(config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::from_config(config));
    let limit = payload_limit(config.max_upload_bytes);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::FormConfig::default().limit(limit))
            .app_data(web::JsonConfig::default().limit(limit))
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test as actix_test};

    use super::upload::encode_payload;

    macro_rules! viewer_app {
        () => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(HttpState::from_config(&AppConfig::default())))
                    .app_data(web::FormConfig::default().limit(payload_limit(1024 * 1024)))
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_index_prompts_for_upload() {
        let app = viewer_app!();
        let req = actix_test::TestRequest::get().uri("/").to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Please upload a CSV file to get started."));
    }

    #[actix_web::test]
    async fn test_post_valid_upload() {
        let app = viewer_app!();
        let payload = encode_payload(b"a,b\n1,2\n3,4\n");
        let req = actix_test::TestRequest::post()
            .uri("/")
            .set_form([
                ("file_name", "data.csv"),
                ("file_data", payload.as_str()),
                ("show_full", "on"),
            ])
            .to_request();

        let body = actix_test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("CSV file loaded successfully!"));
        assert!(html.contains("<h2>Full DataFrame:</h2>"));
    }

    #[actix_web::test]
    async fn test_post_without_file_is_prompt() {
        let app = viewer_app!();
        let req = actix_test::TestRequest::post()
            .uri("/")
            .set_form([("show_full", "on")])
            .to_request();

        let body = actix_test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Please upload a CSV file to get started."));
        assert!(!html.contains("An error occurred"));
    }

    #[actix_web::test]
    async fn test_post_rejected_extension() {
        let app = viewer_app!();
        let req = actix_test::TestRequest::post()
            .uri("/")
            .set_form([("file_name", "notes.txt"), ("file_data", "")])
            .to_request();

        let body = actix_test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("only .csv files are accepted"));
        assert!(!html.contains("Data Preview"));
    }

    #[actix_web::test]
    async fn test_api_inspect_returns_render_model() {
        let app = viewer_app!();
        let req = actix_test::TestRequest::post()
            .uri("/api/inspect")
            .set_json(serde_json::json!({
                "file_name": "data.csv",
                "file_data": encode_payload(b"a,b\n1,2\n3,4\n"),
                "show_full": false
            }))
            .to_request();

        let json: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["state"], "file_provided_and_valid");
        assert_eq!(json["report"]["preview"]["columns"], serde_json::json!(["a", "b"]));
        assert_eq!(json["report"]["statistics"]["kind"], "numeric");
        assert_eq!(json["report"]["statistics"]["columns"][1]["max"], 4.0);
        assert!(json["report"]["full_table"].is_null());
    }

    #[actix_web::test]
    async fn test_api_inspect_reports_parse_failure() {
        let app = viewer_app!();
        let req = actix_test::TestRequest::post()
            .uri("/api/inspect")
            .set_json(serde_json::json!({
                "file_name": "broken.csv",
                "file_data": encode_payload(b"a,b\n1,2\n3,4,5\n"),
            }))
            .to_request();

        let json: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["state"], "file_provided_and_invalid");
        assert_eq!(json["file_name"], "broken.csv");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("found record with 3 fields"));
        assert!(json.get("report").is_none());
    }

    #[actix_web::test]
    async fn test_health() {
        let app = viewer_app!();
        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let json: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn test_payload_limit_covers_base64() {
        assert!(payload_limit(3000) >= 4000);
        assert_eq!(payload_limit(usize::MAX), usize::MAX);
    }
}
