use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::email_client::EmailClient;
use crate::routes::{contact, health_check, method_not_allowed};
use crate::storage::UserStorage;

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    storage: Arc<dyn UserStorage>,
) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let storage: web::Data<dyn UserStorage> = web::Data::from(storage);
    let server = HttpServer::new(move || {
        // Malformed JSON bodies answer in the same JSON shape as schema
        // violations instead of actix's plain-text default.
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(serde_json::json!({ "message": "Оролтын мэдээлэл буруу байна" })),
            )
            .into()
        });
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/api/contact")
                    .route(web::post().to(contact))
                    .route(web::route().to(method_not_allowed)),
            )
            .app_data(json_config)
            .app_data(email_client.clone())
            .app_data(storage.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
