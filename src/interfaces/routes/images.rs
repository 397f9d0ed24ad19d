use actix_web::web;

use crate::handlers::images;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/images")
            .service(images::upload_image)
            .service(images::user_images)
            .service(images::rename_image)
    );
}
