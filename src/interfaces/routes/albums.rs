use actix_web::web;

use crate::handlers::albums;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/albums")
            .service(
                web::resource("")
                    .route(web::post().to(albums::create_album))
                    .route(web::get().to(albums::my_albums))
            )
            .service(
                web::resource("/{id}/images")
                    .route(web::get().to(albums::album_images))
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(albums::update_album))
            )
    );
}
