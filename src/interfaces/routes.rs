use actix_web::web;

use crate::handlers::home::home;
use crate::handlers::users as user_handlers;

mod albums;
mod images;
mod json_error;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(users::config_routes)
            .configure(albums::config_routes)
            .configure(images::config_routes)
            .service(
                web::resource("/logout")
                    .route(web::post().to(user_handlers::logout))
            )
    );

    cfg.configure(json_error::config_routes);
}
