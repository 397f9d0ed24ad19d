use actix_web::web;

use crate::handlers::users;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(
                web::resource("/all-users")
                    .route(web::get().to(users::all_users))
            )
            .service(
                web::resource("")
                    .route(web::post().to(users::create_user))
                    .route(web::get().to(users::current_user))
                    .route(web::put().to(users::update_user))
            )
    );
}
