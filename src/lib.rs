mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;

pub use domain::{entities, ownership, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db, storage, utils};

use auth::jwt::JwtService;
use repositories::sqlx_repo::{SqlxAlbumRepo, SqlxImageRepo, SqlxUserRepo};
use storage::local::LocalImageStore;
use use_cases::{albums::AlbumHandler, images::ImageHandler, users::UserHandler};

/// Static prefix uploaded files are served back under.
pub const UPLOADS_PUBLIC_PREFIX: &str = "/uploads";

pub struct AppState {
    pub user_handler: AppUserHandler,
    pub album_handler: AppAlbumHandler,
    pub image_handler: AppImageHandler,
}

pub type AppUserHandler = UserHandler<SqlxUserRepo, JwtService>;
pub type AppAlbumHandler = AlbumHandler<SqlxAlbumRepo, SqlxUserRepo>;
pub type AppImageHandler = ImageHandler<SqlxImageRepo, SqlxAlbumRepo, LocalImageStore>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let store = LocalImageStore::new(config.uploads_dir.clone(), UPLOADS_PUBLIC_PREFIX);

        let user_handler = UserHandler::new(SqlxUserRepo::new(pool.clone()), jwt_service);
        let album_handler = AlbumHandler::new(
            SqlxAlbumRepo::new(pool.clone()),
            SqlxUserRepo::new(pool.clone()),
        );
        let image_handler = ImageHandler::new(
            SqlxImageRepo::new(pool.clone()),
            SqlxAlbumRepo::new(pool),
            store,
        );

        AppState {
            user_handler,
            album_handler,
            image_handler,
        }
    }
}
