use migration::{Migrator, MigratorTrait};
use playrate_backend::api::{AccountApi, AdminApi, AuthApi, GamesApi, HealthApi};
use playrate_backend::app_data::AppData;
use playrate_backend::config::{self, Settings};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::logging::init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Failed to load settings");

    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!(database_url = %settings.database_url, "connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("database migrations completed");

    let app_data = AppData::init(db, &settings).expect("Failed to initialize application data");

    // Seed the admin account when configured
    if let Some(seed) = &settings.admin_seed {
        app_data
            .credential_store
            .ensure_admin_seed(seed.username.clone(), seed.email.clone(), seed.password.clone())
            .await
            .expect("Failed to seed admin account");
        tracing::info!(email = %seed.email, "admin account ensured");
    }

    let auth_api = AuthApi::new(
        app_data.credential_store.clone(),
        app_data.token_service.clone(),
    );
    let account_api = AccountApi::new(
        app_data.credential_store.clone(),
        app_data.token_service.clone(),
        app_data.review_board.clone(),
    );
    let games_api = GamesApi::new(
        app_data.credential_store.clone(),
        app_data.token_service.clone(),
        app_data.review_board.clone(),
        app_data.aggregator.clone(),
    );
    let admin_api = AdminApi::new(
        app_data.credential_store.clone(),
        app_data.token_service.clone(),
        app_data.moderated_review_store.clone(),
    );

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, account_api, games_api, admin_api),
        "PlayRate API",
        "0.1.0",
    )
    .server("/api");

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(bind_addr = %settings.bind_addr, "starting server");
    Server::new(TcpListener::bind(&settings.bind_addr))
        .run(app)
        .await
}
