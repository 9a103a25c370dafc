use axum::{routing::get, Router};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use roster_api::api::handlers::members;
use roster_api::domain::member::Member;
use roster_api::domain::repositories::MemberRepository;
use roster_api::infrastructure::db;
use roster_api::infrastructure::repositories::SqliteMemberRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Get database URL
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set, using default");
        "sqlite:roster.db".to_string()
    });

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    db::init_schema(&pool)
        .await
        .expect("Failed to apply database schema");
    tracing::info!("Database ready");

    seed_demo_member(&pool).await;

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(members::health_check))
        // Member routes
        .route("/members/:id", get(members::get_member_username))
        .route("/members2/:id", get(members::get_resolved_member_username))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(pool);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}

/// Inserts a demo member on first boot so the member endpoints have
/// something to serve.
async fn seed_demo_member(pool: &SqlitePool) {
    let repository = SqliteMemberRepository::new(pool.clone());
    let count = repository
        .count()
        .await
        .expect("Failed to inspect member table");

    if count == 0 {
        let member = repository
            .save(Member::new("userA", 0, None))
            .await
            .expect("Failed to seed member");
        tracing::info!("Seeded member '{}' with id {:?}", member.username, member.id);
    }
}
