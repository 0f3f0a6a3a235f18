use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thulir::{config, content, handlers, paths, state::AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thulir=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let exercises = content::load_exercises(Path::new(&paths::quizzes_dir()));
    let vocabulary = content::load_vocabulary(Path::new(&paths::vocabulary_path()));
    tracing::info!(
        "Loaded {} exercises and {} vocabulary words",
        exercises.len(),
        vocabulary.len()
    );

    let app = handlers::router(AppState::new(exercises, vocabulary))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let bind_addr = config::server_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

    tracing::info!("Server running on http://localhost:{}", config::load_server_port());

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
