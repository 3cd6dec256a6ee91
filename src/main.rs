use kashidashi::{
    api::{handlers::AppState, router::create_router},
    application::{Catalog, LendingLedger, LendingPolicy, Roster},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kashidashi=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Policy from environment (defaults documented in application::policy)
    let policy = LendingPolicy::from_env();
    tracing::info!(?policy, "Lending policy loaded");

    // Build the three components: Catalog, Roster, Lending Ledger
    let catalog = Arc::new(Catalog::new());
    let roster = Arc::new(Roster::new());
    let ledger = Arc::new(LendingLedger::new(
        catalog.clone(),
        roster.clone(),
        policy,
    ));

    seed_sample_data(&catalog, &roster);

    // Create application state
    let app_state = Arc::new(AppState {
        catalog,
        roster,
        ledger,
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

/// デモ用の初期データを登録する
fn seed_sample_data(catalog: &Catalog, roster: &Roster) {
    let seeds = [
        ("The Great Gatsby", "F. Scott Fitzgerald", 5),
        ("To Kill a Mockingbird", "Harper Lee", 3),
    ];
    for (title, author, copies) in seeds {
        if let Err(e) = catalog.add_book(title, author, copies) {
            tracing::warn!("Failed to seed book {:?}: {}", title, e);
        }
    }

    let members = [
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
    ];
    for (name, email) in members {
        if let Err(e) = roster.add_member(name, email) {
            tracing::warn!("Failed to seed member {:?}: {}", name, e);
        }
    }
}
