//! Syllabus backend - course dashboard read API
//!
//! This is the main entry point. The dashboard schema is served at
//! /modules/gql/query/v2 (versioned envelope) and /graphql (native).

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllabus::config::Config;
use syllabus::content::SiteRegistry;
use syllabus::db::Database;
use syllabus::graphql::registry::SiteInfo;
use syllabus::graphql::{ExtensionRegistry, build_schema};
use syllabus::{AppState, app, extensions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let config = Arc::new(config);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "syllabus=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Syllabus Backend");

    // Load the course catalog once; it is immutable for the process lifetime
    let registry = Arc::new(SiteRegistry::load(&config.content_path)?);
    tracing::info!(courses = registry.len(), "Course registry loaded");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    // Register plug-in schema extensions, then freeze the registry.
    // This must happen before the first query executes; finalize() makes
    // later registration unrepresentable.
    let mut extension_registry = ExtensionRegistry::new();
    extensions::course_dates::register(&mut extension_registry)?;
    extensions::explorer::register(
        &mut extension_registry,
        SiteInfo {
            title: config.site_title.clone(),
            logo_url: config.site_logo_url.clone(),
        },
    )?;
    let extension_registry = extension_registry.finalize();
    tracing::info!("Schema extensions registered");

    let schema = build_schema(
        registry.clone(),
        db.clone(),
        extension_registry,
        config.clone(),
    );
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        db,
        schema,
        registry,
    };

    let router = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL playground: http://localhost:{}/graphql",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
