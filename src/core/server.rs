//! HTTP server
//!
//! Serves the GraphQL endpoint (with GraphiQL on GET in non-production
//! environments), the photo side-channel, and wires the tower layers.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Router,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::ServerState;
use crate::graphql::{AppSchema, build_schema};

pub struct Server {
    state: ServerState,
}

async fn graphql_handler(
    Extension(schema): Extension<AppSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

impl Server {
    pub fn with_state(state: ServerState) -> Self {
        Self { state }
    }

    /// Build the full application router
    pub fn router(&self) -> Router {
        let schema = build_schema(self.state.clone());

        let graphql_route = if self.state.config.is_production() {
            get(|| async { "GraphQL endpoint accepts POST only" }).post(graphql_handler)
        } else {
            get(graphiql).post(graphql_handler)
        };

        Router::new()
            .route("/graphql", graphql_route)
            .merge(api::upload::router(self.state.clone()))
            .layer(Extension(schema))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind and serve until a shutdown signal arrives
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = format!("0.0.0.0:{}", self.state.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(environment = %self.state.config.environment, "Listening on {addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
