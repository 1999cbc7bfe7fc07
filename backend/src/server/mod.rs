//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use idmapping::domain::{IdMapper, Validator};
use idmapping::inbound::http::health::HealthState;
use idmapping::inbound::http::routes;
use idmapping::inbound::http::state::HttpState;
use idmapping::outbound::authentication::{AuthsourceRegistry, LocalTokenAuthenticator};
use idmapping::outbound::namespace_store::InMemoryNamespaceStore;
use idmapping::outbound::policy::AuthsourceAllowList;
use idmapping::{ApiDoc, Trace};

fn build_authenticator(config: &ServerConfig, validator: &Validator) -> Result<AuthsourceRegistry> {
    let registry = AuthsourceRegistry::new();
    let Some(path) = &config.local_users_file else {
        warn!("no local users file configured; every token will be rejected");
        return Ok(registry);
    };
    let local = LocalTokenAuthenticator::from_file(validator, path)
        .wrap_err("failed to load local users")?;
    Ok(registry.with_backend(local.authsource().clone(), Arc::new(local)))
}

/// Wire the mapping service onto its outbound adapters.
pub fn build_http_state(config: &ServerConfig, validator: Validator) -> Result<HttpState> {
    let authenticator = build_authenticator(config, &validator)?;
    let policy = AuthsourceAllowList::new(config.creator_authsources.iter().cloned());
    let mapper = IdMapper::new(
        Arc::new(authenticator),
        Arc::new(InMemoryNamespaceStore::new()),
        Arc::new(policy),
    );
    Ok(HttpState::new(Arc::new(mapper), validator))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    swagger_ui: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let docs = swagger_ui.then(|| {
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
    });

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes::configure)
        .configure(|cfg| {
            if let Some(docs) = docs {
                cfg.service(docs);
            }
        })
        .default_service(routes::default_service())
}

/// Construct an Actix HTTP server from resolved configuration.
///
/// # Errors
/// Fails when the local users table cannot be loaded or the socket cannot
/// be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    validator: Validator,
) -> Result<Server> {
    let http_state = web::Data::new(build_http_state(&config, validator)?);
    let server_health_state = health_state.clone();
    let swagger_ui = config.swagger_ui;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), swagger_ui)
    })
    .bind(config.bind_addr())
    .wrap_err_with(|| format!("failed to bind {}", config.bind_addr()))?
    .run();

    info!(bind_addr = %config.bind_addr(), "namespace mapping service listening");
    health_state.mark_ready();
    Ok(server)
}
