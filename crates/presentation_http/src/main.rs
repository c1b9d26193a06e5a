//! Hablamos HTTP Server
//!
//! Main entry point for the Spanish tutor API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::{
    AudioStorePort, HealthService, InferencePort, SpeechPort, SpeechService, TutorService,
};
use infrastructure::{
    AppConfig, LocalAudioStore, OpenRouterInferenceAdapter, SpeechAdapter, TemplateEngine,
};
use presentation_http::{routes, state::AppState, tasks::spawn_scratch_cleanup_task};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,hablamos_server=debug,presentation_http=debug,\
                                  tower_http=debug,application=info,infrastructure=info,\
                                  ai_core=info,ai_speech=info";

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.server.json_logs());

    info!("Hablamos v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    if !config.inference.has_api_key() {
        warn!("No completion API key configured; set OPENROUTER_API_KEY");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.inference.default_model,
        scratch = %config.scratch.directory.display(),
        "Configuration loaded"
    );

    // Adapters
    let inference: Arc<dyn InferencePort> = Arc::new(
        OpenRouterInferenceAdapter::new(config.inference.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?,
    );
    let speech: Arc<dyn SpeechPort> = Arc::new(
        SpeechAdapter::new(config.speech.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?,
    );
    let store: Arc<dyn AudioStorePort> =
        Arc::new(LocalAudioStore::new(config.scratch.directory.clone()));

    if !speech.is_transcriber_available().await {
        warn!(
            executable = %config.speech.stt.executable_path.display(),
            model = %config.speech.stt.model_path.display(),
            "whisper.cpp is not available; /api/stt will fail"
        );
    }

    // Services
    let tutor_service = Arc::new(TutorService::with_options(
        Arc::clone(&inference),
        config.tutor.options(config.inference.max_tokens),
    ));
    let speech_service = Arc::new(
        SpeechService::new(Arc::clone(&speech), Arc::clone(&store))
            .with_language(config.tutor.speech_language.clone()),
    );
    let health_service = Arc::new(HealthService::new(inference, speech, store));

    let templates = TemplateEngine::with_templates_dir(config.server.templates_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load templates: {e}"))?;

    let cleanup_handle = config.scratch.retention().map(|retention| {
        spawn_scratch_cleanup_task(
            Arc::clone(&speech_service),
            retention,
            config.scratch.sweep_interval(),
        )
    });

    let config = Arc::new(config);
    let state = AppState {
        tutor_service,
        speech_service,
        health_service,
        templates,
        config: Arc::clone(&config),
    };

    // Add middleware (order matters: last added = outermost)
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.allowed_origins));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let (draining_tx, draining_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = draining_tx.send(());
    });

    tokio::select! {
        result = server.into_future() => result?,
        () = async {
            if draining_rx.await.is_ok() {
                info!("Waiting up to {:?} for connections to close...", shutdown_timeout);
                tokio::time::sleep(shutdown_timeout).await;
            } else {
                std::future::pending::<()>().await;
            }
        } => warn!("Graceful shutdown timed out, closing remaining connections"),
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
