use anyhow::Context;
use scenedesk_app::views::submit_designer_form;
use scenedesk_app::{AppConfig, AppState};
use scenedesk_core::validation::DesignerForm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "scenedesk_app=debug,scenedesk_api=debug,scenedesk_db=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = AppConfig::from_env();
    tracing::info!(
        storage = ?config.storage,
        latency_ms = config.api.latency.as_millis() as u64,
        "Loaded configuration",
    );

    // --- App state ---
    let state = AppState::new(config);
    state.load().await;
    if let Some(error) = state.designers.error() {
        tracing::error!(%error, "Designers failed to load");
    }

    // --- Optional designer from the environment ---
    if let Ok(raw) = std::env::var("SCENEDESK_DEMO_DESIGNER") {
        let (full_name, working_hours) = raw
            .split_once('|')
            .context("SCENEDESK_DEMO_DESIGNER must look like 'Full Name|HH:MM-HH:MM'")?;
        let form = DesignerForm::new(full_name, working_hours);
        match submit_designer_form(&state.designers, &form).await {
            Ok(()) => tracing::info!(full_name, "Demo designer submitted"),
            Err(errors) => tracing::warn!(?errors, "Demo designer rejected"),
        }
    }

    for row in state.designer_rows() {
        tracing::info!(
            id = %row.id,
            full_name = %row.full_name,
            working_hours = %row.working_hours,
            attached_objects = row.attached_objects_count,
            "Designer",
        );
    }

    state.shutdown();
    Ok(())
}
