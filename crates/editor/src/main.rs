//! Template Editor - command line entry point
//!
//! Loads settings from the data directory, connects to the template API,
//! and opens a template by id (or a PDF import blob from a file) to report
//! what it contains.
//!
//! ```text
//! template-editor <template-id>
//! template-editor --import <session-blob.json>
//! ```

use std::path::PathBuf;

use anyhow::Context;
use store::{HttpTemplateApi, SettingsManager};
use template_editor::{init_tracing, session_config, EditorApp, ImportOutcome};

fn data_dir() -> PathBuf {
    std::env::var_os("TEMPLATE_EDITOR_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".template-editor"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut settings_manager = SettingsManager::new(data_dir());
    settings_manager.load().await?;
    let settings = settings_manager.get().clone();

    init_tracing(&settings.logging.filter)?;
    tracing::info!(
        settings = %settings_manager.settings_path().display(),
        base_url = %settings.api.base_url,
        "Starting template editor"
    );

    let api = HttpTemplateApi::new(&settings.api)?;
    let mut app = EditorApp::new(api, session_config(&settings.editor));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag, path] if flag == "--import" => {
            let blob = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path))?;
            if app.open_import(&blob) == ImportOutcome::RedirectToList {
                anyhow::bail!("{} is not a usable PDF import", path);
            }
        }
        [id] => app.open(id).await?,
        _ => anyhow::bail!("usage: template-editor <template-id> | --import <file>"),
    }

    let session = app.session();
    println!(
        "{} ({:?}): {} elements on {} pages",
        app.meta().effective_name(),
        app.meta().kind,
        session.elements().len(),
        session.pages().len()
    );
    for page in 1..=session.pages().len() as u32 {
        for element in session.elements_on_page(page) {
            println!(
                "  p{} {} at ({:.0}, {:.0}) {}x{}",
                page,
                element.kind.display_name(),
                element.x,
                element.y,
                element.width,
                element.height
            );
        }
    }
    Ok(())
}
