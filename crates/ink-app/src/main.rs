use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use clap::Parser;
use ink_app::cli::Cli;
use ink_app::hotreload::{self, Signal};
use ink_app::output;
use ink_app::session::Session;
use ink_core::config::RenderConfig;
use ink_dither::DitherEngine;
use ink_source::image::ImageSource;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider --watch, charger la config puis appliquer les overrides CLI
    cli.validate_watch()?;
    let mut config = resolve_config(&cli.config)?;
    cli.apply_overrides(&mut config);

    // 4. Décoder l'image (conservée intacte pour chaque rendu)
    let source = ImageSource::new(&cli.image)?;
    let engine = match cli.seed {
        Some(seed) => DitherEngine::seeded(seed),
        None => DitherEngine::new(),
    };
    let mut session = Session::new(&source, config.clone(), engine);

    // 5. Premier rendu
    let png = cli.output_path();
    let ascii_out = cli.ascii_out.clone();
    let first = session.render();
    output::write_outputs(&first, &png, ascii_out.as_deref())?;

    if !cli.watch {
        return Ok(());
    }

    // 6. Mode watch : re-tramer à chaque modification de la config
    let shared = Arc::new(ArcSwap::from_pointee(config));
    let (tx, rx) = flume::unbounded();

    let stop_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(Signal::Stop);
    })
    .context("Impossible d'installer le handler Ctrl-C")?;

    let overrides = cli.clone();
    let _watcher = hotreload::spawn_config_watcher(&cli.config, &shared, tx, move |c| {
        overrides.apply_overrides(c);
    })?;
    log::info!("Surveillance de {} (Ctrl-C pour quitter)", cli.config.display());

    let renders = hotreload::run_render_loop(&mut session, &shared, &rx, |rendered| {
        output::write_outputs(rendered, &png, ascii_out.as_deref())
    })?;
    log::info!("{renders} rendu(s) en mode watch");
    Ok(())
}

/// Config file if present, defaults otherwise.
fn resolve_config(path: &Path) -> Result<RenderConfig> {
    if path.exists() {
        ink_core::config::load_config(path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(RenderConfig::default())
    }
}
