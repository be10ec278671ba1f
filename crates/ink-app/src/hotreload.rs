use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use ink_core::config::RenderConfig;
use ink_core::traits::RandomSource;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::session::{Rendered, Session};

/// Message reçu par la boucle de rendu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// La config partagée a changé, re-tramer.
    Reload,
    /// Arrêt demandé (Ctrl-C).
    Stop,
}

/// Lance un thread qui surveille le fichier config, met à jour l'ArcSwap
/// et réveille la boucle de rendu.
///
/// Le répertoire parent est surveillé, pas le fichier : un éditeur qui
/// sauve par écriture temporaire + renommage remplace l'inode, et une
/// surveillance posée sur le fichier serait perdue après la première
/// sauvegarde. Seuls les événements qui nomment le fichier config comptent.
///
/// `adjust` est réappliqué après chaque rechargement (overrides CLI).
/// Retourne le Watcher (doit rester vivant tant que l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use arc_swap::ArcSwap;
/// use ink_core::config::RenderConfig;
/// use ink_app::hotreload::spawn_config_watcher;
/// use std::path::Path;
///
/// let config = Arc::new(ArcSwap::from_pointee(RenderConfig::default()));
/// let (tx, _rx) = flume::unbounded();
/// let _watcher = spawn_config_watcher(Path::new("config/default.toml"), &config, tx, |_| {});
/// ```
pub fn spawn_config_watcher<F>(
    config_path: &Path,
    config: &Arc<ArcSwap<RenderConfig>>,
    wake: flume::Sender<Signal>,
    adjust: F,
) -> Result<impl Watcher + use<F>>
where
    F: Fn(&mut RenderConfig) + Send + 'static,
{
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();
    let file_name = config_path
        .file_name()
        .with_context(|| format!("Chemin de config sans nom de fichier : {}", path.display()))?
        .to_os_string();
    let dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let Ok(event) = res else {
            return;
        };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        if !event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
        {
            return;
        }
        match ink_core::config::load_config(&path) {
            Ok(mut new_config) => {
                adjust(&mut new_config);
                config.store(Arc::new(new_config));
                log::info!("Config rechargée depuis {}", path.display());
                if wake.send(Signal::Reload).is_err() {
                    log::debug!("Boucle de rendu arrêtée, rechargement ignoré");
                }
            }
            Err(e) => {
                log::warn!("Erreur de rechargement config : {e:#}");
                // On garde l'ancienne config.
            }
        }
    })?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Impossible de surveiller {}", dir.display()))?;
    Ok(watcher)
}

/// Boucle de rendu sérialisée : un seul rendu en vol.
///
/// Les réveils accumulés pendant un rendu sont fusionnés ; seul l'état le
/// plus récent de `config` est tramé. S'arrête sur [`Signal::Stop`] ou
/// quand tous les émetteurs sont fermés. Retourne le nombre de rendus.
///
/// # Errors
/// Propagates the first error returned by `sink`.
pub fn run_render_loop<R, S>(
    session: &mut Session<R>,
    config: &ArcSwap<RenderConfig>,
    signals: &flume::Receiver<Signal>,
    mut sink: S,
) -> Result<usize>
where
    R: RandomSource,
    S: FnMut(&Rendered) -> Result<()>,
{
    let mut renders = 0;
    while let Ok(signal) = signals.recv() {
        let mut stop = signal == Signal::Stop;
        let mut superseded = 0usize;
        for pending in signals.try_iter() {
            match pending {
                Signal::Stop => stop = true,
                Signal::Reload => superseded += 1,
            }
        }
        if stop {
            log::info!("Arrêt demandé");
            break;
        }
        if superseded > 0 {
            log::debug!("{superseded} rechargement(s) supplanté(s)");
        }

        let latest = RenderConfig::clone(&config.load());
        let rendered = session.replace_config(latest);
        sink(&rendered)?;
        renders += 1;
    }
    Ok(renders)
}
