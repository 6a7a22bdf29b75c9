//! Selector lifecycle controller.
//!
//! Owns the selector context, applies UI commands one at a time and emits
//! updates for presentation layers.

use super::surface::SurfaceUpdate;
use anyhow::Result;
use auton_selector::{CellIndex, SelectorContext, SelectorEvent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiCommand {
    Choose(CellIndex),
    Trigger,
    ToggleVisibility,
    /// Drop the selector and build a fresh one from storage.
    Reload,
    Quit,
}

/// Messages sent back to UI layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiUpdate {
    Surface(SurfaceUpdate),
    Info(String),
}

/// Apply UI commands to the selector until the UI quits or its channel closes.
pub(crate) async fn run_controller(
    mut ctx: SelectorContext,
    update_tx: UnboundedSender<UiUpdate>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    ctx.get().create();
    let info = |msg: String| {
        let _ = update_tx.send(UiUpdate::Info(msg));
    };

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UiCommand::Choose(at) => {
                let selector = ctx.get();
                selector.handle_event(SelectorEvent::CellChosen(at));
                tracing::info!(selected = selector.selected_auton_name(), "operator choice");
            }
            UiCommand::Trigger => {
                let selector = ctx.get();
                let name = selector.selected_auton_name().to_string();
                let ran = selector.is_auton_selected();
                selector.handle_event(SelectorEvent::TriggerActivated);
                if ran {
                    info(format!("Ran {name}"));
                } else {
                    info("No auton selected".into());
                }
            }
            UiCommand::ToggleVisibility => {
                let selector = ctx.get();
                let visible = selector.is_visible();
                selector.set_visibility(!visible);
            }
            UiCommand::Reload => {
                ctx.destroy();
                let selector = ctx.get();
                selector.create();
                info(format!(
                    "Reloaded; selected: {}",
                    selector.selected_auton_name()
                ));
            }
            UiCommand::Quit => break,
        }
    }

    ctx.destroy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ChannelSurface;
    use auton_selector::{GridSize, MemoryStore, Registry, SelectorSurface};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn commands_drive_selection_and_dispatch() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        registry.register("BlueLeft", || {});
        let h = hits.clone();
        registry.register("BlueRight", move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        let store = Arc::new(MemoryStore::new());

        let (update_tx, mut update_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let surface_tx = update_tx.clone();
        let ctx = SelectorContext::new(registry, store.clone(), GridSize::default(), move || {
            Box::new(ChannelSurface::new(surface_tx.clone())) as Box<dyn SelectorSurface>
        });

        for cmd in [
            UiCommand::Choose(CellIndex::new(1, 0)),
            UiCommand::Trigger,
            UiCommand::ToggleVisibility,
            UiCommand::Reload,
            UiCommand::Quit,
        ] {
            cmd_tx.send(cmd).expect("queue command");
        }
        run_controller(ctx, update_tx, cmd_rx).await.expect("controller");

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(store.record().as_deref(), Some("BlueRight"));

        let mut updates = Vec::new();
        while let Ok(u) = update_rx.try_recv() {
            updates.push(u);
        }
        assert!(matches!(
            updates.first(),
            Some(UiUpdate::Surface(SurfaceUpdate::Built { status, .. })) if status == "Selected: No Auton"
        ));
        assert!(updates.contains(&UiUpdate::Surface(SurfaceUpdate::Status(
            "Selected: BlueRight".into()
        ))));
        assert!(updates.contains(&UiUpdate::Surface(SurfaceUpdate::SelectedCell(Some(
            CellIndex::new(1, 0)
        )))));
        assert!(updates.contains(&UiUpdate::Info("Ran BlueRight".into())));
        assert!(updates.contains(&UiUpdate::Info("Reloaded; selected: BlueRight".into())));
        assert_eq!(
            updates
                .iter()
                .filter(|u| matches!(u, UiUpdate::Surface(SurfaceUpdate::Hidden { hidden: true, .. })))
                .count(),
            4
        );
        assert_eq!(
            updates.last(),
            Some(&UiUpdate::Surface(SurfaceUpdate::TornDown))
        );
    }
}
