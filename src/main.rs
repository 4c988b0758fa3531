use anyhow::anyhow;

use xypad::controller::PadController;
use xypad::gui::XYPadApp;
use xypad::host::HostParams;
use xypad::logging;
use xypad::shared_state::{AppConfig, Variant};

fn main() -> anyhow::Result<()> {
    // Settings decide the log level, so read them before logging exists
    let loaded = AppConfig::load();
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    let _log_guard = logging::init(config.debug_logging);

    tracing::info!("=== XYPad v{} ===", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(Some(_)) => tracing::info!("[Config] Loaded settings"),
        Ok(None) => tracing::info!("[Config] No settings file yet, using defaults"),
        Err(e) => tracing::warn!("[Config] Could not load settings ({}), using defaults", e),
    }
    tracing::info!("[Main] Variant: {:?}", config.variant);

    // The editor mirrors into host slots; running on its own we host them in-process
    let host = match config.variant {
        Variant::Standalone => None,
        Variant::PluginEditor => Some(HostParams::default()),
    };

    let size = config.window_size();
    let title = match config.variant {
        Variant::Standalone => "XYPad",
        Variant::PluginEditor => "XYPad Editor",
    };

    let mut viewport_builder = egui::ViewportBuilder::default()
        .with_inner_size(size)
        .with_title(title)
        .with_resizable(config.variant == Variant::Standalone);

    // Apply position if saved
    if let Some(pos) = config.window_position {
        viewport_builder = viewport_builder.with_position([pos[0], pos[1]]);
    }

    let options = eframe::NativeOptions {
        viewport: viewport_builder,
        ..Default::default()
    };

    let controller = PadController::with_host(config, host);

    tracing::info!("[Main] Starting GUI...");

    // Run the app (this blocks until window closes)
    eframe::run_native(
        "XYPad",
        options,
        Box::new(|_cc| Ok(Box::new(XYPadApp::new(controller)))),
    )
    .map_err(|e| anyhow!("GUI failed: {}", e))?;

    tracing::info!("[Main] ✓ Shutdown complete");
    Ok(())
}
