//! Application - App Initialization and Window Management
//!
//! Main entry point for the GPUI application.

use gpui::{
    actions, px, App, AppContext, Application, Bounds, SharedString, TitlebarOptions,
    WindowBounds, WindowOptions,
};

use crate::app::entities::AppEntities;
use crate::app::workspace::Workspace;
use crate::domain::config::AppConfig;
use crate::eventing::app_event::AppEvent;
use crate::i18n::Locale;
use crate::services::hub::ServiceHub;
use crate::utils::config_store;

actions!(ctr_admin, [Quit]);

/// Run the CTR Admin application
pub fn run_app() {
    Application::new().run(|cx: &mut App| {
        // Set up action handlers
        cx.on_action(|_: &Quit, cx: &mut App| cx.quit());

        // Quit the app when all windows are closed
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        // Load local configuration (API endpoint, UI prefs, saved views)
        let config = match config_store::load_config::<AppConfig>(config_store::CONFIG_FILE) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("config load failed, using defaults: {e}");
                AppConfig::default()
            }
        };

        // Initialize global entities
        let entities = AppEntities::init(cx);
        entities.i18n.update(cx, |i18n, _cx| {
            i18n.set_locale(Locale::from_code(&config.ui.locale));
        });
        cx.set_global(entities.clone());

        // Create event channel for service -> UI communication
        let (event_tx, event_rx) = flume::unbounded::<AppEvent>();

        // Initialize service hub
        let service_hub = ServiceHub::new(config, event_tx.clone());
        service_hub.log(AppEvent::info("ServiceHub initialized"));
        cx.set_global(service_hub);

        // Create main window
        let bounds = Bounds::centered(None, gpui::size(px(1440.0), px(900.0)), cx);
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(SharedString::from("CTR Admin")),
                appears_transparent: true,
                traffic_light_position: Some(gpui::point(px(9.0), px(9.0))),
            }),
            ..Default::default()
        };

        cx.open_window(window_options, |_window, cx| {
            cx.new(|cx| Workspace::new(entities.clone(), event_rx, cx))
        })
        .expect("Failed to open the main window");

        cx.activate(true);
    });
}
