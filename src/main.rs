//! CTR Admin GUI Client - Main Entry Point
//!
//! Native administration client for the clinical trial reporting platform.

use ctr_admin_gui::app::application::run_app;
use ctr_admin_gui::utils::config_store;

fn main() {
    // Initialize tracing; logs go to a daily-rolling file in the app
    // data directory when it is writable, stderr otherwise.
    let file_layer = config_store::app_data_dir()
        .ok()
        .map(|dir| tracing_appender::rolling::daily(dir, "ctr-admin-gui.log"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        );

    match file_layer {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            subscriber.with_writer(writer).init();
            // Keep the flush guard alive for the process lifetime.
            std::mem::forget(guard);
        }
        None => subscriber.init(),
    }

    tracing::info!("Starting CTR Admin GUI Client...");

    // Run the GPUI application
    run_app();
}
