mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;


use crate::config::AppConfig;

fn main() {
    let config = AppConfig::from_env().expect("should resolve application data directories");
    config.init_tracing();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        "starting drug price history"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("藥品價格歷程"))
                .with_data_directory(config.webview_data_dir),
        )
        .launch(app::App);
}
