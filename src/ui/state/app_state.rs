use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::dataset::Dataset;

/// Per-window session state. Nothing here is shared between windows.
pub struct AppState {
    pub dataset: Signal<Option<Dataset>>,
    pub ingredient: Signal<String>,
    pub busy: Signal<bool>,
    pub import_status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            dataset: use_signal(|| None::<Dataset>),
            ingredient: use_signal(String::new),
            busy: use_signal(|| false),
            import_status: use_signal(|| "尚未載入檔案".to_string()),
        }
    }
}
