use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::dataset::Dataset;
use crate::ui::state::app_state::AppState;
use crate::ui::style::{
    notice_style, numeric_cell_style, table_cell_style, table_container_style,
    table_header_cell_style, table_style, toolbar_style,
};
use crate::ui::view::{
    import_error_message, import_success_message, status_message, HistoryView,
    DISPLAY_COLUMNS, LEDGER_COLUMNS,
};
use crate::usecase::services::import_service::{import_dataset, SPREADSHEET_EXTENSIONS};
use crate::usecase::services::query_service::{query, QueryOutcome};

#[component]
pub fn App() -> Element {
    let AppState {
        mut dataset,
        mut ingredient,
        mut busy,
        mut import_status,
    } = AppState::new();

    let handle_import = move |_: Event<MouseData>| {
        if busy() {
            return;
        }

        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("Excel", &SPREADSHEET_EXTENSIONS)
            .pick_file()
        else {
            import_status.set("已取消匯入".to_string());
            return;
        };

        busy.set(true);
        import_status.set(format!("正在匯入 {}", file_path.display()));

        match import_dataset(&file_path) {
            Ok(loaded) => {
                import_status.set(import_success_message(&loaded));
                dataset.set(Some(loaded));
            }
            Err(err) => {
                tracing::warn!(path = %file_path.display(), error = %err, "import failed");
                import_status.set(import_error_message(&err));
                dataset.set(None);
            }
        }
        busy.set(false);
    };

    let (message, views) = {
        let guard = dataset.read();
        let loaded: &Option<Dataset> = &guard;
        let outcome = loaded.as_ref().map(|data| query(data, &ingredient()));
        let views: Vec<HistoryView> = match &outcome {
            Some(QueryOutcome::Matches(histories)) => {
                histories.iter().map(HistoryView::from_history).collect()
            }
            _ => Vec::new(),
        };
        (status_message(loaded.is_some(), outcome.as_ref()), views)
    };

    rsx! {
        div {
            style: "padding: 12px;",
            h2 { "藥品成分查詢與價格變化分析" }
            nav {
                style: "{toolbar_style()}",
                button {
                    disabled: busy(),
                    onclick: handle_import,
                    "上傳藥品資料"
                }
                span { "{import_status}" }
            }
            div {
                style: "{toolbar_style()}",
                span { "成分關鍵字" }
                input {
                    r#type: "text",
                    style: "min-width: 320px;",
                    placeholder: "例如：OLANZAPINE 5 MG",
                    value: "{ingredient}",
                    oninput: move |event| ingredient.set(event.value()),
                }
            }
            p { "{message}" }
            for view in views.iter() {
                HistoryPanel { key: "{view.product_code}", view: view.clone() }
            }
        }
    }
}

#[component]
fn HistoryPanel(view: HistoryView) -> Element {
    rsx! {
        section {
            style: "margin: 16px 0; padding-top: 8px; border-top: 1px solid #ddd;",
            h3 { "藥品代號：{view.product_code}" }
            {view.notice.iter().map(|notice| rsx!(
                p { style: "{notice_style()}", "{notice}" }
            ))}

            div {
                style: "{table_container_style()}",
                table { style: "{table_style()}",
                    thead {
                        tr {
                            for header in DISPLAY_COLUMNS {
                                th { style: "{table_header_cell_style()}", "{header}" }
                            }
                        }
                    }
                    tbody {
                        tr {
                            for value in view.display_row.iter() {
                                td { style: "{table_cell_style()}", "{value}" }
                            }
                        }
                    }
                }
            }

            ul {
                for (label, value) in view.summary.iter() {
                    li { "{label}：{value}" }
                }
            }

            if !view.ledger.is_empty() {
                h4 { "價格調整紀錄" }
                div {
                    style: "{table_container_style()}",
                    table { style: "{table_style()}",
                        thead {
                            tr {
                                for header in LEDGER_COLUMNS {
                                    th { style: "{table_header_cell_style()}", "{header}" }
                                }
                            }
                        }
                        tbody {
                            {view.ledger.iter().map(|row| rsx!(
                                tr {
                                    {row.cells().into_iter().enumerate().map(|(idx, cell)| {
                                        let style = if idx >= 2 {
                                            numeric_cell_style()
                                        } else {
                                            table_cell_style()
                                        };
                                        rsx!(td { style: "{style}", "{cell}" })
                                    })}
                                }
                            ))}
                        }
                    }
                }
            }

            if !view.failures.is_empty() {
                h4 { "有效起日無法解析的資料" }
                div {
                    style: "{table_container_style()}",
                    table { style: "{table_style()}",
                        thead {
                            tr {
                                th { style: "{table_header_cell_style()}", "列號" }
                                th { style: "{table_header_cell_style()}", "原始值" }
                                th { style: "{table_header_cell_style()}", "原因" }
                            }
                        }
                        tbody {
                            for failure in view.failures.iter() {
                                tr {
                                    td { style: "{table_cell_style()}", "{failure.line}" }
                                    td { style: "{table_cell_style()}", "{failure.raw}" }
                                    td { style: "{table_cell_style()}", "{failure.reason}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
