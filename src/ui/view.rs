//! Display strings for query results. Everything here is plain data so the
//! component tree only lays it out.

use std::path::Path;

use crate::domain::calendar::{CalendarSpan, Elapsed};
use crate::domain::entities::dataset::Dataset;
use crate::domain::history::{LedgerEntry, ProductHistory, Summary};
use crate::domain::normalize::NormalizedRecord;
use crate::domain::roc_date::ParsedDate;
use crate::infra::import::columns::{
    COL_ATC_CODE, COL_CLASSIFICATION, COL_CLASSIFICATION_GROUP, COL_DISTRIBUTOR,
    COL_DOSAGE_FORM, COL_ENGLISH_NAME, COL_INGREDIENT, COL_LOCAL_NAME, COL_MANUFACTURER,
    COL_PRICE, COL_PRODUCT_CODE, COL_SINGLE_OR_COMPOUND,
};
use crate::infra::import::ImportError;
use crate::usecase::services::query_service::QueryOutcome;

pub const CANNOT_COMPUTE: &str = "無法計算";

pub const DISPLAY_COLUMNS: [&str; 12] = [
    COL_PRODUCT_CODE,
    COL_ENGLISH_NAME,
    COL_LOCAL_NAME,
    COL_INGREDIENT,
    COL_SINGLE_OR_COMPOUND,
    COL_PRICE,
    COL_DISTRIBUTOR,
    COL_MANUFACTURER,
    COL_DOSAGE_FORM,
    COL_CLASSIFICATION,
    COL_CLASSIFICATION_GROUP,
    COL_ATC_CODE,
];

pub const LEDGER_COLUMNS: [&str; 7] = [
    "前次有效起日",
    "本次有效起日",
    "前次價格",
    "本次價格",
    "間隔天數",
    "間隔年月日",
    "降幅",
];

pub fn unparseable(raw: &str) -> String {
    format!("無法解析（原始值：{raw}）")
}

pub fn format_date(date: &ParsedDate) -> String {
    match date {
        ParsedDate::Valid(date) => date.format("%Y-%m-%d").to_string(),
        ParsedDate::Failure { raw, .. } => unparseable(raw),
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

pub fn format_price(record: &NormalizedRecord<'_>) -> String {
    match record.price {
        Some(price) => format_number(price),
        None => unparseable(&record.raw.price_raw),
    }
}

pub fn format_days(days: Option<i64>) -> String {
    days.map(|d| format!("{d} 天"))
        .unwrap_or_else(|| CANNOT_COMPUTE.to_string())
}

pub fn format_span(span: Option<CalendarSpan>) -> String {
    span.map(|s| format!("{} 年 {} 個月 {} 天", s.years, s.months, s.days))
        .unwrap_or_else(|| CANNOT_COMPUTE.to_string())
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_summary_drop(drop: Option<f64>) -> String {
    drop.map(format_percent)
        .unwrap_or_else(|| CANNOT_COMPUTE.to_string())
}

/// Ledger rows leave an undefined drop blank.
pub fn format_ledger_drop(drop: Option<f64>) -> String {
    drop.map(format_percent).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRowView {
    pub predecessor_date: String,
    pub current_date: String,
    pub predecessor_price: String,
    pub current_price: String,
    pub days: String,
    pub span: String,
    pub drop: String,
}

impl LedgerRowView {
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.predecessor_date,
            &self.current_date,
            &self.predecessor_price,
            &self.current_price,
            &self.days,
            &self.span,
            &self.drop,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureView {
    /// Spreadsheet line, counting the header as line 1.
    pub line: usize,
    pub raw: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    pub product_code: String,
    pub notice: Option<String>,
    pub display_row: Vec<String>,
    pub summary: Vec<(&'static str, String)>,
    pub ledger: Vec<LedgerRowView>,
    pub failures: Vec<FailureView>,
}

fn display_row(record: &NormalizedRecord<'_>) -> Vec<String> {
    let raw = record.raw;
    let fields = &raw.display;
    [
        raw.product_code.as_str(),
        &fields.english_name,
        &fields.local_name,
        &fields.composition,
        &fields.single_or_compound,
        &raw.price_raw,
        &fields.distributor,
        &fields.manufacturer,
        &fields.dosage_form,
        &fields.classification,
        &fields.classification_group,
        &fields.atc_code,
    ]
    .iter()
    .map(|value| value.to_string())
    .collect()
}

fn summary_lines(
    earliest: &NormalizedRecord<'_>,
    latest: &NormalizedRecord<'_>,
    elapsed: Option<Elapsed>,
    drop: Option<f64>,
) -> Vec<(&'static str, String)> {
    vec![
        ("最早有效起日", format_date(&earliest.date)),
        ("最早價格", format_price(earliest)),
        ("最新有效起日", format_date(&latest.date)),
        ("最新價格", format_price(latest)),
        ("經歷時間", format_days(elapsed.map(|e| e.days))),
        ("經歷年月日", format_span(elapsed.map(|e| e.span))),
        ("價格降幅", format_summary_drop(drop)),
    ]
}

fn ledger_row(entry: &LedgerEntry<'_>) -> LedgerRowView {
    LedgerRowView {
        predecessor_date: format_date(&entry.predecessor.date),
        current_date: format_date(&entry.current.date),
        predecessor_price: format_price(&entry.predecessor),
        current_price: format_price(&entry.current),
        days: format_days(Some(entry.elapsed.days)),
        span: format_span(Some(entry.elapsed.span)),
        drop: format_ledger_drop(entry.price_drop),
    }
}

impl HistoryView {
    pub fn from_history(history: &ProductHistory<'_>) -> Self {
        let (notice, summary) = match &history.summary {
            Summary::Dated {
                earliest,
                latest,
                elapsed,
                price_drop,
            } => (
                None,
                summary_lines(earliest, latest, Some(*elapsed), *price_drop),
            ),
            Summary::Undated { first, last } => (
                Some("此藥品代號沒有可解析的有效起日，以下為檔案中的第一筆與最後一筆資料。".to_string()),
                summary_lines(first, last, None, None),
            ),
            Summary::Empty => (Some("此藥品代號沒有資料。".to_string()), Vec::new()),
        };

        let failures = history
            .failed
            .iter()
            .filter_map(|record| match &record.date {
                ParsedDate::Failure { raw, reason } => Some(FailureView {
                    line: record.raw.row_idx + 2,
                    raw: raw.clone(),
                    reason: reason.to_string(),
                }),
                ParsedDate::Valid(_) => None,
            })
            .collect();

        Self {
            product_code: history.product_code.clone(),
            notice,
            display_row: history.display_record().map(display_row).unwrap_or_default(),
            summary,
            ledger: history.ledger.iter().map(ledger_row).collect(),
            failures,
        }
    }
}

pub fn status_message(dataset_loaded: bool, outcome: Option<&QueryOutcome<'_>>) -> String {
    if !dataset_loaded {
        return "請先上傳 CSV 檔案。".to_string();
    }
    match outcome {
        None | Some(QueryOutcome::NoQuery) => "請輸入成分關鍵字進行查詢。".to_string(),
        Some(outcome) if outcome.product_count() == 0 => "查無符合成分的藥品資料。".to_string(),
        Some(outcome) => format!("查詢結果，共有 {} 個藥品代號：", outcome.product_count()),
    }
}

pub fn import_success_message(dataset: &Dataset) -> String {
    let file_name = Path::new(&dataset.source)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(&dataset.source);
    let mut message = format!("檔案已成功載入！{file_name}（{} 筆）", dataset.row_count());
    if dataset.skipped_rows > 0 {
        message.push_str(&format!(
            "，略過 {} 筆缺少藥品代號的資料",
            dataset.skipped_rows
        ));
    }
    message
}

pub fn import_error_message(err: &ImportError) -> String {
    match err {
        ImportError::MissingColumns(missing) => {
            format!("資料欄位設定錯誤：缺少欄位 {}", missing.join("、"))
        }
        ImportError::MissingHeader => "資料欄位設定錯誤：缺少標題列".to_string(),
        other => format!("匯入失敗：{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::record::RawRecord;
    use crate::domain::history::build;
    use crate::domain::normalize::normalize;

    fn rows(specs: &[(&str, &str)]) -> Vec<RawRecord> {
        specs
            .iter()
            .enumerate()
            .map(|(row_idx, (date, price))| RawRecord {
                row_idx,
                product_code: "AC1".to_string(),
                ingredient: Some("METFORMIN".to_string()),
                effective_date_raw: date.to_string(),
                price_raw: price.to_string(),
                ..RawRecord::default()
            })
            .collect()
    }

    #[test]
    fn format_number_trims_trailing_zeros() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.50), "12.5");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn cannot_compute_is_distinct_from_zero() {
        assert_eq!(format_summary_drop(Some(0.0)), "0.00%");
        assert_eq!(format_summary_drop(None), CANNOT_COMPUTE);
        assert_eq!(format_ledger_drop(Some(0.0)), "0.00%");
        assert_eq!(format_ledger_drop(None), "");
        assert_eq!(format_days(Some(0)), "0 天");
        assert_eq!(format_days(None), CANNOT_COMPUTE);
    }

    #[test]
    fn summary_renders_dates_span_and_drop() {
        let records = rows(&[("1090101", "100"), ("1100101", "80")]);
        let history = build(records.iter().map(normalize).collect());
        let view = HistoryView::from_history(&history);

        assert_eq!(view.notice, None);
        assert_eq!(
            view.summary,
            vec![
                ("最早有效起日", "2020-01-01".to_string()),
                ("最早價格", "100".to_string()),
                ("最新有效起日", "2021-01-01".to_string()),
                ("最新價格", "80".to_string()),
                ("經歷時間", "366 天".to_string()),
                ("經歷年月日", "1 年 0 個月 0 天".to_string()),
                ("價格降幅", "20.00%".to_string()),
            ]
        );
        assert_eq!(view.display_row.len(), DISPLAY_COLUMNS.len());
        assert_eq!(view.display_row[5], "80");
        assert_eq!(view.ledger.len(), 1);
        assert_eq!(view.ledger[0].drop, "20.00%");
    }

    #[test]
    fn undated_history_shows_explicit_placeholders() {
        let records = rows(&[("abc1234", "10"), ("99", "")]);
        let history = build(records.iter().map(normalize).collect());
        let view = HistoryView::from_history(&history);

        assert!(view.notice.is_some());
        assert_eq!(view.summary[0].1, "無法解析（原始值：abc1234）");
        assert_eq!(view.summary[2].1, "無法解析（原始值：99）");
        assert_eq!(view.summary[3].1, "無法解析（原始值：）");
        assert_eq!(view.summary[4].1, CANNOT_COMPUTE);
        assert_eq!(view.summary[5].1, CANNOT_COMPUTE);
        assert_eq!(view.summary[6].1, CANNOT_COMPUTE);
        assert!(view.ledger.is_empty());

        assert_eq!(view.failures.len(), 2);
        assert_eq!(view.failures[0].line, 2);
        assert_eq!(view.failures[0].raw, "abc1234");
        assert!(view.failures[0].reason.contains("non-digit"));
    }

    #[test]
    fn ledger_leaves_undefined_drop_blank() {
        let records = rows(&[("1080101", "0"), ("1090101", "5")]);
        let history = build(records.iter().map(normalize).collect());
        let view = HistoryView::from_history(&history);

        assert_eq!(view.ledger[0].drop, "");
        assert_eq!(view.ledger[0].days, "365 天");
        assert_eq!(view.summary[6].1, CANNOT_COMPUTE);
    }

    #[test]
    fn status_message_distinguishes_states() {
        assert_eq!(status_message(false, None), "請先上傳 CSV 檔案。");
        assert_eq!(
            status_message(true, Some(&QueryOutcome::NoQuery)),
            "請輸入成分關鍵字進行查詢。"
        );
        assert_eq!(
            status_message(true, Some(&QueryOutcome::Matches(Vec::new()))),
            "查無符合成分的藥品資料。"
        );
    }

    #[test]
    fn import_success_message_names_file_and_skipped_rows() {
        let dataset = Dataset {
            source: "/tmp/uploads/藥品給付.csv".to_string(),
            records: rows(&[("1090101", "1"), ("1100101", "2")]),
            skipped_rows: 1,
        };

        assert_eq!(
            import_success_message(&dataset),
            "檔案已成功載入！藥品給付.csv（2 筆），略過 1 筆缺少藥品代號的資料"
        );

        let clean = Dataset {
            skipped_rows: 0,
            ..dataset
        };
        assert_eq!(import_success_message(&clean), "檔案已成功載入！藥品給付.csv（2 筆）");
    }

    #[test]
    fn missing_columns_read_as_configuration_problem() {
        let err = ImportError::MissingColumns(vec!["成分".to_string(), "有效起日".to_string()]);
        assert_eq!(
            import_error_message(&err),
            "資料欄位設定錯誤：缺少欄位 成分、有效起日"
        );
    }
}
