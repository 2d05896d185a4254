pub fn toolbar_style() -> &'static str {
    "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;"
}

pub fn table_container_style() -> &'static str {
    "overflow: auto; max-width: 100%; margin: 8px 0;"
}

pub fn table_style() -> &'static str {
    "border-collapse: collapse; width: 100%; border: 1px solid #bbb;"
}

pub fn table_header_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px; background: #f2f2f2; white-space: nowrap;"
}

pub fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px;"
}

pub fn numeric_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px; text-align: right;"
}

pub fn notice_style() -> &'static str {
    "color: #a40; margin: 4px 0;"
}
