/// 秒數轉為 9h9m9s 格式的字串
///
/// 例如 `format_seconds(3661.0, 2)` 會得到 `"1h1m1s"`，
/// `format_seconds(1.1, 2)` 會得到 `"1.1s"`。
#[must_use]
pub fn format_seconds(seconds: f64, max_decimals: usize) -> String {
    let int_seconds = seconds as u64;
    let partial_seconds = seconds % 60.0;
    let minutes = (int_seconds % 3600) / 60;
    let hours = int_seconds / 3600;

    let mut result = String::new();
    if hours > 0 {
        result.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        result.push_str(&format!("{minutes}m"));
    }
    if partial_seconds > 0.0 || result.is_empty() {
        let partial = clean_decimals(&format!("{partial_seconds:.max_decimals$}"));
        result.push_str(&format!("{partial}s"));
    }
    result
}

/// 去除小數尾端的零與小數點
///
/// 例如 `"3.1400"` 變成 `"3.14"`，`"5.0"` 變成 `"5"`。
#[must_use]
pub fn clean_decimals(number: &str) -> String {
    if !number.contains('.') {
        return number.to_string();
    }
    let trimmed = number.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
