use crate::tools::clean_decimals;

/// CSV 輸出，一列一個片段
///
/// 例如 `[0, 5, 10, 15]` 會得到：
/// ```text
/// start,end
/// 0,5
/// 5,10
/// 10,15
/// ```
#[must_use]
pub fn to_csv_clips(stamps: &[f64]) -> String {
    let mut out = vec!["start,end".to_string()];
    for pair in stamps.windows(2) {
        out.push(format!(
            "{},{}",
            clean_decimals(&pair[0].to_string()),
            clean_decimals(&pair[1].to_string()),
        ));
    }
    out.join("\n") + "\n"
}
