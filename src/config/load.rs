use crate::config::types::UserSettings;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.json";

/// 從工作目錄的 settings.json 載入上次使用的設定
///
/// 檔案不存在時回傳預設值；壞掉的檔案是錯誤，由呼叫端決定
/// 要不要退回預設值。
pub fn load_settings() -> Result<UserSettings> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))
}
