use serde::{Deserialize, Serialize};

use crate::component::export::OutputMode;
use crate::component::scene_detect::{
    DEFAULT_MIN_SCENE_SECS, DEFAULT_PROXY_WIDTH, DEFAULT_SENSITIVITY,
};

pub const MAX_RECENT_PATHS: usize = 5;

/// 使用者上次使用的設定，儲存於 settings.json
///
/// 欄位缺漏時用預設值補齊，老版本的設定檔照樣能讀。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// 靈敏度 (0-100)
    pub sensitivity: f64,
    /// 忽略比這個長度短的場景（秒）
    pub min_scene_secs: f64,
    /// 分析用的縮小寬度
    pub proxy_width: u32,
    /// 上次選的輸出格式
    pub mode: OutputMode,
    /// 最近開啟過的影片路徑
    pub recent_paths: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            min_scene_secs: DEFAULT_MIN_SCENE_SECS,
            proxy_width: DEFAULT_PROXY_WIDTH,
            mode: OutputMode::default(),
            recent_paths: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_detector_defaults() {
        let settings = UserSettings::default();
        assert!((settings.sensitivity - 88.0).abs() < f64::EPSILON);
        assert!((settings.min_scene_secs - 0.6).abs() < f64::EPSILON);
        assert_eq!(settings.proxy_width, 320);
        assert_eq!(settings.mode, OutputMode::CompoundClips);
        assert!(settings.recent_paths.is_empty());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: UserSettings = serde_json::from_str(r#"{"sensitivity": 70}"#).unwrap();
        assert!((settings.sensitivity - 70.0).abs() < f64::EPSILON);
        assert_eq!(settings.proxy_width, 320);
        assert_eq!(settings.mode, OutputMode::CompoundClips);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = UserSettings::default();
        settings.mode = OutputMode::Csv;
        settings.recent_paths.push("/videos/a.mp4".to_string());

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mode, OutputMode::Csv);
        assert_eq!(parsed.recent_paths, vec!["/videos/a.mp4"]);
    }
}
