use log::{debug, warn};
use regex::Regex;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use thiserror::Error;

use super::cut_timeline::CutTimeline;
use crate::event_bus::EventBus;
use crate::tools::VideoAttr;

pub const DEFAULT_SENSITIVITY: f64 = 88.0;
pub const DEFAULT_PROXY_WIDTH: u32 = 320;
pub const DEFAULT_MIN_SCENE_SECS: f64 = 0.6;

/// select 濾鏡把選中的幀時間寫到 stderr，格式固定為
/// `[Parsed_metadata_2 @ 0x...] frame:150 pts:150150 pts_time:5.005`
static CUT_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Parsed_metadata.*pts_time:(\d+\.?\d*)").expect("剪切時間的 regex 無效")
});

/// 場景偵測失敗原因
///
/// 使用者要求停止不是錯誤，偵測會回傳目前為止的部分結果。
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("無法啟動 ffmpeg（{program}）: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg 場景分析失敗（exit code {code:?}）:\n{log}")]
    Analysis { code: Option<i32>, log: String },

    #[error("等待 ffmpeg 結束時失敗: {0}")]
    Wait(#[from] std::io::Error),
}

/// 場景偵測設定
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// ffmpeg 執行檔路徑（測試可換成假的分析程式）
    pub ffmpeg: PathBuf,
    /// 靈敏度 (0-100)，越高偵測到的剪切越多
    pub sensitivity: f64,
    /// 分析前先縮小到的寬度，只為了加速，不影響偵測到的時間點
    pub proxy_width: u32,
    /// 忽略比這個長度短的場景（秒），避免雜訊
    pub min_scene_secs: f64,
    /// 從這個時間點開始分析（秒）
    pub start_time: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            sensitivity: DEFAULT_SENSITIVITY,
            proxy_width: DEFAULT_PROXY_WIDTH,
            min_scene_secs: DEFAULT_MIN_SCENE_SECS,
            start_time: 0.0,
        }
    }
}

/// 使用 ffmpeg 找出場景變換的時間點
///
/// 濾鏡鏈：
/// - `scale`: 依長寬比縮小到 `proxy_width`，加速分析
/// - `select`: 場景變換機率超過閾值的幀才通過
/// - `metadata=print`: 把選中的幀時間寫到 stderr
///
/// stderr 是唯一的資料通道，一行一行即時讀取，每確認一個剪切就透過
/// `bus` 發布進度。`bus` 的停止請求會終止 ffmpeg，已接受的邊界保留，
/// 中斷視為正常完成而非錯誤。
pub fn detect_cuts(
    v: &VideoAttr,
    bus: &EventBus,
    config: &DetectorConfig,
) -> Result<CutTimeline, DetectError> {
    let threshold = 1.0 - config.sensitivity / 100.0;
    let filter = format!(
        "scale={}:-1,select='gt(scene,{threshold})',metadata=print",
        config.proxy_width
    );

    debug!(
        "場景偵測設定: threshold={threshold}, proxy_width={}, min_scene_secs={}, start_time={}",
        config.proxy_width, config.min_scene_secs, config.start_time
    );

    let mut command = Command::new(&config.ffmpeg);
    command
        .arg("-hide_banner")
        .arg("-an") // 不處理音訊
        .args(["-ss", &config.start_time.to_string()])
        .arg("-i")
        .arg(&v.path)
        .args(["-vf", &filter])
        .args(["-f", "null", "-"]) // 不產生輸出影片
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| DetectError::Launch {
        program: config.ffmpeg.display().to_string(),
        source,
    })?;
    let stderr = child.stderr.take();

    let child = Arc::new(Mutex::new(child));
    let stopped = Arc::new(AtomicBool::new(false));

    {
        let child = Arc::clone(&child);
        let stopped = Arc::clone(&stopped);
        bus.subscribe_stop(move || {
            stopped.store(true, Ordering::SeqCst);
            if let Ok(mut child) = child.lock() {
                // 終止 ffmpeg 讓 stderr 收到 EOF，讀取迴圈才能醒來
                if let Err(e) = child.kill() {
                    debug!("ffmpeg 已自行結束: {e}");
                }
            }
        });
    }

    let result = stream_cuts(v, bus, config, &child, stderr);

    // 不論成功、中斷或失敗都要解除訂閱，避免殘留到下一次偵測
    bus.unsubscribe_stop();

    let (mut timeline, analysis_log, status) = result?;

    timeline.seal(v.duration_seconds);
    bus.emit_progress(1.0, timeline.stamps());

    if !stopped.load(Ordering::SeqCst) && !status.success() {
        return Err(DetectError::Analysis {
            code: status.code(),
            log: analysis_log,
        });
    }

    if stopped.load(Ordering::SeqCst) {
        warn!("場景偵測被要求停止，保留目前的 {} 個邊界", timeline.len());
    }

    Ok(timeline)
}

/// 逐行讀取 stderr 直到關閉，然後等 ffmpeg 結束
fn stream_cuts(
    v: &VideoAttr,
    bus: &EventBus,
    config: &DetectorConfig,
    child: &Arc<Mutex<Child>>,
    stderr: Option<std::process::ChildStderr>,
) -> Result<(CutTimeline, String, std::process::ExitStatus), DetectError> {
    let mut timeline = CutTimeline::new(config.start_time);
    let mut analysis_log = String::new();

    if let Some(stderr) = stderr {
        let mut reader = BufReader::new(stderr);
        let mut line = String::new();
        while let Ok(bytes) = reader.read_line(&mut line) {
            if bytes == 0 {
                break;
            }

            analysis_log.push_str(&line);

            if let Some(cut_time) = parse_cut_time(&line) {
                if timeline.accept(cut_time, config.min_scene_secs) {
                    bus.emit_progress(cut_time / v.duration_seconds, timeline.stamps());
                }
            }

            line.clear();
        }
    }

    let status = match child.lock() {
        Ok(mut child) => child.wait()?,
        Err(poisoned) => poisoned.into_inner().wait()?,
    };

    Ok((timeline, analysis_log, status))
}

/// 從診斷行取出剪切時間
///
/// 格式不符或數字壞掉的行不是錯誤，回傳 None 略過即可。
fn parse_cut_time(line: &str) -> Option<f64> {
    CUT_TIME_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cut_time_matches_metadata_lines() {
        let line = "[Parsed_metadata_2 @ 0x7f9b8c] frame:150  pts:150150  pts_time:5.005";
        assert_eq!(parse_cut_time(line), Some(5.005));
    }

    #[test]
    fn test_parse_cut_time_integer_seconds() {
        let line = "[Parsed_metadata_2 @ 0x600] frame:120  pts:120120  pts_time:4";
        assert_eq!(parse_cut_time(line), Some(4.0));
    }

    #[test]
    fn test_parse_cut_time_ignores_other_lines() {
        assert_eq!(parse_cut_time("frame=  305 fps= 94 q=-0.0 size=N/A"), None);
        assert_eq!(parse_cut_time("[libx264 @ 0x7f] pts_time:5.0"), None);
        assert_eq!(parse_cut_time(""), None);
    }

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.ffmpeg, PathBuf::from("ffmpeg"));
        assert!((config.sensitivity - 88.0).abs() < f64::EPSILON);
        assert_eq!(config.proxy_width, 320);
        assert!((config.min_scene_secs - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_launch_error_for_missing_program() {
        let v = test_video();
        let bus = EventBus::new();
        let config = DetectorConfig {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ..DetectorConfig::default()
        };

        let result = detect_cuts(&v, &bus, &config);
        assert!(matches!(result, Err(DetectError::Launch { .. })));
        // 啟動失敗也不能殘留停止訂閱
        assert!(!bus.has_stop_subscriber());
    }

    fn test_video() -> VideoAttr {
        VideoAttr {
            path: PathBuf::from("/videos/test.mp4"),
            stem: "test".to_string(),
            width: 1920,
            height: 1080,
            duration_seconds: 15.1,
            fps_numerator: 30000,
            fps_denominator: 1001,
            codec_name: "h264".to_string(),
            color_primaries: "bt709".to_string(),
            color_trc: "bt709".to_string(),
            colorspace: "bt709".to_string(),
        }
    }
}
