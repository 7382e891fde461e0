use anyhow::{Context, Result, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::tools::format::{clean_decimals, format_seconds};

/// file:// URI 不需要跳脫的字元（與路徑分隔符）
const URI_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// 影片屬性
///
/// 建立後不再變動。幀率以整數分數保存（例如 30000/1001 = 29.97fps），
/// 所有時間換算都必須用分數做，`fps()` 只供顯示。
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAttr {
    pub path: PathBuf,
    pub stem: String,
    pub width: u32,
    pub height: u32,
    pub duration_seconds: f64,
    pub fps_numerator: i64,
    pub fps_denominator: i64,
    pub codec_name: String,
    pub color_primaries: String,
    pub color_trc: String,
    pub colorspace: String,
}

#[derive(Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
    streams: Option<Vec<ProbeStream>>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Deserialize, Default)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    r_frame_rate: Option<String>,
    color_primaries: Option<String>,
    color_trc: Option<String>,
    colorspace: Option<String>,
}

impl VideoAttr {
    /// 使用 ffprobe 取得影片屬性
    pub fn probe(path: &Path, ffprobe: &Path) -> Result<Self> {
        let output = Command::new(ffprobe)
            .args([
                "-hide_banner",
                "-select_streams",
                "v:0",
                "-show_entries",
                "format=duration:stream=width,height,duration,r_frame_rate,\
                 codec_name,codec_type,color_trc,colorspace,color_primaries",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("ffprobe 執行失敗: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::from_probe_json(&stdout, path)
    }

    /// 解析 ffprobe 的 JSON 輸出
    fn from_probe_json(json: &str, path: &Path) -> Result<Self> {
        let probe: ProbeOutput =
            serde_json::from_str(json).with_context(|| "無法解析 ffprobe 輸出")?;

        let stream = probe
            .streams
            .and_then(|mut streams| {
                if streams.is_empty() {
                    None
                } else {
                    Some(streams.remove(0))
                }
            })
            .ok_or_else(|| anyhow::anyhow!("不是影片檔案: {}", path.display()))?;

        if stream.codec_type.as_deref() != Some("video") {
            bail!("不是影片檔案: {}", path.display());
        }

        let width = stream
            .width
            .ok_or_else(|| anyhow::anyhow!("無法取得影片寬度"))?;
        let height = stream
            .height
            .ok_or_else(|| anyhow::anyhow!("無法取得影片高度"))?;

        // 影片長度優先從 format 讀，其次從 stream
        let duration_seconds = probe
            .format
            .and_then(|f| f.duration)
            .or(stream.duration)
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);
        if duration_seconds <= 0.0 {
            bail!("無法處理長度為零或未知的影片");
        }

        let (fps_numerator, fps_denominator) = stream
            .r_frame_rate
            .as_deref()
            .and_then(parse_frame_rate)
            .ok_or_else(|| anyhow::anyhow!("無法解析影片幀率"))?;

        let stem = path
            .file_stem()
            .map_or_else(|| "video".to_string(), |s| s.to_string_lossy().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            stem,
            width,
            height,
            duration_seconds,
            fps_numerator,
            fps_denominator,
            codec_name: stream.codec_name.unwrap_or_default(),
            color_primaries: stream.color_primaries.unwrap_or_default(),
            color_trc: stream.color_trc.unwrap_or_default(),
            colorspace: stream.colorspace.unwrap_or_default(),
        })
    }

    /// 顯示用的幀率，時間換算一律用整數分數
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps_numerator as f64 / self.fps_denominator as f64
    }

    /// 單行摘要，例如 `1920x1080    29.97fps    15.1s    H.264`
    #[must_use]
    pub fn summary(&self) -> String {
        [
            format!("{}x{}", self.width, self.height),
            format!("{}fps", clean_decimals(&format!("{:.2}", self.fps()))),
            format_seconds(self.duration_seconds, 2),
            self.pretty_codec_name().to_string(),
        ]
        .join("    ")
    }

    #[must_use]
    pub fn pretty_codec_name(&self) -> &str {
        // ffmpeg -codecs | grep '^...V'
        match self.codec_name.as_str() {
            "dnxhd" => "DNxHD",
            "dvvideo" => "DV (Digital Video)",
            "h264" => "H.264",
            "hevc" => "H.265",
            "jpeg2000" => "JPEG 2000",
            "mpeg4" => "MPEG-4 Part 2",
            "prores" => "ProRes",
            "qtrle" => "QuickTime RLE",
            "rawvideo" => "Uncompressed",
            other => other,
        }
    }

    /// FCPXML 的 colorSpace 代碼，未知組合一律當成 Rec. 709
    #[must_use]
    pub fn fcp_color_space(&self) -> &'static str {
        match (
            self.color_primaries.as_str(),
            self.color_trc.as_str(),
            self.colorspace.as_str(),
        ) {
            ("bt709", "bt709", "bt709") => "1-1-1",
            ("smpte170m", "bt709", "smpte170m") => "6-1-6",
            ("bt470bg", "bt709", "smpte170m") => "5-1-6",
            ("bt2020", "bt709", "bt2020nc") => "9-1-9",
            ("bt2020", "smpte2084", "bt2020nc") => "9-16-9",
            ("bt2020", "arib-std-b67", "bt2020nc") => "9-18-9",
            _ => "1-1-1",
        }
    }

    /// 絕對路徑的 file:// URI，供 FCPXML 的 media-rep 使用
    #[must_use]
    pub fn file_uri(&self) -> String {
        let absolute = std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone());
        let encoded = utf8_percent_encode(&absolute.to_string_lossy(), URI_PATH).to_string();
        format!("file://{encoded}")
    }
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）成整數分數
fn parse_frame_rate(rate: &str) -> Option<(i64, i64)> {
    let (num_str, den_str) = rate.split_once('/')?;
    let num: i64 = num_str.parse().ok()?;
    let den: i64 = den_str.parse().ok()?;
    if num > 0 && den > 0 {
        Some((num, den))
    } else {
        None
    }
}
