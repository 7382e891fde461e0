use anyhow::{Context, Result, bail};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 外部分析工具的定位器
///
/// 預設從 PATH 取得 ffmpeg 與 ffprobe。環境變數 `FCPSCENE_FFMPEG` 與
/// `FCPSCENE_FFPROBE` 可指定其他執行檔，測試時也能換成假的分析程式。
#[derive(Debug, Clone)]
pub struct ToolLocator {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ToolLocator {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            ffmpeg: std::env::var_os("FCPSCENE_FFMPEG")
                .map_or_else(|| PathBuf::from("ffmpeg"), PathBuf::from),
            ffprobe: std::env::var_os("FCPSCENE_FFPROBE")
                .map_or_else(|| PathBuf::from("ffprobe"), PathBuf::from),
        }
    }

    #[must_use]
    pub fn with_programs(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// 確認兩個工具都能執行
    pub fn validate(&self) -> Result<()> {
        validate_program(&self.ffmpeg)?;
        validate_program(&self.ffprobe)?;
        Ok(())
    }

    #[must_use]
    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    #[must_use]
    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }
}

fn validate_program(program: &Path) -> Result<()> {
    debug!("檢查外部工具: {}", program.display());

    let status = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("缺少依賴工具 {}", program.display()))?;

    if !status.success() {
        bail!("依賴工具無法執行: {}", program.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_programs_overrides_defaults() {
        let locator = ToolLocator::with_programs("/opt/ffmpeg/bin/ffmpeg", "/opt/ffmpeg/bin/ffprobe");
        assert_eq!(locator.ffmpeg(), Path::new("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(locator.ffprobe(), Path::new("/opt/ffmpeg/bin/ffprobe"));
    }

    #[test]
    fn test_validate_missing_program_fails() {
        let locator = ToolLocator::with_programs("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
        assert!(locator.validate().is_err());
    }
}
