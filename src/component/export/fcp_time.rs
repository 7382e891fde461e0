use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// FCPXML 的有理數時間值：`ticks / base` 秒
///
/// base 是幀率分子（例如 30000），一幀等於 `fps_denominator` 個 tick。
/// 浮點秒數不能直接寫進專案檔，FCP 只接受整數分數，可整除時
/// 則要收斂成整數秒，例如 `150150/30000s` 與 `15s`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FcpTime {
    ticks: i64,
    base: i64,
}

impl FcpTime {
    #[must_use]
    pub const fn new(ticks: i64, base: i64) -> Self {
        Self { ticks, base }
    }

    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    #[must_use]
    pub const fn base(&self) -> i64 {
        self.base
    }

    /// 這個時間值對應的幀數
    #[must_use]
    pub const fn frames(&self, fps_denominator: i64) -> i64 {
        self.ticks / fps_denominator
    }
}

impl fmt::Display for FcpTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticks % self.base == 0 {
            write!(f, "{}s", self.ticks / self.base)
        } else {
            write!(f, "{}/{}s", self.ticks, self.base)
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("無效的 FCP 時間值: {0}")]
pub struct ParseFcpTimeError(String);

impl FromStr for FcpTime {
    type Err = ParseFcpTimeError;

    /// 解析 `"15s"` 或 `"150150/30000s"`
    ///
    /// 整數秒形式沒有分母資訊，base 記為 1，數值上等價。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFcpTimeError(s.to_string());
        let value = s.strip_suffix('s').ok_or_else(err)?;

        match value.split_once('/') {
            Some((ticks, base)) => {
                let ticks: i64 = ticks.parse().map_err(|_| err())?;
                let base: i64 = base.parse().map_err(|_| err())?;
                if base <= 0 {
                    return Err(err());
                }
                Ok(Self::new(ticks, base))
            }
            None => {
                let seconds: i64 = value.parse().map_err(|_| err())?;
                Ok(Self::new(seconds, 1))
            }
        }
    }
}

/// 秒數換算為幀編號
///
/// 取 `floor(b·fps + 0.9999)`：剛好落在幀上的邊界不會被浮點誤差
/// 推到下一幀，落在幀中間的邊界則進位到下一個完整幀。這是經驗上
/// FCP 接受的捨入規則，不是單純的 ceil。
#[must_use]
pub fn frame_index(seconds: f64, fps_numerator: i64, fps_denominator: i64) -> i64 {
    let fps = fps_numerator as f64 / fps_denominator as f64;
    (seconds * fps + 0.9999) as i64
}
