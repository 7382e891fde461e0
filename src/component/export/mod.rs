//! 時間軸輸出元件
//!
//! 把封閉的剪切時間軸換算成幀精確的片段清單（精確有理數時間），
//! 再依選擇的輸出格式產生 FCPXML 或 CSV 文字。

mod clips;
mod csv_clips;
mod fcp_time;
mod fcpxml_clips;
mod fcpxml_compound_clips;
mod fcpxml_markers;

use serde::{Deserialize, Serialize};

use crate::tools::VideoAttr;

pub use clips::{Clip, FIRST_AVAILABLE_REF_ID, cuts_to_clips};
pub use csv_clips::to_csv_clips;
pub use fcp_time::{FcpTime, ParseFcpTimeError, frame_index};
pub use fcpxml_clips::to_fcpxml_clips;
pub use fcpxml_compound_clips::to_fcpxml_compound_clips;
pub use fcpxml_markers::to_fcpxml_markers;

/// 輸出格式
///
/// 封閉的變體集合，每種格式對應一個 `(時間軸, 影片屬性) -> 文字`
/// 的函式，由設定明確選擇。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// 每個片段包進自己的複合片段
    #[default]
    CompoundClips,
    /// 一般片段
    Clips,
    /// 只加標記，不切開
    Markers,
    /// CSV 文字
    Csv,
}

impl OutputMode {
    pub const ALL: [Self; 4] = [Self::CompoundClips, Self::Clips, Self::Markers, Self::Csv];

    #[must_use]
    pub fn render(self, stamps: &[f64], v: &VideoAttr) -> String {
        match self {
            Self::CompoundClips => to_fcpxml_compound_clips(stamps, v),
            Self::Clips => to_fcpxml_clips(stamps, v),
            Self::Markers => to_fcpxml_markers(stamps, v),
            Self::Csv => to_csv_clips(stamps),
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::CompoundClips | Self::Clips | Self::Markers => "fcpxml",
            Self::Csv => "csv",
        }
    }

    /// 選單顯示用的說明
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompoundClips => "複合片段（可逐段輸出）",
            Self::Clips => "一般片段",
            Self::Markers => "只加標記",
            Self::Csv => "CSV（start,end）",
        }
    }
}
