use super::fcp_time::{FcpTime, frame_index};
use crate::tools::VideoAttr;

/// FCPXML 資源 ID 從這裡開始編
///
/// `r1`（format）與 `r2`（asset）保留給資源區塊的模板。
pub const FIRST_AVAILABLE_REF_ID: usize = 3;

/// 描述一個 Final Cut Pro 片段
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// 片段命名用的序號（例如 001）
    pub seq: String,
    /// FCPXML 內唯一的資源 ID
    pub ref_id: String,
    /// 片段左緣的時間軸時間
    pub offset: FcpTime,
    /// 片段長度
    pub duration: FcpTime,
}

/// 把封閉的時間軸切成片段清單
///
/// `offset` 與 `offset+duration` 是時間軸時間；`start` 是影片時間。
/// 這裡兩者相同，因為片段永遠與影片對齊。
///
/// 每個邊界先量化成幀編號再換算成 tick（`幀數 × 幀率分母`），片段
/// 長度取相鄰幀編號的差，所以整條時間軸的片段長度總和不會飄移。
#[must_use]
pub fn cuts_to_clips(stamps: &[f64], v: &VideoAttr, first_ref_id: usize) -> Vec<Clip> {
    let clip_count = stamps.len().saturating_sub(1);
    let seq_digits = clip_count.to_string().len();

    let frames: Vec<i64> = stamps
        .iter()
        .map(|&s| frame_index(s, v.fps_numerator, v.fps_denominator))
        .collect();

    frames
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let offset_ticks = pair[0] * v.fps_denominator;
            let duration_ticks = (pair[1] - pair[0]) * v.fps_denominator;
            Clip {
                seq: format!("{:0seq_digits$}", i + 1),
                ref_id: format!("r{}", i + first_ref_id),
                offset: FcpTime::new(offset_ticks, v.fps_numerator),
                duration: FcpTime::new(duration_ticks, v.fps_numerator),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ntsc_video(duration_seconds: f64) -> VideoAttr {
        VideoAttr {
            path: PathBuf::from("/videos/test.mp4"),
            stem: "test".to_string(),
            width: 1920,
            height: 1080,
            duration_seconds,
            fps_numerator: 30000,
            fps_denominator: 1001,
            codec_name: "h264".to_string(),
            color_primaries: "bt709".to_string(),
            color_trc: "bt709".to_string(),
            colorspace: "bt709".to_string(),
        }
    }

    #[test]
    fn test_zero_cuts_yield_single_whole_video_clip() {
        let v = ntsc_video(15.1);
        let clips = cuts_to_clips(&[0.0, 15.1], &v, FIRST_AVAILABLE_REF_ID);

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].seq, "1");
        assert_eq!(clips[0].ref_id, "r3");
        assert_eq!(clips[0].offset.to_string(), "0s");
        // 15.1s 在 29.97fps 量化成 453 幀 = 453453 ticks
        assert_eq!(clips[0].duration.to_string(), "453453/30000s");
    }

    #[test]
    fn test_offsets_are_exact_rationals() {
        let v = ntsc_video(15.1);
        let clips = cuts_to_clips(&[0.0, 5.005, 15.1], &v, FIRST_AVAILABLE_REF_ID);

        assert_eq!(clips.len(), 2);
        // 5.005s 正好是 150 幀 → 150 * 1001 ticks
        assert_eq!(clips[0].duration.to_string(), "150150/30000s");
        assert_eq!(clips[1].offset.to_string(), "150150/30000s");
        assert_eq!(clips[1].duration.to_string(), "303303/30000s");
    }

    #[test]
    fn test_seq_zero_padded_to_clip_count_width() {
        let v = ntsc_video(100.0);
        let stamps: Vec<f64> = (0..=10).map(|i| f64::from(i) * 10.0).collect();
        let clips = cuts_to_clips(&stamps, &v, FIRST_AVAILABLE_REF_ID);

        assert_eq!(clips.len(), 10);
        assert_eq!(clips[0].seq, "01");
        assert_eq!(clips[9].seq, "10");
        assert_eq!(clips[9].ref_id, "r12");
    }

    #[test]
    fn test_durations_sum_without_drift() {
        let v = ntsc_video(60.0);
        let stamps = [0.0, 3.337, 7.12, 19.019, 33.4, 47.951, 60.0];
        let clips = cuts_to_clips(&stamps, &v, FIRST_AVAILABLE_REF_ID);

        let total_frames: i64 = clips
            .iter()
            .map(|c| c.duration.frames(v.fps_denominator))
            .sum();
        let expected = frame_index(60.0, 30000, 1001) - frame_index(0.0, 30000, 1001);
        assert_eq!(total_frames, expected);
    }

    #[test]
    fn test_empty_timeline_yields_no_clips() {
        let v = ntsc_video(15.1);
        assert!(cuts_to_clips(&[], &v, FIRST_AVAILABLE_REF_ID).is_empty());
    }
}
