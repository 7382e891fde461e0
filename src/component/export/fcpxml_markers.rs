use super::clips::{FIRST_AVAILABLE_REF_ID, cuts_to_clips};
use crate::tools::VideoAttr;

/// 不切開時間軸，只在每個場景變換處放一個標記
///
/// 整部影片是單一 asset-clip，標記掛在它身上；標記的 start 是
/// 影片時間，長度固定為一幀。
#[must_use]
pub fn to_fcpxml_markers(stamps: &[f64], v: &VideoAttr) -> String {
    let clips = cuts_to_clips(stamps, v, FIRST_AVAILABLE_REF_ID);

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE fcpxml>
<fcpxml version="1.13">
  <resources>
    <format id="r1"
      width="{width}"
      height="{height}"
      colorSpace="{color_space}"
      frameDuration="{fps_den}/{fps_num}s"/>
    <asset id="r2" start="0s" format="r1">
      <media-rep kind="original-media" src="{uri}"/>
    </asset>
  </resources>
  <library>
    <event name="fcpscene">
      <project name="{name}">
        <sequence format="r1" tcStart="0s">
          <spine>
            <asset-clip ref="r2" offset="0s" start="0s" duration="{total}">"#,
        width = v.width,
        height = v.height,
        color_space = v.fcp_color_space(),
        fps_den = v.fps_denominator,
        fps_num = v.fps_numerator,
        uri = v.file_uri(),
        name = v.stem,
        total = whole_video_duration(stamps, v),
    );

    // 第一個片段從起點開始，不需要標記，其餘片段的左緣各放一個
    for c in clips.iter().skip(1) {
        xml.push_str(&format!(
            "\n              <marker start=\"{start}\" duration=\"{fps_den}/{fps_num}s\" value=\"{name}_{seq}\"/>",
            start = c.offset,
            fps_den = v.fps_denominator,
            fps_num = v.fps_numerator,
            name = v.stem,
            seq = c.seq,
        ));
    }

    xml.push_str(
        "\n            </asset-clip>
          </spine>
        </sequence>
      </project>
    </event>
  </library>
</fcpxml>
",
    );
    xml
}

fn whole_video_duration(stamps: &[f64], v: &VideoAttr) -> String {
    let clips = cuts_to_clips(
        &[
            stamps.first().copied().unwrap_or(0.0),
            stamps.last().copied().unwrap_or(0.0),
        ],
        v,
        FIRST_AVAILABLE_REF_ID,
    );
    clips
        .first()
        .map_or_else(|| "0s".to_string(), |c| c.duration.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_video() -> VideoAttr {
        VideoAttr {
            path: PathBuf::from("/videos/test.mp4"),
            stem: "test".to_string(),
            width: 1280,
            height: 720,
            duration_seconds: 10.0,
            fps_numerator: 30,
            fps_denominator: 1,
            codec_name: "h264".to_string(),
            color_primaries: "bt709".to_string(),
            color_trc: "bt709".to_string(),
            colorspace: "bt709".to_string(),
        }
    }

    #[test]
    fn test_one_marker_per_interior_cut() {
        let xml = to_fcpxml_markers(&[0.0, 3.0, 7.0, 10.0], &test_video());

        assert_eq!(xml.matches("<marker").count(), 2);
        assert!(xml.contains(r#"<marker start="3s" duration="1/30s" value="test_2"/>"#));
        assert!(xml.contains(r#"<marker start="7s" duration="1/30s" value="test_3"/>"#));
    }

    #[test]
    fn test_single_full_length_clip_carries_markers() {
        let xml = to_fcpxml_markers(&[0.0, 3.0, 7.0, 10.0], &test_video());

        assert_eq!(xml.matches("<asset-clip").count(), 1);
        assert!(xml.contains(
            r#"<asset-clip ref="r2" offset="0s" start="0s" duration="10s">"#
        ));
    }

    #[test]
    fn test_zero_cuts_produce_no_markers() {
        let xml = to_fcpxml_markers(&[0.0, 10.0], &test_video());
        assert_eq!(xml.matches("<marker").count(), 0);
    }
}
