use super::clips::{FIRST_AVAILABLE_REF_ID, cuts_to_clips};
use crate::tools::VideoAttr;

/// 依剪切時間把時間軸切開成一般片段
#[must_use]
pub fn to_fcpxml_clips(stamps: &[f64], v: &VideoAttr) -> String {
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
          <spine>"#,
        width = v.width,
        height = v.height,
        color_space = v.fcp_color_space(),
        fps_den = v.fps_denominator,
        fps_num = v.fps_numerator,
        uri = v.file_uri(),
        name = v.stem,
    );

    for c in &clips {
        xml.push_str(&format!(
            "\n            <asset-clip ref=\"r2\" offset=\"{offset}\" start=\"{offset}\" duration=\"{duration}\"/>",
            offset = c.offset,
            duration = c.duration,
        ));
    }

    xml.push_str(
        "\n          </spine>
        </sequence>
      </project>
    </event>
  </library>
</fcpxml>
",
    );
    xml
}
