use super::clips::{FIRST_AVAILABLE_REF_ID, cuts_to_clips};
use crate::tools::VideoAttr;

/// 依剪切時間切開時間軸，並把每個片段包進自己的複合片段
///
/// 在 Final Cut Pro 裡，要把片段逐一輸出成獨立檔案（或送進
/// Apple Compressor 批次處理）需要複合片段。但這招只在複合片段
/// 出現在 Browser Viewer 時有效，所以這裡內嵌一個名為 "fcpscene"
/// 的 Event，匯入前 FCP Library 裡必須已存在同名 Event。
#[must_use]
pub fn to_fcpxml_compound_clips(stamps: &[f64], v: &VideoAttr) -> String {
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
    </asset>"#,
        width = v.width,
        height = v.height,
        color_space = v.fcp_color_space(),
        fps_den = v.fps_denominator,
        fps_num = v.fps_numerator,
        uri = v.file_uri(),
    );

    for c in &clips {
        xml.push_str(&format!(
            r#"
    <media id="{ref_id}" name="{name}_{seq}">
      <sequence format="r1" tcStart="0s">
        <spine>
          <asset-clip ref="r2" offset="0s" start="{offset}" duration="{duration}"/>
        </spine>
      </sequence>
    </media>"#,
            ref_id = c.ref_id,
            name = v.stem,
            seq = c.seq,
            offset = c.offset,
            duration = c.duration,
        ));
    }

    xml.push_str(&format!(
        r#"
  </resources>
  <library>
    <event name="fcpscene">
      <project name="{name}">
        <sequence format="r1" tcStart="0s">
          <spine>"#,
        name = v.stem,
    ));

    for c in &clips {
        xml.push_str(&format!(
            "\n            <ref-clip ref=\"{}\" offset=\"{}\" duration=\"{}\"/>",
            c.ref_id, c.offset, c.duration,
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
