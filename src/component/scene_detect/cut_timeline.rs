/// 剪切時間軸：`[起點 + 場景變換點… + 終點]`，單位為秒
///
/// 偵測期間只能由偵測器附加邊界，偵測結束（完成或中斷）後以
/// `seal` 封閉並交還呼叫端，之後視為唯讀。
#[derive(Debug, Clone, PartialEq)]
pub struct CutTimeline {
    stamps: Vec<f64>,
}

impl CutTimeline {
    #[must_use]
    pub fn new(start_time: f64) -> Self {
        Self {
            stamps: vec![start_time],
        }
    }

    /// 最後一個已接受的邊界
    #[must_use]
    pub fn last(&self) -> f64 {
        // 建構時就放入起點，stamps 不會是空的
        self.stamps.last().copied().unwrap_or(0.0)
    }

    /// 去彈跳：候選點與上一個接受的邊界距離達 `min_scene_secs` 才接受
    ///
    /// 被拒絕的候選點直接丟棄，不會合併到下一個窗格，所以一連串
    /// 過近的候選點只會留下其中第一個。
    pub fn accept(&mut self, candidate: f64, min_scene_secs: f64) -> bool {
        if candidate - self.last() >= min_scene_secs {
            self.stamps.push(candidate);
            true
        } else {
            false
        }
    }

    /// 以影片總長度封閉時間軸
    ///
    /// 不論最後一個場景變換落在哪裡都會附加終點。
    pub fn seal(&mut self, duration: f64) {
        self.stamps.push(duration);
    }

    #[must_use]
    pub fn stamps(&self) -> &[f64] {
        &self.stamps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}

/// 從進度事件推算目前的剪切數量
///
/// 偵測中的時間軸只含起點，結束後多了終點，所以扣掉的數量不同。
#[must_use]
pub fn count_scenes(fraction: f64, stamps: &[f64]) -> usize {
    if fraction < 1.0 {
        stamps.len().saturating_sub(1) // 不算起點
    } else {
        stamps.len().saturating_sub(2) // 不算起點與終點
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_respects_min_scene_secs() {
        let mut timeline = CutTimeline::new(0.0);
        assert!(timeline.accept(5.0, 0.6));
        assert!(!timeline.accept(5.55, 0.6)); // 差 0.55 < 0.6
        assert_eq!(timeline.stamps(), &[0.0, 5.0]);
    }

    #[test]
    fn test_burst_collapses_to_first_candidate() {
        let mut timeline = CutTimeline::new(0.0);
        assert!(timeline.accept(5.0, 0.6));
        // 密集的候選點只留第一個，不是最後一個
        assert!(!timeline.accept(5.2, 0.6));
        assert!(!timeline.accept(5.4, 0.6));
        assert!(!timeline.accept(5.59, 0.6));
        assert!(timeline.accept(5.61, 0.6));
        assert_eq!(timeline.stamps(), &[0.0, 5.0, 5.61]);
    }

    #[test]
    fn test_debounce_counts_from_start_time() {
        let mut timeline = CutTimeline::new(10.0);
        assert!(!timeline.accept(10.3, 0.6)); // 與起點比較
        assert!(timeline.accept(10.6, 0.6));
        assert_eq!(timeline.stamps(), &[10.0, 10.6]);
    }

    #[test]
    fn test_seal_always_appends_duration() {
        let mut timeline = CutTimeline::new(0.0);
        timeline.accept(15.0, 0.6);
        timeline.seal(15.1); // 即使最後的剪切貼近終點也照樣附加
        assert_eq!(timeline.stamps(), &[0.0, 15.0, 15.1]);
    }

    #[test]
    fn test_consecutive_boundaries_keep_min_gap() {
        let candidates = [0.1, 0.5, 0.9, 1.0, 1.7, 1.9, 2.8, 2.85, 3.5];
        let mut timeline = CutTimeline::new(0.0);
        for c in candidates {
            timeline.accept(c, 0.6);
        }
        let stamps = timeline.stamps();
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= 0.6, "間隔不足: {pair:?}");
        }
    }

    #[test]
    fn test_count_scenes() {
        assert_eq!(count_scenes(0.5, &[0.0, 5.0, 9.0]), 2);
        assert_eq!(count_scenes(1.0, &[0.0, 5.0, 9.0, 15.1]), 2);
        assert_eq!(count_scenes(1.0, &[0.0, 15.1]), 0);
        assert_eq!(count_scenes(1.0, &[]), 0);
    }
}
