use log::warn;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;

/// 進度快照
///
/// `stamps` 是發布當下的時間軸副本，偵測器會繼續更新它自己的那份，
/// 訂閱者拿到的資料不會再變動。
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// 完成比例 0.0 ~ 1.0
    pub fraction: f64,
    /// 目前為止的時間軸（秒）
    pub stamps: Vec<f64>,
}

type ProgressFn = Box<dyn Fn(&Progress) + Send>;
type StopFn = Box<dyn Fn() + Send>;

/// 偵測器與前端之間的事件匯流排
///
/// 兩種事件：進度更新（可多個訂閱者，依註冊順序同步通知）與
/// 停止請求（單一訂閱者）。不保留歷史、不重播。
#[derive(Default)]
pub struct EventBus {
    progress_subscribers: Mutex<Vec<ProgressFn>>,
    stop_subscriber: Mutex<Option<StopFn>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_progress<F>(&self, callback: F)
    where
        F: Fn(&Progress) + Send + 'static,
    {
        self.progress_subscribers
            .lock()
            .unwrap()
            .push(Box::new(callback));
    }

    /// 清除所有進度訂閱者，沒有訂閱者時呼叫也安全
    pub fn unsubscribe_progress(&self) {
        self.progress_subscribers.lock().unwrap().clear();
    }

    /// 註冊停止請求的訂閱者，會取代先前的訂閱
    pub fn subscribe_stop<F>(&self, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        *self.stop_subscriber.lock().unwrap() = Some(Box::new(callback));
    }

    pub fn unsubscribe_stop(&self) {
        *self.stop_subscriber.lock().unwrap() = None;
    }

    #[must_use]
    pub fn has_stop_subscriber(&self) -> bool {
        self.stop_subscriber.lock().unwrap().is_some()
    }

    /// 同步通知所有進度訂閱者
    ///
    /// 訂閱者 panic 不會中斷偵測，也不影響其他訂閱者，只記錄警告。
    pub fn emit_progress(&self, fraction: f64, stamps: &[f64]) {
        let snapshot = Progress {
            fraction,
            stamps: stamps.to_vec(),
        };
        for subscriber in self.progress_subscribers.lock().unwrap().iter() {
            if catch_unwind(AssertUnwindSafe(|| subscriber(&snapshot))).is_err() {
                warn!("進度訂閱者發生 panic，已忽略");
            }
        }
    }

    /// 發出停止請求，不等待回應
    pub fn emit_stop(&self) {
        if let Some(subscriber) = self.stop_subscriber.lock().unwrap().as_ref() {
            if catch_unwind(AssertUnwindSafe(|| subscriber())).is_err() {
                warn!("停止訂閱者發生 panic，已忽略");
            }
        }
    }
}
