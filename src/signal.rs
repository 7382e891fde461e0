use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::event_bus::EventBus;

/// 設定 Ctrl-C 處理：透過事件匯流排要求偵測器停止
///
/// 停止請求會先終止 ffmpeg 子行程，避免留下孤兒行程；
/// 已偵測到的部分結果保留，由呼叫端決定是否照樣輸出。
#[must_use]
pub fn setup_shutdown_signal(bus: &Arc<EventBus>) -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);
    let bus = Arc::clone(bus);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        bus.emit_stop();
        eprintln!("\n收到中斷信號，正在停止分析...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}
