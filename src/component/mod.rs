//! 功能元件模組
//!
//! 每個子模組實現管線的一個階段：場景偵測與時間軸輸出

pub mod export;
pub mod scene_detect;
