use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select};
use fcpscene::component::export::OutputMode;
use fcpscene::component::scene_detect::{DetectError, DetectorConfig, count_scenes, detect_cuts};
use fcpscene::config::{self, UserSettings};
use fcpscene::event_bus::EventBus;
use fcpscene::init;
use fcpscene::signal::setup_shutdown_signal;
use fcpscene::tools::{ToolLocator, VideoAttr};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::{env, fs};

fn main() -> Result<()> {
    init::init();

    let bus = Arc::new(EventBus::new());
    let shutdown_signal = setup_shutdown_signal(&bus);

    let tools = ToolLocator::from_env();
    if let Err(e) = tools.validate() {
        exit_error(&format!("{e:#}"));
    }

    let mut settings = config::load_settings().unwrap_or_else(|e| {
        warn!("無法載入 settings.json，改用預設值: {e:#}");
        UserSettings::default()
    });

    let video_path = match env::args().nth(1) {
        Some(path) => path,
        None => prompt_video_path(&settings)?,
    };

    let v = match VideoAttr::probe(Path::new(&video_path), tools.ffprobe()) {
        Ok(v) => v,
        Err(e) => exit_error(&format!("{e:#}")),
    };
    println!("{}", style(v.summary()).dim());

    let sensitivity = prompt_sensitivity(settings.sensitivity)?;
    let mode = prompt_mode(settings.mode)?;

    let progress_bar = make_progress_bar();
    {
        let progress_bar = progress_bar.clone();
        bus.subscribe_progress(move |p| {
            progress_bar.set_position((p.fraction * 100.0) as u64);
            progress_bar.set_message(format!("剪切 {}", count_scenes(p.fraction, &p.stamps)));
        });
    }

    let detector_config = DetectorConfig {
        ffmpeg: tools.ffmpeg().to_path_buf(),
        sensitivity,
        proxy_width: settings.proxy_width,
        min_scene_secs: settings.min_scene_secs,
        start_time: 0.0,
    };

    let timeline = match detect_cuts(&v, &bus, &detector_config) {
        Ok(timeline) => timeline,
        Err(e @ DetectError::Launch { .. }) => exit_error(&format!("{e}")),
        Err(e) => exit_error(&format!("ffmpeg 分析發生錯誤: {e}")),
    };
    bus.unsubscribe_progress();
    progress_bar.finish_and_clear();

    let cut_count = count_scenes(1.0, timeline.stamps());
    if shutdown_signal.load(Ordering::SeqCst) {
        println!(
            "{}",
            style(format!("分析已中斷，輸出目前偵測到的 {cut_count} 個剪切")).yellow()
        );
    } else {
        println!("{}", style(format!("偵測到 {cut_count} 個剪切")).green());
    }

    let output_path = v.path.with_extension(mode.extension());
    let text = mode.render(timeline.stamps(), &v);
    if let Err(e) = fs::write(&output_path, text)
        .with_context(|| format!("無法寫入 {}", output_path.display()))
    {
        exit_error(&format!("{e:#}"));
    }
    println!("\n💾 {}", output_path.display());
    info!("輸出完成: {}", output_path.display());

    settings.sensitivity = sensitivity;
    settings.mode = mode;
    config::add_recent_path(&mut settings, &video_path);
    if let Err(e) = config::save_settings(&settings) {
        warn!("無法儲存設定: {e:#}");
    }

    Ok(())
}

fn prompt_video_path(settings: &UserSettings) -> Result<String> {
    let mut input = Input::new().with_prompt("請輸入影片路徑");
    if let Some(recent) = settings.recent_paths.first() {
        input = input.default(recent.clone());
    }
    let path: String = input.interact_text()?;
    Ok(path.trim().to_string())
}

fn prompt_sensitivity(last_used: f64) -> Result<f64> {
    let sensitivity: f64 = Input::new()
        .with_prompt("靈敏度 (0-100，越高剪切越多)")
        .default(last_used)
        .validate_with(|value: &f64| {
            if (0.0..=100.0).contains(value) {
                Ok(())
            } else {
                Err("必須介於 0 到 100 之間")
            }
        })
        .interact_text()?;
    Ok(sensitivity)
}

fn prompt_mode(last_used: OutputMode) -> Result<OutputMode> {
    let labels: Vec<&str> = OutputMode::ALL.iter().map(|m| m.label()).collect();
    let default_index = OutputMode::ALL
        .iter()
        .position(|m| *m == last_used)
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("輸出格式")
        .items(&labels)
        .default(default_index)
        .interact()?;
    Ok(OutputMode::ALL[index])
}

fn make_progress_bar() -> ProgressBar {
    let progress_bar = ProgressBar::new(100);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar
}

fn exit_error(msg: &str) -> ! {
    eprintln!("\n{} {}", style("錯誤:").red().bold(), msg);
    std::process::exit(1);
}
