// 日志工具模块
//
// 库内部只通过 `log` 宏输出，由调用方决定是否用 flexi_logger 落盘

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::LevelFilter;
use parking_lot::{const_mutex, Mutex};

use crate::config::LogConfig;

/// 当前进程的日志句柄，`shutdown` 时取出并 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = const_mutex(None);

/// 按配置启动文件日志
///
/// 按 `max_file_size` 轮转，保留 `max_files` 个历史文件。`log` 门面每个进程
/// 只能安装一次 logger，因此 `shutdown` 之后再次调用也会失败。
///
/// # Examples
/// ```no_run
/// use redisgraph::config::Config;
/// use redisgraph::utils::logging;
///
/// let config = Config::default();
/// logging::init(&config.log).expect("日志初始化失败");
/// ```
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut slot = LOGGER_HANDLE.lock();
    if slot.is_some() {
        return Err("日志系统已初始化".into());
    }

    let handle = Logger::try_with_str(&config.level)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.dir)
                .basename(&config.file),
        )
        .rotate(
            Criterion::Size(config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;
    *slot = Some(handle);

    log::info!("redisgraph logging to {}/{}", config.dir, config.file);
    Ok(())
}

/// flush 并停止异步写线程
///
/// 全局 logger 无法卸载，所以同时把最大级别设为 `Off`，
/// 之后的日志宏直接短路，不再写向已关闭的 writer
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().take() {
        handle.flush();
        log::set_max_level(LevelFilter::Off);
        handle.shutdown();
    }
}

pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
