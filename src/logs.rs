use std::{
    path::Path,
    sync::{mpsc, LazyLock, Mutex},
};

use anyhow::Result;
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use log::Log;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Where formatted log lines go besides the rotating file, usually a channel
/// drained by the host app's own logger.
static LOG_SENDER: LazyLock<Mutex<Option<mpsc::Sender<String>>>> =
    LazyLock::new(|| Mutex::new(None));

pub struct MainLogger {
    write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>,
}

impl MainLogger {
    fn new(write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>) -> Self {
        Self { write_logger }
    }
}

impl Log for MainLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.write_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_logger.log(record);

        let message = format_record(record);
        let sender = LOG_SENDER.lock().ok().and_then(|guard| guard.clone());
        match sender {
            // a dropped receiver just means the host stopped listening
            Some(sender) => {
                let _ = sender.send(message);
            }
            None => eprintln!("{message}"),
        }
    }

    fn flush(&self) {
        self.write_logger.flush();
    }
}

fn format_record(record: &log::Record) -> String {
    format!(
        "{}:{} -- {}",
        record.level(),
        record.target(),
        record.args()
    )
}

pub fn init(cache_dir: &str, level: LevelFilter) -> Result<()> {
    let path = Path::new(cache_dir).join("logs/main.log");
    let log = FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::MaxFiles(3)),
        ContentLimit::Lines(1000),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let write_logger = WriteLogger::new(level, config, log);
    let main_logger = MainLogger::new(write_logger);
    log::set_boxed_logger(Box::new(main_logger))?;
    log::set_max_level(level);
    Ok(())
}

pub fn set_log_sink(sender: mpsc::Sender<String>) {
    if let Ok(mut guard) = LOG_SENDER.lock() {
        *guard = Some(sender);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_format() {
        assert_eq!(
            format_record(
                &log::Record::builder()
                    .level(log::Level::Warn)
                    .target("travelbar_core::session")
                    .args(format_args!("event rejected"))
                    .build()
            ),
            "WARN:travelbar_core::session -- event rejected"
        );
    }
}
