use std::error::Error;

pub trait Logger: Send + Sync {
    fn log_exception(&self, error: &(dyn Error + 'static));
}

/// Forwards to the `log` facade at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn log_exception(&self, error: &(dyn Error + 'static)) {
        log::error!("{}", error_chain(error));
    }
}

/// `error: cause: root cause`
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
