use std::borrow::Cow;

/// Errors raised while bringing a coordinator up from configuration.
#[coord_derive::coord_error]
pub enum CoordinatorError {
    /// Loading or deserializing the configuration failed.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// Installing the logger failed.
    #[error("Logger error{}: {source}", format_context(.context))]
    Logger { source: coord_logger::LoggerError, context: Option<Cow<'static, str>> },
}
