use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid BIND_ADDR: {source}")]
    InvalidBindAddr { source: std::net::AddrParseError },

    #[error("Missing JWT configuration: set JWT_SECRET or JWT_PUBLIC_KEY")]
    MissingJwtConfig,

    #[error("Invalid DELIVERY_MODE: {message}")]
    InvalidDeliveryMode { message: String },

    #[error("Invalid LOG_LEVEL: {value}")]
    InvalidLogLevel { value: String },

    #[error("Logger initialization failed: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
