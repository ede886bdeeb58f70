use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to initialize sink client: {0}")]
    SinkInit(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Failed to decompress request body: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to decode OTLP payload: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Failed to deliver event to sink: {0}")]
    Sink(String),
}
