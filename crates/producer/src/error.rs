use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Payload serialization error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Topic provisioning error: {0}")]
    Admin(String),
}

pub type Result<T> = std::result::Result<T, Error>;
