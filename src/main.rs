//! Command-line interface for kafka-bench.
//!
//! # Usage Examples
//!
//! ```bash
//! # Provision the orders/events topics and run the consumer fan-in
//! kafka-bench serve --bootstrap-servers localhost:9092
//!
//! # Publish a single message and print its outcome as JSON
//! kafka-bench publish \
//!   --bootstrap-servers localhost:9092 \
//!   --topic orders --key k1 --payload '{"amt":5}'
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use kafka_bench::{BrokerOpts, MessagingService};
use kafka_bench_consumer::IngestWorkers;
use kafka_bench_producer::{ensure_topic, KafkaTransport};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "kafka-bench")]
#[command(about = "Benchmark demo service for Kafka message publishing and bounded consumption")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the configured topics and run the consumer fan-in
    Serve {
        #[command(flatten)]
        broker: BrokerOpts,
    },
    /// Publish a single message and print its outcome as JSON
    Publish {
        #[command(flatten)]
        broker: BrokerOpts,

        /// Destination topic
        #[arg(long)]
        topic: String,

        /// Message key
        #[arg(long)]
        key: String,

        /// JSON payload
        #[arg(long)]
        payload: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { broker } => serve(broker).await,
        Commands::Publish {
            broker,
            topic,
            key,
            payload,
        } => publish(broker, topic, key, payload).await,
    }
}

async fn serve(broker: BrokerOpts) -> anyhow::Result<()> {
    for topic in broker.topics() {
        ensure_topic(
            &broker.bootstrap_servers,
            &topic,
            broker.partitions,
            broker.replication_factor,
        )
        .await
        .with_context(|| format!("Failed to provision topic '{topic}'"))?;
    }

    let service = MessagingService::new(Arc::new(
        KafkaTransport::new(&broker.bootstrap_servers)
            .context("Failed to create Kafka producer")?,
    ));

    let workers = IngestWorkers::new(broker.consumer_config(), service.buffer());
    let handles = workers.spawn().context("Failed to start ingest workers")?;

    info!(
        "Consuming from topics {:?}; press Ctrl+C to stop",
        broker.topics()
    );

    for (i, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(())) => info!("Ingest worker {i} finished"),
            Ok(Err(e)) => error!("Ingest worker {i} error: {e}"),
            Err(e) => error!("Ingest worker {i} task error: {e}"),
        }
    }

    Ok(())
}

async fn publish(
    broker: BrokerOpts,
    topic: String,
    key: String,
    payload: String,
) -> anyhow::Result<()> {
    let payload: serde_json::Value =
        serde_json::from_str(&payload).context("Payload must be valid JSON")?;

    let service = MessagingService::new(Arc::new(
        KafkaTransport::new(&broker.bootstrap_servers)
            .context("Failed to create Kafka producer")?,
    ));

    let outcome = service.send_message_to_topic(topic, key, payload).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
