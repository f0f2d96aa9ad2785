use clap::Parser;
use kafka_bench::BrokerOpts;

#[test]
fn test_broker_opts_defaults() {
    let opts = BrokerOpts::try_parse_from(["kafka-bench"]).unwrap();

    assert_eq!(opts.bootstrap_servers, "localhost:9092");
    assert_eq!(opts.group_id, "kafka-bench-consumer");
    assert_eq!(opts.orders_topic, "orders");
    assert_eq!(opts.events_topic, "events");
    assert_eq!(opts.partitions, 3);
    assert_eq!(opts.replication_factor, 2);
}

#[test]
fn test_broker_opts_override() {
    let opts = BrokerOpts::try_parse_from([
        "kafka-bench",
        "--bootstrap-servers",
        "kafka:9092",
        "--orders-topic",
        "orders-staging",
        "--partitions",
        "6",
    ])
    .unwrap();

    assert_eq!(opts.bootstrap_servers, "kafka:9092");
    assert_eq!(opts.orders_topic, "orders-staging");
    assert_eq!(opts.partitions, 6);
}

#[test]
fn test_subscribed_topics() {
    let opts = BrokerOpts::try_parse_from(["kafka-bench"]).unwrap();

    assert_eq!(opts.topics(), vec!["orders", "events"]);
}

#[test]
fn test_consumer_config_from_opts() {
    let opts = BrokerOpts::try_parse_from(["kafka-bench", "--group-id", "bench-group"]).unwrap();
    let config = opts.consumer_config();

    assert_eq!(config.brokers, "localhost:9092");
    assert_eq!(config.group_id, "bench-group");
    assert_eq!(config.topics, vec!["orders", "events"]);
    assert_eq!(config.auto_offset_reset, "earliest");
}
