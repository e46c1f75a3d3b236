//! QuestDB signal store over the PostgreSQL wire protocol

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};

use super::sink::{SignalSink, SinkError};
use crate::models::Signal;

pub struct QuestSignalSink {
    client: Client,
}

impl QuestSignalSink {
    pub async fn connect(url: &str) -> Result<Self, SinkError> {
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(|e| SinkError::Connection(format!("Failed to connect to QuestDB: {}", e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "QuestDB connection error");
            }
        });

        let sink = Self { client };
        sink.init_schema().await?;
        Ok(sink)
    }

    async fn init_schema(&self) -> Result<(), SinkError> {
        // QuestDB syntax: designated TIMESTAMP column, partitioned by day
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS signals (
                    timestamp TIMESTAMP,
                    symbol SYMBOL,
                    direction SYMBOL,
                    entry_price DOUBLE,
                    stop_loss DOUBLE,
                    take_profit DOUBLE,
                    stake DOUBLE,
                    score INT,
                    strength SYMBOL,
                    local_time STRING
                ) TIMESTAMP(timestamp) PARTITION BY DAY",
                &[],
            )
            .await
            .map_err(|e| SinkError::Connection(format!("Failed to create signals table: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl SignalSink for QuestSignalSink {
    async fn store_signal(&self, signal: &Signal) -> Result<(), SinkError> {
        let record = signal.to_record();
        let timestamp_naive = signal.timestamp().naive_utc();
        let score = i32::from(record.score);

        self.client
            .execute(
                "INSERT INTO signals (timestamp, symbol, direction, entry_price, stop_loss, take_profit, stake, score, strength, local_time)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                &[
                    &timestamp_naive,
                    &record.symbol,
                    &record.direction.as_str(),
                    &record.entry_price,
                    &record.stop_loss,
                    &record.take_profit,
                    &record.stake,
                    &score,
                    &record.strength.as_str(),
                    &record.timestamp,
                ],
            )
            .await
            .map_err(|e| SinkError::Write(e.to_string()))?;

        Ok(())
    }
}
