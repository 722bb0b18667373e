use std::sync::Arc;

use tabled::Table;

use crate::{
    config::AppConfig,
    error,
    management::{AnalyticsSink, JsonDocumentStore},
    types::AnalyticsTableRow,
    warning,
};

/// Prints the counters stored for the relay.
pub async fn analytics(cfg: &AppConfig) {
    if !cfg.analytics.enabled {
        warning!("Analytics are disabled (ANALYTICS_ENABLED=false)");
        return;
    }

    let sink = AnalyticsSink::new(Arc::new(JsonDocumentStore::new(
        cfg.analytics.store_path.clone(),
    )));

    let counters = match sink.snapshot().await {
        Ok(Some(counters)) => counters,
        Ok(None) => {
            warning!("No data found in {}", cfg.analytics.store_path.display());
            return;
        }
        Err(e) => error!("Cannot read analytics. Err: {}", e),
    };

    let rows = vec![
        AnalyticsTableRow {
            counter: "ISOtotalCalls".to_string(),
            value: counters.iso_total_calls,
        },
        AnalyticsTableRow {
            counter: "MESOtotalCalls".to_string(),
            value: counters.meso_total_calls,
        },
        AnalyticsTableRow {
            counter: "MESOsongsConverted".to_string(),
            value: counters.meso_songs_converted,
        },
        AnalyticsTableRow {
            counter: "MESOplaylistsConverted".to_string(),
            value: counters.meso_playlists_converted,
        },
    ];

    println!("{}", Table::new(rows));
}
