//! Response structures for the Yahoo chart endpoint.

use serde::Deserialize;

/// Top-level envelope of `/v8/finance/chart/{symbol}`.
#[derive(Debug, Deserialize)]
pub(super) struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub(super) struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChartResult {
    pub meta: ChartMeta,
}

/// Chart metadata. The endpoint returns many more fields (exchange, trading
/// periods, valid ranges) that are not needed for close reconciliation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChartMeta {
    pub currency: Option<String>,
    #[allow(dead_code)]
    pub symbol: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChartError {
    pub code: String,
    pub description: String,
}
