// Account-level queries

use tracing::debug;

use crate::client::ConnectClient;
use crate::error::Error;
use crate::models::BalanceData;

const BALANCE_QUERY: &str = "\
query balanceInfo {
  currentCustomer {
    balance
  }
}";

impl ConnectClient {
    /// Current prepaid balance as a decimal currency value.
    ///
    /// The API reports integer cents; `1234` becomes `12.34`.
    pub async fn balance(&self) -> Result<f64, Error> {
        debug!("querying balance");
        let data: BalanceData = self.graphql(BALANCE_QUERY, None, None).await?;
        Ok(data.current_customer.balance as f64 / 100.0)
    }
}
