// Consumption queries
//
// The server groups usage records by billing unit; callers almost always
// want the flat list of tariff/option records, so the per-unit nesting
// is flattened here.

use tracing::debug;

use crate::client::ConnectClient;
use crate::error::Error;
use crate::models::{ConsumptionsData, TariffConsumptions};

const CONSUMPTIONS_QUERY: &str = "\
query consumptions {
  consumptions {
    consumptionsForUnit {
      tariffOrOptions {
        name
        id
        type
        consumptions {
          consumed
          unit
          formattedUnit
          type
          description
          expirationDate
          left
          max
        }
      }
    }
  }
}";

impl ConnectClient {
    /// Usage records for all tariffs and options, flattened across
    /// billing units. Units without tariff/option records are skipped.
    pub async fn consumptions(&self) -> Result<Vec<TariffConsumptions>, Error> {
        debug!("querying consumptions");
        let data: ConsumptionsData = self.graphql(CONSUMPTIONS_QUERY, None, None).await?;
        Ok(data
            .consumptions
            .consumptions_for_unit
            .into_iter()
            .filter_map(|unit| unit.tariff_or_options)
            .flatten()
            .collect())
    }

    /// Usage records whose tariff/option id matches `id`.
    pub async fn get_consumptions(&self, id: &str) -> Result<Vec<TariffConsumptions>, Error> {
        Ok(self
            .consumptions()
            .await?
            .into_iter()
            .filter(|c| c.id == id)
            .collect())
    }
}
