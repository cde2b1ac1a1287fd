// Tariff operations
//
// Listing, lookup, and the two-phase booking workflow: `bookTariffoption`
// reserves and returns a process id, `confirmTariffoptionBooking` commits
// it. `buy_tariff_option` wires the two together behind an idempotency
// check on the remaining allowance.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::client::ConnectClient;
use crate::error::Error;
use crate::models::{
    BookTariffoptionData, BookableTariffsData, BookedTariff, BookedTariffsData, BookingResult,
    ConfirmTariffoptionBookingData, Tariff,
};

const TARIFFS_QUERY: &str = "\
query tariffOptions {
  tariffoptions {
    bookableTariffoptions {
      bookableTariffoptions {
        requiresContractSummary
        additionalInfo
        automaticExtension
        buttonText
        details
        formattedPrice
        name
        tariffoptionId
        price
        duration {
          amount
          unit
        }
        notBookableWith
      }
    }
  }
}";

const BOOKED_TARIFFS_QUERY: &str = "\
query tariffOptions {
  tariffoptions {
    bookedTariffoptions {
      bookedTariffoptions {
        automaticExtension
        tariffoptionId
        name
        price
        duration {
          amount
          unit
        }
        statusKey
        startOfRuntime
        endOfRuntime
        possibleChangingDate
        buttonText
        cancelable
        formattedPrice
        restrictedService
        tariffState
      }
    }
  }
}";

const BOOK_MUTATION: &str = "\
mutation tariffOptions($bookTariffoptionInput: BookTariffoptionInput!) {
  bookTariffoption(bookTariffoption: $bookTariffoptionInput) {
    success
    processId
    bookTariffoptionDocumentUrl
  }
}";

const CONFIRM_MUTATION: &str = "\
mutation tariffOptions($confirmTariffoptionBookingInput: ConfirmTariffoptionBookingInput!) {
  confirmTariffoptionBooking(
    confirmTariffoptionBooking: $confirmTariffoptionBookingInput
  ) {
    success
  }
}";

impl ConnectClient {
    // ── Listing & lookup ─────────────────────────────────────────────

    /// All bookable tariff options.
    ///
    /// Fetched once and cached for the client's lifetime; drop the
    /// client to see newly published tariffs.
    pub async fn tariffs(&self) -> Result<Arc<Vec<Tariff>>, Error> {
        if let Some(cached) = self.cached_tariffs() {
            return Ok(cached);
        }
        debug!("fetching bookable tariff options");
        let data: BookableTariffsData = self.graphql(TARIFFS_QUERY, None, None).await?;
        Ok(self.store_tariffs(data.tariffoptions.bookable_tariffoptions.bookable_tariffoptions))
    }

    /// First tariff matching either search key.
    ///
    /// Fails with [`Error::TariffNotFound`] naming both keys when no
    /// record matches.
    pub async fn get_tariff(
        &self,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Tariff, Error> {
        let tariffs = self.tariffs().await?;
        tariffs
            .iter()
            .find(|t| {
                name.is_some_and(|n| t.name == n) || id.is_some_and(|i| t.tariffoption_id == i)
            })
            .cloned()
            .ok_or_else(|| Error::TariffNotFound {
                name: name.map(str::to_owned),
                id: id.map(str::to_owned),
            })
    }

    /// The tariffoption id for a tariff name, memoized per name.
    pub async fn resolve_tariff_name(&self, name: &str) -> Result<String, Error> {
        if let Some(id) = self.cached_tariff_id(name) {
            return Ok(id);
        }
        let id = self.get_tariff(Some(name), None).await?.tariffoption_id;
        self.store_tariff_id(name, &id);
        Ok(id)
    }

    /// Currently booked tariff options. Never cached.
    pub async fn booked_tariffs(&self) -> Result<Vec<BookedTariff>, Error> {
        debug!("fetching booked tariff options");
        let data: BookedTariffsData = self.graphql(BOOKED_TARIFFS_QUERY, None, None).await?;
        Ok(data.tariffoptions.booked_tariffoptions.booked_tariffoptions)
    }

    /// Whether `id` appears among the booked tariff options.
    pub async fn is_booked(&self, id: &str) -> Result<bool, Error> {
        Ok(self
            .booked_tariffs()
            .await?
            .iter()
            .any(|t| t.tariffoption_id == id))
    }

    // ── Booking workflow ─────────────────────────────────────────────

    /// Reserve a tariff option. Phase one of the booking workflow;
    /// the returned process id must be passed to
    /// [`confirm_tariff_booking`](Self::confirm_tariff_booking).
    pub async fn book_tariff_option(&self, id: &str) -> Result<BookingResult, Error> {
        debug!("booking tariff option {id}");
        let variables = json!({ "bookTariffoptionInput": { "tariffoptionId": id } });
        let data: BookTariffoptionData = self
            .graphql(BOOK_MUTATION, Some("tariffOptions"), Some(variables))
            .await?;

        let booking = data.book_tariffoption;
        if !booking.success {
            return Err(Error::Booking {
                operation: "bookTariffoption",
                payload: serde_json::to_value(&booking).unwrap_or_default(),
            });
        }
        Ok(booking)
    }

    /// Commit a reserved booking. Phase two; consumes the process id.
    pub async fn confirm_tariff_booking(&self, process_id: &str) -> Result<bool, Error> {
        debug!("confirming booking process {process_id}");
        let variables = json!({ "confirmTariffoptionBookingInput": { "processId": process_id } });
        let data: ConfirmTariffoptionBookingData = self
            .graphql(CONFIRM_MUTATION, Some("tariffOptions"), Some(variables))
            .await?;

        let confirmation = data.confirm_tariffoption_booking;
        if !confirmation.success {
            return Err(Error::Booking {
                operation: "confirmTariffoptionBooking",
                payload: serde_json::to_value(&confirmation).unwrap_or_default(),
            });
        }
        Ok(true)
    }

    /// Book and confirm a tariff option, by name or id.
    ///
    /// If the tariff is already booked and its consumption records still
    /// have allowance left, nothing is booked again and the call returns
    /// `true`. A booked-but-exhausted tariff (and an unbooked one) goes
    /// through the full book-then-confirm sequence.
    pub async fn buy_tariff_option(
        &self,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<bool, Error> {
        let id = match (id, name) {
            (Some(id), _) => id.to_owned(),
            (None, Some(name)) => self.resolve_tariff_name(name).await?,
            (None, None) => {
                return Err(Error::TariffNotFound { name: None, id: None });
            }
        };

        if self.is_booked(&id).await? {
            info!("tariff {id} already booked, checking remaining allowance");
            let mut left = 0.0;
            let mut max = 0.0;
            for record in self.get_consumptions(&id).await? {
                for consumption in &record.consumptions {
                    left += consumption.left;
                    max += consumption.max;
                }
            }

            if left > 0.0 {
                info!("nothing to do, remaining allowance for tariff {id}: {left}/{max}");
                return Ok(true);
            }
            info!("allowance for tariff {id} exhausted ({left}/{max}), rebooking");
        }

        let booking = self.book_tariff_option(&id).await?;
        let process_id = booking.process_id.clone().ok_or_else(|| Error::Booking {
            operation: "bookTariffoption",
            payload: serde_json::to_value(&booking).unwrap_or_default(),
        })?;
        self.confirm_tariff_booking(&process_id).await
    }
}
