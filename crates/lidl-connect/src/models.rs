// GraphQL response types
//
// Each query/mutation decodes into its own struct chain mirroring the
// server's nesting; the public records at the bottom are what callers
// see. Fields use `#[serde(default)]` liberally because the API is
// inconsistent about field presence across tariff kinds.

use serde::{Deserialize, Serialize};

// ── Query envelopes (internal nesting) ───────────────────────────────

/// `query balanceInfo { currentCustomer { balance } }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BalanceData {
    pub current_customer: CurrentCustomer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentCustomer {
    /// Balance in integer cents.
    pub balance: i64,
}

/// Bookable tariff listing: the server nests the list two levels deep
/// under a repeated `bookableTariffoptions` key.
#[derive(Debug, Deserialize)]
pub(crate) struct BookableTariffsData {
    pub tariffoptions: BookableTariffsOuter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookableTariffsOuter {
    pub bookable_tariffoptions: BookableTariffsInner,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookableTariffsInner {
    pub bookable_tariffoptions: Vec<Tariff>,
}

/// Booked tariff listing, same double-nesting as the bookable one.
#[derive(Debug, Deserialize)]
pub(crate) struct BookedTariffsData {
    pub tariffoptions: BookedTariffsOuter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookedTariffsOuter {
    pub booked_tariffoptions: BookedTariffsInner,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookedTariffsInner {
    pub booked_tariffoptions: Vec<BookedTariff>,
}

/// `query consumptions { consumptions { consumptionsForUnit { ... } } }`
#[derive(Debug, Deserialize)]
pub(crate) struct ConsumptionsData {
    pub consumptions: ConsumptionsForUnitList,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsumptionsForUnitList {
    pub consumptions_for_unit: Vec<UnitConsumptions>,
}

/// One billing unit; units without tariff/option records omit the key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnitConsumptions {
    #[serde(default)]
    pub tariff_or_options: Option<Vec<TariffConsumptions>>,
}

/// `mutation { bookTariffoption(...) { ... } }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookTariffoptionData {
    pub book_tariffoption: BookingResult,
}

/// `mutation { confirmTariffoptionBooking(...) { ... } }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmTariffoptionBookingData {
    pub confirm_tariffoption_booking: ConfirmationResult,
}

// ── Tariff ───────────────────────────────────────────────────────────

/// A bookable tariff option (plan or add-on).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub tariffoption_id: String,
    pub name: String,
    /// Price in integer cents.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub duration: Option<TariffDuration>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub automatic_extension: Option<bool>,
    #[serde(default)]
    pub requires_contract_summary: Option<bool>,
    #[serde(default)]
    pub not_bookable_with: Vec<String>,
}

/// Tariff runtime, e.g. `{ amount: 28, unit: "day" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffDuration {
    pub amount: i64,
    pub unit: String,
}

/// A currently booked tariff option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedTariff {
    pub tariffoption_id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub duration: Option<TariffDuration>,
    #[serde(default)]
    pub status_key: Option<String>,
    #[serde(default)]
    pub start_of_runtime: Option<String>,
    #[serde(default)]
    pub end_of_runtime: Option<String>,
    #[serde(default)]
    pub possible_changing_date: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub cancelable: Option<bool>,
    #[serde(default)]
    pub restricted_service: Option<bool>,
    #[serde(default)]
    pub tariff_state: Option<String>,
    #[serde(default)]
    pub automatic_extension: Option<bool>,
}

// ── Consumption ──────────────────────────────────────────────────────

/// Usage records for one tariff or option, as flattened out of the
/// per-billing-unit nesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffConsumptions {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub consumptions: Vec<Consumption>,
}

/// A single consumed/left/max usage record.
///
/// Numeric fields are `f64` -- data allowances come back fractional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    #[serde(default)]
    pub consumed: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub formatted_unit: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

// ── Booking ──────────────────────────────────────────────────────────

/// Result of the booking mutation. The `process_id` is single-use input
/// to the confirmation step and has no meaning beyond that round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResult {
    pub success: bool,
    #[serde(default)]
    pub process_id: Option<String>,
    /// Contract summary document, when the tariff requires one.
    #[serde(default, rename = "bookTariffoptionDocumentUrl")]
    pub document_url: Option<String>,
}

/// Result of the confirmation mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationResult {
    pub success: bool,
}
