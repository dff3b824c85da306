use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use utoipa::{IntoParams, ToSchema};

/// Rendered in place of a missing indicative cost.
pub const COST_NOT_AVAILABLE: &str = "Cost not available";

// ============ Database Models ============

/// Rating columns of one row in `certificates_deduped`.
#[derive(Debug, Clone, FromRow)]
pub struct CertificateRow {
    /// Current energy rating band (e.g. "C").
    pub current_energy_rating: Option<String>,
    /// Potential energy rating band after improvements.
    pub potential_energy_rating: Option<String>,
    /// Current energy efficiency score.
    pub current_energy_efficiency: Option<i64>,
    /// Potential energy efficiency score.
    pub potential_energy_efficiency: Option<i64>,
    /// Date the certificate was lodged.
    pub lodgement_date: Option<NaiveDate>,
}

/// One row of `certificates_deduped_recommendations` with a description.
///
/// Expects the columns `description`, `cost` and `cost_type`, where
/// `cost_type` is SQLite's `typeof(cost)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRow {
    pub description: String,
    pub cost: Cost,
}

impl<'r> FromRow<'r, SqliteRow> for RecommendationRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let description: String = row.try_get("description")?;
        let cost_type: String = row.try_get("cost_type")?;

        let cost = match cost_type.as_str() {
            "integer" => Cost::Integer(row.try_get("cost")?),
            "real" => Cost::Real(row.try_get("cost")?),
            "text" => Cost::from_text(row.try_get("cost")?),
            // null, and blobs we cannot render
            _ => Cost::NotAvailable,
        };

        Ok(Self { description, cost })
    }
}

/// Indicative cost of a recommendation, rendered exactly as stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Cost {
    Integer(i64),
    Real(f64),
    /// Free-text cost band such as "£100 - £350".
    Text(String),
    NotAvailable,
}

impl Cost {
    fn from_text(text: String) -> Self {
        // Same character set the recommendations query treats as blank.
        if text
            .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'))
            .is_empty()
        {
            Cost::NotAvailable
        } else {
            Cost::Text(text)
        }
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cost::Integer(v) => serializer.serialize_i64(*v),
            Cost::Real(v) => serializer.serialize_f64(*v),
            Cost::Text(t) => serializer.serialize_str(t),
            Cost::NotAvailable => serializer.serialize_str(COST_NOT_AVAILABLE),
        }
    }
}

// ============ API Models ============

/// Raw query-string pairs in request order.
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `key`; later repeats are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// Query parameters for `GET /api/search`.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Postcode in any case, with or without spaces.
    pub postcode: Option<String>,
}

impl SearchParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            postcode: first_value(pairs, "postcode"),
        }
    }
}

/// Query parameters for `GET /api/rating`.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RatingParams {
    /// Postcode in any case, with or without spaces.
    pub postcode: Option<String>,
    /// Address exactly as returned by `/api/search`.
    pub address: Option<String>,
}

impl RatingParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            postcode: first_value(pairs, "postcode"),
            address: first_value(pairs, "address"),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Normalized postcode that was queried.
    pub postcode: String,
    /// Addresses in natural order.
    pub addresses: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Recommendation {
    pub description: String,
    /// Number, cost band text, or "Cost not available".
    #[schema(value_type = Object)]
    pub cost: Cost,
}

impl From<RecommendationRow> for Recommendation {
    fn from(row: RecommendationRow) -> Self {
        Self {
            description: row.description,
            cost: row.cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatingResponse {
    pub postcode: String,
    pub address: String,
    pub rating: Option<String>,
    pub potential_rating: Option<String>,
    pub current_efficiency: Option<i64>,
    pub potential_efficiency: Option<i64>,
    pub lodgement_date: Option<NaiveDate>,
    pub recommendations: Vec<Recommendation>,
}

impl RatingResponse {
    pub fn new(
        postcode: String,
        address: String,
        certificate: CertificateRow,
        recommendations: Vec<RecommendationRow>,
    ) -> Self {
        Self {
            postcode,
            address,
            rating: certificate.current_energy_rating,
            potential_rating: certificate.potential_energy_rating,
            current_efficiency: certificate.current_energy_efficiency,
            potential_efficiency: certificate.potential_energy_efficiency,
            lodgement_date: certificate.lodgement_date,
            recommendations: recommendations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a database round-trip check.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            database: Some("connected".to_string()),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            database: None,
            error: Some(error.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Body of every non-2xx response except health.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
