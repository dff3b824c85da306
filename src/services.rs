use crate::errors::AppError;
use crate::models::{
    CertificateRow, HealthResponse, RatingResponse, RecommendationRow, SearchResponse,
};
use crate::normalize::{normalize_address, normalize_postcode, sort_addresses};
use sqlx::SqlitePool;

const SEARCH_QUERY: &str = "SELECT ADDRESS
     FROM certificates_deduped
     WHERE POSTCODE = ? AND ADDRESS IS NOT NULL";

// Exports may store scores as REAL and dates with a time part.
const RATING_QUERY: &str = "SELECT
         CURRENT_ENERGY_RATING AS current_energy_rating,
         POTENTIAL_ENERGY_RATING AS potential_energy_rating,
         CAST(NULLIF(CURRENT_ENERGY_EFFICIENCY, '') AS INTEGER) AS current_energy_efficiency,
         CAST(NULLIF(POTENTIAL_ENERGY_EFFICIENCY, '') AS INTEGER) AS potential_energy_efficiency,
         date(LODGEMENT_DATE) AS lodgement_date
     FROM certificates_deduped
     WHERE POSTCODE = ? AND ADDRESS = ?
     LIMIT 1";

// Missing and blank costs sort first together; description keeps equal
// costs in a stable order.
const RECOMMENDATIONS_QUERY: &str = "SELECT
         IMPROVEMENT_DESCR_TEXT AS description,
         INDICATIVE_COST AS cost,
         typeof(INDICATIVE_COST) AS cost_type
     FROM certificates_deduped_recommendations
     WHERE POSTCODE = ? AND ADDRESS = ?
       AND IMPROVEMENT_DESCR_TEXT IS NOT NULL
     ORDER BY
         CASE
             WHEN typeof(INDICATIVE_COST) = 'text'
                 AND trim(INDICATIVE_COST, ' ' || char(9) || char(10) || char(13)) = ''
                 THEN NULL
             ELSE INDICATIVE_COST
         END ASC NULLS FIRST,
         IMPROVEMENT_DESCR_TEXT ASC";

/// Read-only lookups over the certificate database.
pub struct CertificateService {
    pool: SqlitePool,
}

impl CertificateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All addresses registered under a postcode, in natural order.
    ///
    /// Fails with `BadRequest` before touching the database when the
    /// normalized postcode is empty.
    pub async fn search_addresses(&self, raw_postcode: &str) -> Result<SearchResponse, AppError> {
        let postcode = normalize_postcode(raw_postcode);
        if postcode.is_empty() {
            return Err(AppError::BadRequest("Postcode is required".to_string()));
        }

        let mut addresses = sqlx::query_scalar::<_, String>(SEARCH_QUERY)
            .bind(&postcode)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Address search failed for '{}': {:?}", postcode, e);
                AppError::DatabaseError(e)
            })?;

        sort_addresses(&mut addresses);
        tracing::debug!("Found {} addresses for {}", addresses.len(), postcode);

        Ok(SearchResponse {
            count: addresses.len(),
            postcode,
            addresses,
        })
    }

    /// Rating and recommendations for one (postcode, address) pair.
    ///
    /// The address must match the stored value exactly after trimming.
    pub async fn get_rating(
        &self,
        raw_postcode: &str,
        raw_address: &str,
    ) -> Result<RatingResponse, AppError> {
        let postcode = normalize_postcode(raw_postcode);
        let address = normalize_address(raw_address);
        if postcode.is_empty() || address.is_empty() {
            return Err(AppError::BadRequest(
                "Both postcode and address are required".to_string(),
            ));
        }

        let certificate = sqlx::query_as::<_, CertificateRow>(RATING_QUERY)
            .bind(&postcode)
            .bind(&address)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("No rating found for this address".to_string()))?;

        let recommendations = self.find_recommendations(&postcode, &address).await?;
        tracing::debug!(
            "Found {} recommendations for {} / {}",
            recommendations.len(),
            postcode,
            address
        );

        Ok(RatingResponse::new(
            postcode,
            address,
            certificate,
            recommendations,
        ))
    }

    async fn find_recommendations(
        &self,
        postcode: &str,
        address: &str,
    ) -> Result<Vec<RecommendationRow>, AppError> {
        let rows = sqlx::query_as::<_, RecommendationRow>(RECOMMENDATIONS_QUERY)
            .bind(postcode)
            .bind(address)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Recommendations query failed for '{}' / '{}': {:?}",
                    postcode,
                    address,
                    e
                );
                AppError::DatabaseError(e)
            })?;

        Ok(rows)
    }

    /// Round-trips `SELECT 1`. Never fails; problems are reported in the body.
    pub async fn check_health(&self) -> HealthResponse {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => HealthResponse::healthy(),
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                let message = e.to_string();
                if message.trim().is_empty() {
                    HealthResponse::unhealthy("database unreachable")
                } else {
                    HealthResponse::unhealthy(message)
                }
            }
        }
    }
}
