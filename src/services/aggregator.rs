use crate::types::dto::games::{RatingColor, SampleReview};
use serde::Deserialize;
use std::time::Duration;

/// How many external reviews feed the percentage calculation
const SUMMARY_PAGE_SIZE: u32 = 100;

/// How many external reviews are shown verbatim on the detail page
const SAMPLE_PAGE_SIZE: u32 = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Aggregated verdict from the external review API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub positive_pct: u8,
    pub color: RatingColor,
}

impl ReviewSummary {
    /// Fallback used whenever the external API cannot be reached or parsed
    pub fn unavailable() -> Self {
        summarize(0, 0)
    }
}

/// Derive the percentage and traffic-light colour from raw counts
///
/// Zero total reviews yields 0% and red rather than a division error. The
/// counts come from an untrusted payload, so the result is capped at 100
/// even when the API claims more positives than total reviews.
pub fn summarize(total_reviews: u64, total_positive: u64) -> ReviewSummary {
    let positive_pct = if total_reviews > 0 {
        (total_positive.saturating_mul(100) / total_reviews).min(100) as u8
    } else {
        0
    };
    let color = if positive_pct >= 80 {
        RatingColor::Green
    } else if positive_pct >= 60 {
        RatingColor::Orange
    } else {
        RatingColor::Red
    };
    ReviewSummary {
        positive_pct,
        color,
    }
}

#[derive(Debug, Deserialize)]
struct ReviewsPayload {
    #[serde(default)]
    query_summary: QuerySummary,
    #[serde(default)]
    reviews: Vec<RawReview>,
}

#[derive(Debug, Default, Deserialize)]
struct QuerySummary {
    #[serde(default)]
    total_reviews: u64,
    #[serde(default)]
    total_positive: u64,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    author: RawAuthor,
    review: String,
    voted_up: bool,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    steamid: String,
}

/// Client for the third-party review API
///
/// All failures degrade to empty results; the detail page must render even
/// when the external service is down.
#[derive(Debug, Clone)]
pub struct ReviewAggregator {
    client: reqwest::Client,
    base_url: String,
}

impl ReviewAggregator {
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("playrate-backend")
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }

    async fn fetch_payload(
        &self,
        game_id: &str,
        page_size: u32,
    ) -> Result<ReviewsPayload, reqwest::Error> {
        let url = format!(
            "{}/{}?json=1&num_per_page={}",
            self.base_url, game_id, page_size
        );
        let response = self.client.get(&url).send().await?.error_for_status()?;
        response.json::<ReviewsPayload>().await
    }

    /// Fetch the positive-review percentage for a game
    pub async fn fetch_summary(&self, game_id: &str) -> ReviewSummary {
        match self.fetch_payload(game_id, SUMMARY_PAGE_SIZE).await {
            Ok(payload) => summarize(
                payload.query_summary.total_reviews,
                payload.query_summary.total_positive,
            ),
            Err(e) => {
                tracing::warn!(game_id, error = %e, "review summary fetch failed");
                ReviewSummary::unavailable()
            }
        }
    }

    /// Fetch a handful of external review excerpts for a game
    pub async fn fetch_samples(&self, game_id: &str) -> Vec<SampleReview> {
        match self.fetch_payload(game_id, SAMPLE_PAGE_SIZE).await {
            Ok(payload) => payload
                .reviews
                .into_iter()
                .map(|raw| SampleReview {
                    author_id: raw.author.steamid,
                    text: raw.review,
                    voted_up: raw.voted_up,
                })
                .collect(),
            Err(e) => {
                tracing::warn!(game_id, error = %e, "review sample fetch failed");
                Vec::new()
            }
        }
    }
}
