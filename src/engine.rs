use crate::core::{DinnerError, SearchResult};
use crate::query::QueryDescriptor;
use async_trait::async_trait;
use serde::Deserialize;

/// Boundary to the remote recipe match engine. The engine owns ranking and
/// the per-recipe unmatched-ingredient counts; this side only transports.
#[async_trait]
pub trait MatchEngine: Send + Sync {
    async fn search(&self, query: &QueryDescriptor) -> Result<SearchResult, DinnerError>;
}

// The engine wraps every payload in a `data` envelope.
#[derive(Deserialize)]
struct Envelope {
    data: SearchResult,
}

pub struct HttpMatchEngine {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMatchEngine {
    pub fn new(base_url: String) -> Result<Self, DinnerError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("Dinnertime/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DinnerError::Network)?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl MatchEngine for HttpMatchEngine {
    async fn search(&self, query: &QueryDescriptor) -> Result<SearchResult, DinnerError> {
        let url = format!(
            "{}/api/recipes/search?{}",
            self.base_url.trim_end_matches('/'),
            query.query_string()
        );

        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DinnerError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = resp.json().await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_the_data_envelope() {
        let body = r#"{
            "data": {
                "values": [
                    {
                        "recipe": {
                            "id": 7,
                            "title": "Vanilla Pudding",
                            "image_url": "http://img.example/7.jpg",
                            "prep_time_mins": 10,
                            "cook_time_mins": 15,
                            "rating": 4.5,
                            "ingredients": ["1 cup milk", "2 tsp vanilla"]
                        },
                        "unmatched_ingredients": 1
                    }
                ],
                "total_pages": 3,
                "page_number": 1
            }
        }"#;

        let envelope: Envelope = serde_json::from_str(body).unwrap();
        let result = envelope.data;

        assert_eq!(result.values.len(), 1);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.page_number, 1);
        assert_eq!(result.values[0].unmatched_ingredients, 1);
        assert_eq!(result.values[0].recipe.title, "Vanilla Pudding");
    }
}
