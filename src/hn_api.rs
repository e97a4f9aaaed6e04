//! Client for the Hacker News item-graph API. The service exposes a
//! ranked list of top item ids plus a per-id item lookup; everything
//! else on an item is display data we carry along untouched.

pub(crate) trait ItemSource: Send + Sync + 'static {
    fn top_item_ids(&self) -> impl std::future::Future<Output = anyhow::Result<Vec<u64>>> + Send;
    fn item(&self, id: u64) -> impl std::future::Future<Output = anyhow::Result<Item>> + Send;
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub(crate) struct Item {
    pub(crate) id: u64,

    #[serde(rename = "type")]
    pub(crate) item_type: String,

    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) by: Option<String>,
    pub(crate) score: Option<i64>,
    pub(crate) descendants: Option<i64>,
}

pub(crate) struct HnClient;

impl ItemSource for HnClient {
    async fn top_item_ids(&self) -> anyhow::Result<Vec<u64>> {
        let response = crate::CLIENT
            .get(format!(
                "{}/topstories.json",
                crate::config::config().api_base
            ))
            .send()
            .await?;

        Ok(response.error_for_status()?.json::<Vec<u64>>().await?)
    }

    async fn item(&self, id: u64) -> anyhow::Result<Item> {
        let response = crate::CLIENT
            .get(format!("{}/item/{id}.json", crate::config::config().api_base))
            .send()
            .await?;

        // The API answers `null` for unknown ids, which fails to
        // deserialize into an Item and surfaces as an error here.
        Ok(response.error_for_status()?.json::<Item>().await?)
    }
}
