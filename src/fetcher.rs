//! The concurrent fetch-and-reassemble pipeline. One fetch task per
//! ranked item runs in parallel; every task reports exactly once, the
//! coordinator collects every report, restores rank order, and keeps
//! only link-bearing stories.

#[derive(Debug, thiserror::Error)]
pub(crate) enum TopStoriesError {
    #[error("top story ranking unavailable")]
    SourceUnavailable(#[source] anyhow::Error),

    #[error("item fetches still pending after {0:?}")]
    DeadlineExceeded(std::time::Duration),
}

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct Story {
    #[serde(flatten)]
    pub(crate) item: crate::hn_api::Item,

    // Hostname of the story link, leading "www." stripped. Empty when
    // the url is absent or unparsable.
    pub(crate) host: String,
}

impl Story {
    fn new(item: crate::hn_api::Item) -> Self {
        let host = item.url.as_deref().map(host_of).unwrap_or_default();
        Self { item, host }
    }
}

// One record per launched task, tagged with the task's rank so the
// arrival jumble can be undone. The outcome is success xor failure,
// so a task cannot publish twice.
struct FetchResult {
    index: usize,
    outcome: anyhow::Result<crate::hn_api::Item>,
}

pub(crate) async fn top_stories<S: crate::hn_api::ItemSource>(
    source: &std::sync::Arc<S>,
    n: usize,
    deadline: std::time::Duration,
) -> Result<Vec<Story>, TopStoriesError> {
    let ids = source
        .top_item_ids()
        .await
        .map_err(TopStoriesError::SourceUnavailable)?;

    // The ranking may be shorter than asked for; clamp rather than
    // index out of range.
    let ids: Vec<u64> = ids.into_iter().take(n).collect();
    let launched = ids.len();

    let mut join_set: tokio::task::JoinSet<FetchResult> = tokio::task::JoinSet::new();

    for (index, id) in ids.into_iter().enumerate() {
        let source = std::sync::Arc::clone(source);
        join_set.spawn(async move {
            FetchResult {
                index,
                outcome: source.item(id).await,
            }
        });
    }

    let collect = async {
        let mut results = Vec::with_capacity(launched);
        while let Some(res) = join_set.join_next().await {
            results.push(res.expect("JoinSet to work"));
        }
        results
    };

    // Dropping the JoinSet after expiry aborts every still-running
    // fetch, so one hung item call cannot hang the cycle forever.
    let mut results = tokio::time::timeout(deadline, collect)
        .await
        .map_err(|_| TopStoriesError::DeadlineExceeded(deadline))?;

    debug_assert_eq!(results.len(), launched);

    results.sort_unstable_by_key(|result| result.index);

    let stories: Vec<Story> = results
        .into_iter()
        .filter_map(|result| result.outcome.ok())
        .map(Story::new)
        .filter(is_story_link)
        .collect();

    tracing::debug!(
        requested = n,
        launched,
        kept = stories.len(),
        "Assembled top stories"
    );

    Ok(stories)
}

fn is_story_link(story: &Story) -> bool {
    story.item.item_type == "story" && story.item.url.as_deref().is_some_and(|url| !url.is_empty())
}

fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .host_str()
                .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
        })
        .unwrap_or_default()
}
