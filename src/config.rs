#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) api_base: String,
    pub(crate) num_stories: usize,
    pub(crate) fetch_deadline: std::time::Duration,
    pub(crate) log_to_console: bool,
}

static CONFIG: std::sync::LazyLock<Config> = std::sync::LazyLock::new(|| {
    dotenvy::dotenv().ok();

    Config {
        api_base: env_or("HN_API_BASE", "https://hacker-news.firebaseio.com/v0"),
        num_stories: env_or("NUM_STORIES", "30")
            .parse()
            .expect("NUM_STORIES to be a number"),
        fetch_deadline: std::time::Duration::from_secs(
            env_or("FETCH_DEADLINE_SECS", "30")
                .parse()
                .expect("FETCH_DEADLINE_SECS to be a number"),
        ),
        log_to_console: env_or("LOG_TO_CONSOLE", "false")
            .parse()
            .expect("LOG_TO_CONSOLE to be a bool"),
    }
});

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn config() -> &'static Config {
    &CONFIG
}
