use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod fetcher;
pub(crate) mod hn_api;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    #[arg(help = "Number of top stories to fetch, overrides NUM_STORIES")]
    num_stories: Option<usize>,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Print the stories as json instead of text")]
    json: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let num_stories = args.num_stories.unwrap_or(config::config().num_stories);
    let source = std::sync::Arc::new(hn_api::HnClient);

    let start = std::time::Instant::now();
    let stories =
        fetcher::top_stories(&source, num_stories, config::config().fetch_deadline).await?;

    tracing::info!(
        requested = num_stories,
        kept = stories.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Fetched top stories"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stories)?);
        return Ok(());
    }

    for (rank, story) in stories.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) [{} points]",
            rank + 1,
            story.item.title.as_deref().unwrap_or("<untitled>"),
            story.host,
            story.item.score.unwrap_or(0),
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    use clap::Parser;
    let args = Args::parse();

    let file_appender = tracing_appender::rolling::daily("./log", "quiet_top_stories.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer();
    let file_layer = file_layer
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if config::config().log_to_console || args.log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    tracing::info!(
        config =? config::config(),
        args =? args,
        "Starting quiet top stories"
    );

    if let Err(e) = run(args).await {
        tracing::error!(error =? e, "Fetch cycle failed");
        std::process::exit(1);
    }
}
