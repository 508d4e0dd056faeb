use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::warn;

use visitor_client::config::Config;
use visitor_client::form::{MessageForm, SubmitOutcome};
use visitor_client::{ApiClient, VisitorBook, page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they don't interleave with the page
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visitor_client=warn,visitor_book=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let book = VisitorBook::new(ApiClient::new(config.api_url, config.timeout)?);
    let mut revisions = book.cache().subscribe();

    // Failures land in the cache and show up as the list's error state
    let (count, messages) = tokio::join!(book.fetch_visitor_count(), book.fetch_messages());
    if let Err(e) = count.and(messages) {
        warn!("Initial load incomplete: {}", e);
    }

    let mut form = MessageForm::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", page::render(book.cache(), &form));
    revisions.borrow_and_update();

    loop {
        let Some(name) = prompt(&mut lines, "Your Name", &form.name).await? else {
            break;
        };
        let Some(content) = prompt(&mut lines, "Your Message", &form.content).await? else {
            break;
        };
        form.name = name;
        form.content = content;

        match form.submit(&book).await {
            SubmitOutcome::Submitted(_) => {}
            SubmitOutcome::Invalid(notice) | SubmitOutcome::Failed(notice) => {
                println!("\n!! {}\n", notice.0);
            }
        }

        if revisions.has_changed().unwrap_or(false) {
            revisions.borrow_and_update();
            println!("{}", page::render(book.cache(), &form));
        }
    }

    Ok(())
}

/// Read one field. After a failed submit the field still holds the old text;
/// an empty answer keeps it.
async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
    current: &str,
) -> anyhow::Result<Option<String>> {
    let label = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    Ok(lines.next_line().await?.map(|line| {
        if line.is_empty() && !current.is_empty() {
            current.to_string()
        } else {
            line
        }
    }))
}
