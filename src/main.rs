use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod broadcast;
mod cli;
mod config;
mod errors;
mod feed;
mod jobs;
mod models;
mod publisher;
mod store;

use api::BackendClient;
use broadcast::{ChangeNotifier, FanoutNotifier};
use feed::NotificationFeed;
use jobs::reminder::ReminderScheduler;
use models::SessionUser;
use publisher::NotificationPublisher;
use store::backend::FileBackend;
use store::NotificationStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "stocknotifyd=debug,stock_notify=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let mut user = SessionUser::new(args.user_id, args.user_name.clone(), args.role.clone());
    user.notifications_enabled = !args.no_notifications;

    let backend = Arc::new(FileBackend::open(&cfg.storage_dir)?);
    let notifier = Arc::new(FanoutNotifier::watching(backend.dir())?);
    let notifier_dyn: Arc<dyn ChangeNotifier> = notifier.clone();
    let store = NotificationStore::new(backend);

    match args.command.unwrap_or(cli::Commands::Watch) {
        cli::Commands::Watch => run_watch(&cfg, store, notifier, notifier_dyn, user).await,
        cli::Commands::List => {
            let feed = NotificationFeed::new(store, notifier_dyn, &user);
            print_feed(&feed);
            Ok(())
        }
        cli::Commands::Read { id } => {
            let mut feed = NotificationFeed::new(store, notifier_dyn, &user);
            feed.mark_as_read(id)?;
            tracing::info!(id, "marked as read");
            print_feed(&feed);
            Ok(())
        }
        cli::Commands::Remove { id } => {
            let mut feed = NotificationFeed::new(store, notifier_dyn, &user);
            feed.remove(id)?;
            tracing::info!(id, "removed");
            print_feed(&feed);
            Ok(())
        }
        cli::Commands::Clear => {
            let mut feed = NotificationFeed::new(store, notifier_dyn, &user);
            feed.clear_all()?;
            tracing::info!("cleared all notifications");
            Ok(())
        }
    }
}

/// Run the reminder scheduler plus a live feed that re-renders whenever
/// either broadcast channel signals a storage change.
async fn run_watch(
    cfg: &config::Config,
    store: NotificationStore,
    notifier: Arc<FanoutNotifier>,
    notifier_dyn: Arc<dyn ChangeNotifier>,
    user: SessionUser,
) -> anyhow::Result<()> {
    tracing::info!(
        storage_dir = %cfg.storage_dir.display(),
        api = %cfg.api_base_url,
        role = %user.role,
        "starting notification watch"
    );

    let publisher = Arc::new(NotificationPublisher::new(
        store.clone(),
        notifier_dyn.clone(),
    ));
    let source = Arc::new(BackendClient::new(&cfg.api_base_url)?);
    let scheduler = ReminderScheduler::new(source, publisher, user.clone())
        .with_interval(Duration::from_secs(cfg.reminder_interval_secs));
    let reminder_handle = scheduler.spawn();

    let mut feed = NotificationFeed::new(store, notifier_dyn, &user);
    let mut rx = notifier.subscribe();
    print_feed(&feed);

    loop {
        tokio::select! {
            change = rx.recv() => match change {
                Ok(change) if change.key == store::NOTIFICATIONS_KEY => {
                    feed.refresh();
                    print_feed(&feed);
                }
                Ok(_) => {} // some other storage key, not ours
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "broadcast lag, refreshing");
                    feed.refresh();
                    print_feed(&feed);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    // Clears the reminder timer on teardown.
    reminder_handle.abort();
    Ok(())
}

fn print_feed(feed: &NotificationFeed) {
    println!("── notifications ({} unread) ──", feed.unread_count());
    for record in feed.items().iter().take(10) {
        println!(
            "{} [{}] {} — {}{}",
            feed::icon(&record.payload),
            record.id,
            record.title,
            feed::summary(record),
            if record.read { " (read)" } else { "" },
        );
    }
    if feed.items().len() > 10 {
        println!("… and {} more", feed.items().len() - 10);
    }
}
