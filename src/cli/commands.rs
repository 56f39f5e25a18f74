use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::app::{AppContext, Result};
use crate::feed;
use crate::pipeline::Pipeline;
use crate::pubsub::{self, Producer, Subscriber};
use crate::scheduler::Scheduler;
use crate::server::{self, AppState};
use crate::syncer::ingest::IngestService;
use crate::syncer::{NewsSyncer, Syncer};

/// Run the whole service: scheduler publishing listing batches on the
/// bus, the subscriber draining them into storage, and the read API.
/// Ctrl-C cancels the shared token and the three halves drain out.
pub async fn serve(ctx: AppContext) -> Result<()> {
    let token = CancellationToken::new();

    let (producer, consumer) = pubsub::memory_bus();
    let producer: Arc<dyn Producer> = Arc::new(producer);

    let pipeline = Arc::new(Pipeline::with_workers(
        ctx.store.clone(),
        ctx.client.clone(),
        ctx.config.feed.detail_url.clone(),
        ctx.config.sync.workers,
    ));
    let handler = Arc::new(IngestService::new(
        pipeline,
        ctx.store.clone(),
        token.clone(),
    ));
    let subscriber = Subscriber::new(Arc::new(consumer));

    let syncer: Arc<dyn Syncer> = Arc::new(NewsSyncer::new(
        ctx.client.clone(),
        producer,
        ctx.config.feed.listing_url.clone(),
    ));
    let scheduler = Scheduler::new(syncer, ctx.config.sync_interval()?, ctx.config.sync.on_start);

    let addr = ctx.config.server_addr()?;
    let state = AppState::new(ctx.store.clone());

    let subscriber_token = token.clone();
    let subscriber_task =
        tokio::spawn(async move { subscriber.run(subscriber_token, handler).await });

    let scheduler_token = token.clone();
    let scheduler_task = tokio::spawn(async move { scheduler.run(scheduler_token).await });

    let server_task = tokio::spawn(server::run(addr, state, token.clone()));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    token.cancel();

    let _ = subscriber_task.await;
    let _ = scheduler_task.await;
    match server_task.await {
        Ok(Err(e)) => error!(error = %e, "http server error"),
        Ok(Ok(())) | Err(_) => {}
    }

    Ok(())
}

/// One end-to-end cycle without the bus: fetch the listing, run the
/// batch through the pipeline, print the tally.
pub async fn sync_once(ctx: &AppContext) -> Result<()> {
    let token = CancellationToken::new();

    let listing =
        feed::fetch_listing(ctx.client.as_ref(), &token, &ctx.config.feed.listing_url).await?;
    println!("{}: {} items listed", listing.club_name, listing.items.len());

    let pipeline = Pipeline::with_workers(
        ctx.store.clone(),
        ctx.client.clone(),
        ctx.config.feed.detail_url.clone(),
        ctx.config.sync.workers,
    );
    let report = pipeline.process(&token, listing.items).await;

    println!(
        "Sync complete: {} saved, {} skipped, {} failed",
        report.saved, report.skipped, report.failed
    );
    Ok(())
}

pub async fn list_articles(ctx: &AppContext) -> Result<()> {
    let articles = ctx.store.list().await?;

    if articles.is_empty() {
        println!("No articles stored");
        return Ok(());
    }

    for article in articles {
        let marker = if article.is_published { " " } else { "*" };
        println!("{} {} {} {}", marker, article.publish_date, article.id, article.title);
    }

    Ok(())
}
