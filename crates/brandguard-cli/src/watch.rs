//! `watch` command: run a live session and redraw the feed on every change.

use brandguard_core::AppConfig;
use brandguard_sync::{Session, SessionConfig};

use crate::render::{render_feed, FeedView};

pub(crate) async fn run_watch(config: &AppConfig) -> anyhow::Result<()> {
    let session = Session::start(&SessionConfig::from_app_config(config))?;
    let mut revisions = session.store().subscribe();
    let mut loading = session.loading();
    let mut connection = session.connection_state();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    draw(&session);
    loop {
        // The senders behind these receivers live as long as the session.
        tokio::select! {
            () = &mut shutdown => break,
            Ok(()) = revisions.changed() => {}
            Ok(()) = loading.changed() => {}
            Ok(()) = connection.changed() => {}
        }
        draw(&session);
    }

    let report = session.teardown().await;
    tracing::info!(?report, "watch stopped");
    Ok(())
}

fn draw(session: &Session) {
    let mentions = session.store().mentions();
    let alerts = session.store().alerts();
    let view = FeedView {
        loading: session.is_loading(),
        live: session.is_live(),
        mentions: &mentions,
        alerts: &alerts,
    };
    // Clear the terminal and home the cursor before each frame.
    print!("\x1B[2J\x1B[H{}", render_feed(&view));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, tearing down session");
}
