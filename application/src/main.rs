use std::{
    io,
    process::ExitCode,
    sync::OnceLock,
};

use application::{page, Args, Config, Context};
use common::Date;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .init();

    start().await.unwrap_or_else(ExitCode::from)
}

async fn start() -> Result<ExitCode, u8> {
    let Args {
        config,
        today,
        page,
    } = Args::parse().map_err(|e| {
        // Help and version requests are reported as errors too.
        _ = e.print();
        u8::try_from(e.exit_code()).unwrap_or(2)
    })?;

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        1
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let ctx = Context::new(&config, today.unwrap_or_else(Date::today))
        .await
        .map_err(|e| {
            log::error!("failed to start session: {e}");
            e.exit_code
        })?;

    let view = page::render(&ctx, page).await.map_err(|e| {
        log::error!("{e}");
        e.exit_code
    })?;
    print!("{view}");

    Ok(ExitCode::SUCCESS)
}
