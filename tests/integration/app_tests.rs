// Tests for a whole invocation: command line in, logged outcome out

use super::*;
use clap::Parser;
use pricewatch::app::{self, App};
use pricewatch::cli::Cli;
use pricewatch::core::Decision;
use std::fs;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["pricewatch"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.items_dir = dir.path().join("items");
    config.notifications.smtp.recipient = Some("config@example.com".to_string());
    config
}

fn record_path(dir: &TempDir, id: &str) -> PathBuf {
    dir.path().join("items/current").join(id).join("current_price.txt")
}

fn unused_port() -> u16 {
    // Bind then drop to get a port nothing listens on
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn test_email_flag_overrides_configured_recipient() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let app = App::with_config(
        parse(&["https://www.emag.bg/tv/pd/X/", "tv", "--email", "me@example.com"]),
        test_config(&dir),
    )?;
    assert_eq!(app.config().notifications.smtp.recipient.as_deref(), Some("me@example.com"));

    let app = App::with_config(parse(&["https://www.emag.bg/tv/pd/X/", "tv"]), test_config(&dir))?;
    assert_eq!(app.config().notifications.smtp.recipient.as_deref(), Some("config@example.com"));
    assert_eq!(app.item().site, SiteVariant::Emag);

    Ok(())
}

#[tokio::test]
async fn test_prepare_creates_record_before_fetching() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let url = format!("http://127.0.0.1:{}/product", unused_port());

    let app = App::with_config(parse(&[url.as_str(), "tv", "--site", "emag"]), test_config(&dir))?;

    assert_eq!(fs::read_to_string(record_path(&dir, "tv"))?, "");
    assert_eq!(app.log_path(), dir.path().join("items/current/tv/log.log"));

    // Unreachable shop: logged, run still ends normally, record untouched
    assert!(app::finish(Ok(app)).await.is_none());
    assert_eq!(fs::read_to_string(record_path(&dir, "tv"))?, "");

    Ok(())
}

#[tokio::test]
async fn test_redesigned_page_ends_normally() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><p>New look</p></body></html>"))
        .mount(&server)
        .await;
    let url = format!("{}{}", server.uri(), PRODUCT_PATH);

    let prepared = App::with_config(parse(&[url.as_str(), "tv", "--site", "ardes"]), test_config(&dir));

    assert!(app::finish(prepared).await.is_none());
    assert_eq!(fs::read_to_string(record_path(&dir, "tv"))?, "");

    Ok(())
}

#[tokio::test]
async fn test_unsupported_site_is_logged_not_fatal() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let prepared = App::with_config(parse(&["https://example.com/item", "tv"]), test_config(&dir));

    match &prepared {
        Err(e @ AppError::UnsupportedSite { .. }) => assert!(!e.is_fatal()),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("unsupported site accepted"),
    }
    assert!(app::finish(prepared).await.is_none());
    assert!(!record_path(&dir, "tv").exists());

    Ok(())
}

#[tokio::test]
async fn test_full_invocation_records_price() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(emag_page("1.299,99 лв.")))
        .mount(&server)
        .await;
    let url = format!("{}{}", server.uri(), PRODUCT_PATH);

    let prepared = App::with_config(parse(&[url.as_str(), "tv", "--site", "emag"]), test_config(&dir));
    let outcome = app::finish(prepared).await.expect("first run succeeds");

    assert_eq!(outcome.decision, Decision::FirstRun);
    assert_eq!(fs::read_to_string(record_path(&dir, "tv"))?, "1299.99");

    // Drop with no SMTP sender configured: delivery fails, price still saved
    server.reset().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(emag_page("1.199,99 лв.")))
        .mount(&server)
        .await;

    let prepared = App::with_config(parse(&[url.as_str(), "tv", "--site", "emag"]), test_config(&dir));
    let outcome = app::finish(prepared).await.expect("second run succeeds");

    assert_eq!(outcome.decision, Decision::NotifyDrop);
    assert!(!outcome.notified);
    assert_eq!(fs::read_to_string(record_path(&dir, "tv"))?, "1199.99");

    Ok(())
}
