//! End-to-end tests for the share dispatcher
//!
//! Surface side effects are checked through `MemorySurface`, except for
//! downloads which go through a `DesktopSurface` writing into a temp dir.

use unfinished_cards::app::{Config, ShareConfig};
use unfinished_cards::render::PngEncoder;
use unfinished_cards::share::{
    parse_shared_link, DesktopSurface, MemorySurface, NativeShare, ShareDispatcher, SurfaceEvent,
    COPIED_MESSAGE,
};
use unfinished_cards::{
    CardFormat, FixedAdvanceMeasurer, Mood, Platform, Quote, QuoteRenderer, ShareOutcome,
};

fn headless() -> QuoteRenderer {
    QuoteRenderer::new(
        Box::new(FixedAdvanceMeasurer::default()),
        Box::new(PngEncoder),
        CardFormat::Square,
    )
}

fn quote() -> Quote {
    Quote::new(
        "What really pisses me off is...",
        "...how they act like they care but never actually listen.",
        Mood::Angry,
    )
}

#[test]
fn test_clipboard_fallback_flow() {
    let mut d = ShareDispatcher::new(
        MemorySurface::new(NativeShare::Unsupported),
        headless(),
        &ShareConfig::default(),
    );
    assert_eq!(d.share_native(&quote()), ShareOutcome::CopiedToClipboard);

    let events = &d.surface().events;
    assert_eq!(events.len(), 2);
    match &events[0] {
        SurfaceEvent::Clipboard(text) => {
            assert_eq!(
                text,
                "\"What really pisses me off is...\"\n\n\
                 \"...how they act like they care but never actually listen.\"\n\n\
                 ✨ Created on Unfinished Sentences"
            );
        }
        other => panic!("expected clipboard write, got {other:?}"),
    }
    assert_eq!(events[1], SurfaceEvent::Notify(COPIED_MESSAGE.to_string()));
}

#[test]
fn test_every_platform_opens_one_popup() {
    let mut d = ShareDispatcher::new(
        MemorySurface::default(),
        QuoteRenderer::unavailable(CardFormat::Square),
        &ShareConfig::default(),
    );
    let urls: Vec<String> = Platform::ALL
        .iter()
        .map(|&p| d.share_to_platform(&quote(), p))
        .collect();

    assert_eq!(d.surface().opened_urls(), urls.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(urls[0].starts_with("https://twitter.com/intent/tweet?"));
    assert!(urls[1].starts_with("https://www.facebook.com/sharer/sharer.php?"));
    assert!(urls[2].starts_with("https://www.linkedin.com/sharing/share-offsite/?"));
}

#[test]
fn test_download_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = ShareDispatcher::new(
        DesktopSurface::new(dir.path().to_path_buf()),
        headless(),
        &ShareConfig::default(),
    );

    let outcome = d.download_image(&quote());
    assert!(outcome.filename.starts_with("unfinished-sentence-"));
    assert!(outcome.filename.ends_with(".png"));

    let path = outcome.saved_to.expect("card should be saved");
    assert_eq!(path, dir.path().join(&outcome.filename));
    let bytes = std::fs::read(&path).unwrap();
    let image = image::load_from_memory(&bytes).unwrap();
    assert_eq!((image.width(), image.height()), (1080, 1080));
}

#[test]
fn test_download_with_empty_completion() {
    let mut d = ShareDispatcher::new(MemorySurface::default(), headless(), &ShareConfig::default());
    let outcome = d.download_image(&Quote::new("Start only", "", Mood::Hopeful));
    assert!(outcome.saved_to.is_some());
}

#[test]
fn test_download_skipped_without_renderer() {
    let mut d = ShareDispatcher::new(
        MemorySurface::default(),
        QuoteRenderer::unavailable(CardFormat::Square),
        &ShareConfig::default(),
    );
    let outcome = d.download_image(&quote());
    assert_eq!(outcome.saved_to, None);
    assert!(d.surface().events.is_empty());
}

#[test]
fn test_shared_link_roundtrip_with_custom_origin() {
    let config = ShareConfig {
        origin: "http://localhost:3000/".to_string(),
        ..Config::default().share
    };
    let d = ShareDispatcher::new(
        MemorySurface::default(),
        QuoteRenderer::unavailable(CardFormat::Square),
        &config,
    );
    let q = Quote::new("Tom & Jerry", "50% = half?", Mood::Nostalgic);
    let link = d.build_shareable_link(&q);
    assert!(link.starts_with("http://localhost:3000/shared?start=Tom+%26+Jerry"));
    assert_eq!(parse_shared_link(&link), Ok(q));
}
