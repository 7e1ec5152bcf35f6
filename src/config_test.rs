use super::*;

#[test]
fn defaults_match_site_markup() {
    let config = SiteConfig::default();
    assert_eq!(config.carousel.selector, ".carousel");
    assert_eq!(config.carousel.dummy_class, "carousel-dummy");
    assert_eq!(config.stats.selector, ".stat .n");
    assert!((config.stats.duration_ms - 1000.0).abs() < f64::EPSILON);
    assert_eq!(config.consent.storage_key, "cookie_consent");
    assert_eq!(config.summary.container_id, "theme-summary-container");
    assert_eq!(config.summary.room_attribute, "data-query-task-id");
    assert_eq!(config.channel.join_event, "join_room");
    assert_eq!(config.channel.message_event, "msg");
    assert!(config.typing.looped);
}

#[test]
fn empty_override_yields_defaults() {
    assert_eq!(SiteConfig::from_json("").ok(), Some(SiteConfig::default()));
    assert_eq!(SiteConfig::from_json("   ").ok(), Some(SiteConfig::default()));
    assert_eq!(SiteConfig::from_json("{}").ok(), Some(SiteConfig::default()));
}

#[test]
fn partial_override_keeps_other_defaults() {
    let config = SiteConfig::from_json(r#"{"stats":{"durationMs":250},"summary":{"documentOrigins":[]}}"#)
        .expect("override should parse");
    assert!((config.stats.duration_ms - 250.0).abs() < f64::EPSILON);
    assert_eq!(config.stats.selector, ".stat .n");
    assert!(config.summary.document_origins.is_empty());
    assert_eq!(config.summary.highlight_class, "focused");
    assert_eq!(config.carousel, CarouselConfig::default());
}

#[test]
fn typing_loop_key_is_renamed() {
    let config = SiteConfig::from_json(r#"{"typing":{"loop":false}}"#).expect("override should parse");
    assert!(!config.typing.looped);
    assert_eq!(config.typing.selector, ".type-it");
}

#[test]
fn malformed_override_is_an_error() {
    let err = SiteConfig::from_json("{not json").expect_err("must fail");
    assert!(matches!(err, SiteError::Config(_)));
}

#[test]
fn resolve_falls_back_to_defaults() {
    assert_eq!(SiteConfig::resolve(None), SiteConfig::default());
    assert_eq!(SiteConfig::resolve(Some("[1, 2")), SiteConfig::default());
    let config = SiteConfig::resolve(Some(r#"{"channel":{"reconnectDelayMs":50}}"#));
    assert_eq!(config.channel.reconnect_delay_ms, 50);
    assert_eq!(config.channel.reconnect_delay_max_ms, 5000);
}
