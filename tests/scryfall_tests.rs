//! HTTP-level tests for the Scryfall source
//!
//! Each test starts a mockito server and points the source at it.

use card_lookup::config::{ApiConfig, SearchConfig};
use card_lookup::panel::SearchPanel;
use card_lookup::sources::{CardSource, ScryfallSource, SourceError};
use mockito::{Matcher, Server};
use std::sync::Arc;
use std::time::Duration;

fn source_for(server: &Server) -> ScryfallSource {
    let config = ApiConfig {
        base_url: server.url(),
        timeout_secs: Some(5),
        ..Default::default()
    };
    ScryfallSource::from_config(&config).unwrap()
}

fn card_json(base: &str, id: &str, name: &str, set_name: &str) -> String {
    format!(
        r#"{{
            "object": "card",
            "id": "{id}",
            "name": "{name}",
            "set_name": "{set_name}",
            "image_uris": {{
                "small": "https://cards.test/small/{id}.jpg",
                "normal": "https://cards.test/normal/{id}.jpg",
                "large": "https://cards.test/large/{id}.jpg",
                "png": "https://cards.test/png/{id}.png"
            }},
            "prints_search_uri": "{base}/cards/search?order=released&q=oracleid%3A{id}&unique=prints"
        }}"#
    )
}

#[tokio::test]
async fn test_named_fuzzy_parses_card() {
    let mut server = Server::new_async().await;
    let body = card_json(&server.url(), "lb", "Lightning Bolt", "Magic 2010");
    let mock = server
        .mock("GET", "/cards/named")
        .match_query(Matcher::UrlEncoded("fuzzy".into(), "lightnin bolt".into()))
        .match_header("accept", "application/json")
        .match_header("user-agent", Matcher::Regex("^card-lookup/".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let card = tokio_test::assert_ok!(source_for(&server).named_fuzzy("lightnin bolt").await);

    mock.assert_async().await;
    assert_eq!(card.name, "Lightning Bolt");
    assert_eq!(card.thumbnail(), Some("https://cards.test/normal/lb.jpg"));
    assert!(card.prints_search_uri.starts_with(&server.url()));
}

#[tokio::test]
async fn test_not_found_carries_api_details() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/cards/named")
        .match_query(Matcher::UrlEncoded("fuzzy".into(), "qwerty".into()))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"error","code":"not_found","status":404,"details":"No cards found matching “qwerty”"}"#)
        .create_async()
        .await;

    let err = source_for(&server).named_fuzzy("qwerty").await.unwrap_err();
    match err {
        SourceError::Status { status, details } => {
            assert_eq!(status, 404);
            assert!(details.starts_with("No cards found"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_without_error_body_uses_reason() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/cards/named")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;

    let err = source_for(&server).named_fuzzy("opt").await.unwrap_err();
    assert_eq!(
        err,
        SourceError::Status {
            status: 502,
            details: "Bad Gateway".to_string()
        }
    );
}

#[tokio::test]
async fn test_prints_follows_card_uri() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let list = format!(
        r#"{{"object":"list","total_cards":3,"has_more":false,"data":[{},{},{}]}}"#,
        card_json(&base, "a", "Lightning Bolt", "Limited Edition Alpha"),
        card_json(&base, "b", "Lightning Bolt", "Limited Edition Beta"),
        card_json(&base, "c", "Lightning Bolt", "Unlimited Edition"),
    );
    let mock = server
        .mock("GET", "/cards/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("unique".into(), "prints".into()),
            Matcher::UrlEncoded("q".into(), "oracleid:lb".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list)
        .expect(1)
        .create_async()
        .await;

    let uri = format!("{}/cards/search?order=released&q=oracleid%3Alb&unique=prints", base);
    let prints = source_for(&server).prints(&uri).await.unwrap();

    mock.assert_async().await;
    let sets: Vec<&str> = prints.iter().map(|p| p.set_name.as_str()).collect();
    assert_eq!(
        sets,
        vec!["Limited Edition Alpha", "Limited Edition Beta", "Unlimited Edition"]
    );
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/cards/named")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"card","name":"Opt"#)
        .create_async()
        .await;

    let err = source_for(&server).named_fuzzy("opt").await.unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: Some(2),
        ..Default::default()
    };
    let source = ScryfallSource::from_config(&config).unwrap();

    let err = source.named_fuzzy("opt").await.unwrap_err();
    assert!(matches!(err, SourceError::Network(_)));
}

#[tokio::test]
async fn test_panel_end_to_end() {
    let mut server = Server::new_async().await;
    let base = server.url();
    server
        .mock("GET", "/cards/named")
        .match_query(Matcher::UrlEncoded("fuzzy".into(), "counterspel".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(card_json(&base, "cs", "Counterspell", "Alpha"))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/cards/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"object":"list","data":[{},{}]}}"#,
            card_json(&base, "cs1", "Counterspell", "Alpha"),
            card_json(&base, "cs2", "Counterspell", "Tempest"),
        ))
        .expect(1)
        .create_async()
        .await;

    let settings = SearchConfig {
        debounce_ms: 20,
        min_query_chars: 2,
    };
    let mut panel = SearchPanel::new(Arc::new(source_for(&server)), &settings);

    panel.set_query("c");
    panel.set_query("counter");
    panel.set_query("counterspel");
    tokio::time::timeout(Duration::from_secs(5), panel.settle())
        .await
        .unwrap();

    let view = panel.view();
    assert_eq!(view.card.map(|c| c.name), Some("Counterspell".to_string()));
    assert_eq!(view.prints.len(), 2);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn test_panel_end_to_end_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/cards/named")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"object":"error","status":404,"details":"No cards found"}"#)
        .create_async()
        .await;
    let search = server
        .mock("GET", "/cards/search")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let settings = SearchConfig {
        debounce_ms: 10,
        min_query_chars: 2,
    };
    let mut panel = SearchPanel::new(Arc::new(source_for(&server)), &settings);
    panel.set_query("zzzz");
    panel.settle().await;

    search.assert_async().await;
    let view = panel.view();
    assert_eq!(view.error.as_deref(), Some("Carta no encontrada"));
    assert!(view.prints.is_empty());
}

#[tokio::test]
async fn test_whitespace_query_is_sent_to_the_api() {
    let mut server = Server::new_async().await;
    let named = server
        .mock("GET", "/cards/named")
        .match_query(Matcher::UrlEncoded("fuzzy".into(), "   ".into()))
        .with_status(404)
        .with_body(r#"{"object":"error","status":404,"details":"No cards found"}"#)
        .expect(1)
        .create_async()
        .await;

    let settings = SearchConfig {
        debounce_ms: 10,
        min_query_chars: 2,
    };
    let mut panel = SearchPanel::new(Arc::new(source_for(&server)), &settings);
    panel.set_query("   ");
    panel.settle().await;

    named.assert_async().await;
    let view = panel.view();
    assert_eq!(view.error.as_deref(), Some("Carta no encontrada"));
    assert!(view.card.is_none());
}
