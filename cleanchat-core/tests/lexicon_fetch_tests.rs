// cleanchat-core/tests/lexicon_fetch_tests.rs
use cleanchat_core::config::LexiconConfig;
use cleanchat_core::lexicon::{build_lexicon, embedded_base_words, fetch_remote_words, LexiconSource};
use cleanchat_core::{CleanchatError, LayeredEngine, ModerationEngine, Normalizer};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

fn config_for(url: String) -> LexiconConfig {
    LexiconConfig {
        url: Some(url),
        timeout_secs: 2,
        offline: false,
        extra_words: Vec::new(),
    }
}

#[test_log::test]
fn test_remote_list_is_used_when_fetch_succeeds() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/words.txt")
        .with_status(200)
        .with_body("Жопа\r\n\r\nговно\n  хрен \n")
        .create();

    let url = format!("{}/words.txt", server.url());
    let lexicon = build_lexicon(&config_for(url.clone()));
    mock.assert();

    assert_eq!(lexicon.source(), &LexiconSource::Remote { url });
    assert!(lexicon.contains("жопа"));
    assert!(lexicon.contains("хрен"));
    // The supplementary list is merged into remote lists as well.
    assert!(lexicon.contains("нахуй"));
    // The embedded base list is not.
    assert!(!lexicon.contains("залупа"));
}

#[test_log::test]
fn test_server_error_falls_back_to_embedded_list() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/words.txt").with_status(500).create();

    let lexicon = build_lexicon(&config_for(format!("{}/words.txt", server.url())));
    assert!(matches!(lexicon.source(), LexiconSource::Embedded { .. }));
    for word in embedded_base_words() {
        assert!(lexicon.contains(&word), "embedded word {} missing", word);
    }
}

#[test]
fn test_status_error_is_typed() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/gone").with_status(404).create();

    let err = fetch_remote_words(&format!("{}/gone", server.url()), Duration::from_secs(2)).unwrap_err();
    assert!(matches!(err, CleanchatError::LexiconStatus(_, 404)));
}

#[test]
fn test_empty_body_falls_back_to_embedded_list() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/words.txt").with_status(200).with_body("\n \n\n").create();

    let url = format!("{}/words.txt", server.url());
    assert!(matches!(
        fetch_remote_words(&url, Duration::from_secs(2)),
        Err(CleanchatError::EmptyLexicon(_))
    ));

    let lexicon = build_lexicon(&config_for(url));
    assert!(matches!(lexicon.source(), LexiconSource::Embedded { .. }));
    assert!(lexicon.contains("мудак"));
}

#[test_log::test]
fn test_unreachable_host_still_yields_working_engine() {
    // Nothing listens on the discard port.
    let lexicon = build_lexicon(&config_for("http://127.0.0.1:9/words.txt".to_string()));
    assert!(!lexicon.is_empty());

    let engine = LayeredEngine::new(lexicon, Normalizer::unavailable("not configured")).unwrap();
    assert!(engine.is_banned("какая залупа"));
    assert!(!engine.is_banned("unrelated safe text"));
}

#[test_log::test]
fn test_silent_server_times_out_and_falls_back() {
    // Accepts the connection but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(Duration::from_secs(10));
            drop(stream);
        }
    });

    let config = LexiconConfig {
        timeout_secs: 1,
        ..config_for(format!("http://{}/words.txt", addr))
    };
    let started = Instant::now();
    let lexicon = build_lexicon(&config);

    assert!(started.elapsed() < Duration::from_secs(5), "fetch took {:?}", started.elapsed());
    assert!(matches!(lexicon.source(), LexiconSource::Embedded { .. }));
    assert!(lexicon.contains("залупа"));
}
