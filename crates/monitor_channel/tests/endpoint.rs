use monitor_channel::{channel_endpoint, EndpointError};

#[test]
fn http_origin_maps_to_ws() {
    let endpoint = channel_endpoint("http://localhost:5000/companies?page=2").expect("endpoint");
    assert_eq!(endpoint.as_str(), "ws://localhost:5000/ws");
}

#[test]
fn https_origin_maps_to_wss() {
    let endpoint = channel_endpoint("https://scraper.example.com/").expect("endpoint");
    assert_eq!(endpoint.as_str(), "wss://scraper.example.com/ws");
}

#[test]
fn default_port_is_left_implicit() {
    // url normalizes away the default port; the endpoint must not invent one.
    let endpoint = channel_endpoint("https://scraper.example.com:443/").expect("endpoint");
    assert_eq!(endpoint.as_str(), "wss://scraper.example.com/ws");
}

#[test]
fn origin_path_and_fragment_are_discarded() {
    let endpoint =
        channel_endpoint("http://127.0.0.1:8080/results/42#chart").expect("endpoint");
    assert_eq!(endpoint.as_str(), "ws://127.0.0.1:8080/ws");
}

#[test]
fn unsupported_scheme_is_rejected() {
    assert_eq!(
        channel_endpoint("ftp://example.com/"),
        Err(EndpointError::UnsupportedScheme {
            scheme: "ftp".to_string(),
        })
    );
    assert_eq!(
        channel_endpoint("file:///tmp/page.html"),
        Err(EndpointError::UnsupportedScheme {
            scheme: "file".to_string(),
        })
    );
}

#[test]
fn invalid_origin_is_rejected() {
    assert!(matches!(
        channel_endpoint("not an origin"),
        Err(EndpointError::InvalidOrigin { .. })
    ));
}
