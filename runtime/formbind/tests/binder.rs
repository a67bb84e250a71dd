use std::sync::Arc;

use formbind::config::BinderConfig;
use formbind::request::{
    BodySizeLimit, FormValues, IncomingRequest, MultipartForm, RequestHead,
};
use formbind::{Bind, BindError, BindErrorKind, Binder, CollectingSink};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use ubyte::ToByteUnit;

#[derive(Bind, Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub tags: Vec<String>,
    pub views: u32,
}

fn request(content_type: &str, body: &'static str) -> IncomingRequest {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, content_type.parse().unwrap());
    IncomingRequest::new(RequestHead::post(headers)).with_body(body)
}

fn article() -> Article {
    Article {
        title: "Untouched".into(),
        tags: vec!["draft".into()],
        views: 42,
    }
}

#[test]
fn missing_body_is_a_bad_request() {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        "application/x-www-form-urlencoded".parse().unwrap(),
    );
    let mut request = IncomingRequest::new(RequestHead::post(headers))
        .with_form(FormValues::parse(b"title=Hello"));

    let mut target = article();
    let err = Binder::new().bind(&mut request, &mut target).unwrap_err();
    assert_eq!(err.kind(), BindErrorKind::BadRequest);
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(target, article());
}

#[test]
fn unsupported_media_type() {
    let mut request = request("text/plain", "title=Hello");
    let mut target = article();
    let err = Binder::new().bind(&mut request, &mut target).unwrap_err();
    assert_eq!(err.kind(), BindErrorKind::UnsupportedMediaType);
    assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(target, article());
}

#[test]
fn json_bodies_replace_the_target() {
    let mut request = request(
        "application/json",
        r#"{"title": "Hello", "tags": ["rust", "web"]}"#,
    );
    let mut target = article();
    Binder::new().bind(&mut request, &mut target).unwrap();
    assert_eq!(
        target,
        Article {
            title: "Hello".into(),
            tags: vec!["rust".into(), "web".into()],
            views: 0,
        }
    );
}

#[test]
fn malformed_json_is_a_bad_request() {
    let mut request = request("application/json", r#"{"title": "Hello", "views": "many"}"#);
    let mut target = article();
    let err = Binder::new().bind(&mut request, &mut target).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    let BindError::Json(e) = &err else {
        panic!("Expected a JSON error, got {err:?}");
    };
    assert_eq!(e.path(), "views");
    assert_eq!(target, article());
}

#[test]
fn structured_bodies_are_not_merged_into_the_target() {
    #[derive(Bind, Debug, Default, PartialEq, serde::Deserialize)]
    pub struct Draft {
        pub title: String,
        pub body: String,
    }

    let current = Draft {
        title: "Untouched".into(),
        body: "Kept?".into(),
    };
    let mut target = Draft {
        title: "Untouched".into(),
        body: "Kept?".into(),
    };
    let mut partial = request("application/json", r#"{"title": "Hello"}"#);
    let err = Binder::new().bind(&mut partial, &mut target).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(target, current);
}

#[test]
fn xml_bodies_replace_the_target() {
    let mut request = request(
        "application/xml; charset=utf-8",
        "<article><title>Hello</title><tags>rust</tags><tags>web</tags><views>3</views></article>",
    );
    let mut target = article();
    Binder::new().bind(&mut request, &mut target).unwrap();
    assert_eq!(
        target,
        Article {
            title: "Hello".into(),
            tags: vec!["rust".into(), "web".into()],
            views: 3,
        }
    );
}

#[test]
fn malformed_xml_is_a_bad_request() {
    let mut request = request("text/xml", "<article><views>many</views></article>");
    let mut target = article();
    let err = Binder::new().bind(&mut request, &mut target).unwrap_err();
    assert!(matches!(err, BindError::Xml(_)));
    assert_eq!(target, article());
}

#[test]
fn urlencoded_forms_are_bound_key_by_key() {
    let sink = CollectingSink::new();
    let binder = Binder::builder().sink(&sink).build();
    let mut request = IncomingRequest::urlencoded("title=Hello&tags[]=rust&tags[]=web&views=x");

    let mut target = Article::default();
    binder.bind(&mut request, &mut target).unwrap();
    assert_eq!(target.title, "Hello");
    assert_eq!(target.tags, ["rust", "web"]);
    assert_eq!(target.views, 0);
    assert_eq!(sink.len(), 1);
}

#[test]
fn multipart_values_take_precedence() {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        "multipart/form-data; boundary=X-BOUNDARY".parse().unwrap(),
    );
    let mut request = IncomingRequest::new(RequestHead::post(headers))
        .with_body("--X-BOUNDARY--")
        .with_form(FormValues::parse(b"title=Old&views=1"))
        .with_multipart(MultipartForm::new(FormValues::parse(b"title=New&tags=rust")));

    let mut target = Article::default();
    Binder::new().bind(&mut request, &mut target).unwrap();
    assert_eq!(
        target,
        Article {
            title: "New".into(),
            tags: vec!["rust".into()],
            views: 1,
        }
    );
}

#[test]
fn oversized_bodies_are_rejected() {
    let binder = Binder::builder()
        .config(BinderConfig {
            body_size_limit: BodySizeLimit::Enabled {
                max_size: 16.bytes(),
            },
            ..Default::default()
        })
        .build();
    let mut request = request(
        "application/json",
        r#"{"title": "A title that is way too long"}"#,
    );
    let mut target = article();
    let err = binder.bind(&mut request, &mut target).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(target, article());
}

#[test]
fn named_binding() {
    let sink = Arc::new(CollectingSink::new());
    let binder = Binder::builder().sink(Arc::clone(&sink)).build();
    let mut request =
        IncomingRequest::urlencoded("article[title]=Hello&article.views=7&title=Ignored");

    let mut target = Article::default();
    binder
        .bind_named(&mut request, &mut target, "article")
        .unwrap();
    assert_eq!(target.title, "Hello");
    assert_eq!(target.views, 7);
    assert!(sink.is_empty());
}

#[test]
fn http_requests_can_be_bound() {
    let request = http::Request::post("/articles")
        .header(CONTENT_TYPE, "application/json")
        .body(r#"{"title": "Hello", "views": 3}"#.to_owned())
        .unwrap();
    let mut request = IncomingRequest::from(request);
    assert_eq!(request.head().method, http::Method::POST);
    assert_eq!(request.head().target.path(), "/articles");

    let mut target = article();
    Binder::new().bind(&mut request, &mut target).unwrap();
    assert_eq!(target.title, "Hello");
    assert_eq!(target.views, 3);
    assert!(target.tags.is_empty());
}

#[test]
fn the_body_is_consumed() {
    let mut request = IncomingRequest::urlencoded("title=Hello");
    let binder = Binder::new();
    binder.bind(&mut request, &mut Article::default()).unwrap();

    // The body can only be taken once.
    let err = binder
        .bind(&mut request, &mut Article::default())
        .unwrap_err();
    assert!(matches!(err, BindError::MissingBody(_)));
}

#[test]
fn binders_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Binder>();
    assert_send_sync::<Binder<formbind::tags::TagOverrides, Arc<CollectingSink>>>();
}
