use std::future::ready;

use agw_lambda_proxy::test_utils::{
    fixture_log_link_config, mock_context, mock_request_id, CompletionRecorder, FIXTURE_LOG_GROUP,
    FIXTURE_REGION,
};
use agw_lambda_proxy::{
    default_headers, ConstructionError, Failure, Handler, Headers, NormalizedResponse, Options,
    CORS_ALLOW_ORIGIN,
};
use lambda_runtime::Context;
use serde_json::{json, Value};

fn options() -> Options {
    Options {
        cloud_watch_log_links: false,
        log_errors: false,
        ..Options::default()
    }
}

/// Wrap `delegate`, invoke it once and return the completed response.
async fn respond<F, Fut, R, E>(delegate: F, options: Options) -> NormalizedResponse
where
    F: Fn(Value, Context) -> Fut,
    Fut: std::future::Future<Output = Result<R, E>>,
    R: serde::Serialize,
    E: Into<Failure>,
{
    let handler = Handler::new(delegate, options).expect("handler should build");
    let recorder = CompletionRecorder::default();
    handler
        .invoke(json!({}), mock_context("1"), recorder.callback())
        .await
        .expect("result should serialize");
    recorder.single_response()
}

async fn respond_with(result: Value) -> NormalizedResponse {
    respond(
        move |_, _| ready(Ok::<_, Failure>(result.clone())),
        options(),
    )
    .await
}

// ==================== Construction ====================

#[test]
fn construction_without_delegate_fails() {
    type Delegate = fn(Value, Context) -> std::future::Ready<Result<Value, Failure>>;

    let err = Handler::<Delegate>::builder()
        .cloud_watch_log_links(false)
        .build()
        .unwrap_err();
    assert_eq!(err, ConstructionError::MissingDelegate);
    assert!(err.to_string().contains("\"delegate\" must be a function"));
}

#[test]
fn construction_with_delegate_succeeds() {
    let handler = Handler::new(|_: Value, _: Context| ready(Ok::<_, Failure>("x")), options());
    assert!(handler.is_ok());
}

// ==================== Successful results ====================

#[tokio::test]
async fn string_result_is_the_body() {
    let response = respond_with(json!("expected")).await;
    assert_eq!(response.body, "expected");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn null_result_is_an_empty_response() {
    let response = respond_with(Value::Null).await;
    assert_eq!(response.body, "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn unit_result_is_an_empty_response() {
    let response = respond(|_, _| ready(Ok::<(), Failure>(())), options()).await;
    assert_eq!(response.body, "");
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn status_code_is_taken_from_result() {
    let response = respond_with(json!({"statusCode": 123})).await;
    assert_eq!(response.body, "");
    assert_eq!(response.status_code, 123);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn invalid_status_code_uses_default() {
    let response = respond_with(json!({"statusCode": "xxx"})).await;
    assert_eq!(response.body, "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn body_string_is_taken_from_result() {
    let response = respond_with(json!({"body": "as string"})).await;
    assert_eq!(response.body, "as string");
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn body_object_is_stringified() {
    let response = respond_with(json!({"body": {"foo": "bar"}})).await;
    assert_eq!(response.body, r#"{"foo":"bar"}"#);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn response_headers_are_added_to_defaults() {
    let response = respond_with(json!({"headers": {"MY_HEADER": "VALUE"}})).await;

    let mut expected = default_headers();
    expected.insert("MY_HEADER".to_string(), "VALUE".to_string());
    assert_eq!(response.body, "");
    assert_eq!(response.headers, expected);
}

#[tokio::test]
async fn response_headers_overwrite_defaults() {
    let response =
        respond_with(json!({"headers": {CORS_ALLOW_ORIGIN: "https://foo.com"}})).await;
    assert_eq!(
        response.headers,
        Headers::from([(CORS_ALLOW_ORIGIN.to_string(), "https://foo.com".to_string())])
    );
}

#[tokio::test]
async fn option_headers_replace_defaults() {
    let option_headers = Headers::from([("MY_DEFAULT_HEADER".to_string(), "value".to_string())]);
    let options = Options {
        headers: option_headers.clone(),
        ..options()
    };
    let response = respond(|_, _| ready(Ok::<_, Failure>(Value::Null)), options).await;
    assert_eq!(response.body, "");
    assert_eq!(response.headers, option_headers);
}

#[tokio::test]
async fn unshaped_object_is_stringified_whole() {
    let response = respond_with(json!({"foo": "bar"})).await;
    assert_eq!(response.body, r#"{"foo":"bar"}"#);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn serializable_struct_is_stringified() {
    #[derive(serde::Serialize)]
    struct Item {
        id: u32,
    }

    let response = respond(|_, _| ready(Ok::<_, Failure>(Item { id: 7 })), options()).await;
    assert_eq!(response.body, r#"{"id":7}"#);
}

#[tokio::test]
async fn async_delegate_result_is_awaited() {
    let response = respond(
        |_, _| async {
            tokio::task::yield_now().await;
            Ok::<_, Failure>("string from future")
        },
        options(),
    )
    .await;
    assert_eq!(response.body, "string from future");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn delegate_receives_event_and_context() {
    let handler = Handler::new(
        |event: Value, ctx: Context| async move {
            Ok::<_, Failure>(json!({"body": {"event": event, "request": ctx.request_id}}))
        },
        options(),
    )
    .unwrap();

    let response = handler
        .call(json!({"path": "/items"}), mock_context("ctx"))
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(
        body,
        json!({"event": {"path": "/items"}, "request": mock_request_id("ctx")})
    );
}

// ==================== Failures ====================

#[tokio::test]
async fn immediate_failure_is_500_with_message() {
    let response = respond(
        |_, _| ready(Err::<Value, _>(Failure::new("error message"))),
        options(),
    )
    .await;
    assert_eq!(response.body, r#"{"message":"error message"}"#);
    assert_eq!(response.status_code, 500);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn deferred_failure_is_500_with_message() {
    let response = respond(
        |_, _| async {
            tokio::task::yield_now().await;
            Err::<Value, _>(Failure::new("error message"))
        },
        options(),
    )
    .await;
    assert_eq!(response.body, r#"{"message":"error message"}"#);
    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn immediate_failure_code_is_the_status() {
    let response = respond(
        |_, _| ready(Err::<Value, _>(Failure::new("error message").with_code(404))),
        options(),
    )
    .await;
    assert_eq!(response.body, r#"{"message":"error message"}"#);
    assert_eq!(response.status_code, 404);
    assert_eq!(response.headers, default_headers());
}

#[tokio::test]
async fn deferred_failure_code_is_the_status() {
    let response = respond(
        |_, _| async {
            tokio::task::yield_now().await;
            Err::<Value, _>(Failure::new("error message").with_code(404))
        },
        options(),
    )
    .await;
    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn anyhow_errors_are_translated() {
    let response = respond(
        |_, _| async { Err::<Value, _>(anyhow::anyhow!("upstream timed out")) },
        options(),
    )
    .await;
    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, r#"{"message":"upstream timed out"}"#);
}

#[tokio::test]
async fn panicking_delegate_is_translated() {
    let response = respond(
        |_, _| async {
            if true {
                panic!("delegate blew up");
            }
            Ok::<Value, Failure>(Value::Null)
        },
        options(),
    )
    .await;
    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, r#"{"message":"delegate blew up"}"#);
}

#[tokio::test]
async fn failure_response_includes_log_link() {
    let handler = Handler::builder()
        .delegate(|_: Value, _: Context| ready(Err::<Value, _>(Failure::new("boom"))))
        .log_errors(false)
        .log_link_config(fixture_log_link_config())
        .build()
        .unwrap();

    let response = handler.call(json!({}), mock_context("link")).await.unwrap();
    let body: Value = serde_json::from_str(&response.body).unwrap();
    let expected_link = format!(
        "https://{region}.console.aws.amazon.com/cloudwatch/home?region={region}\
         #logEventViewer:group={group};filter=%22{id}%22",
        region = FIXTURE_REGION,
        group = FIXTURE_LOG_GROUP,
        id = mock_request_id("link"),
    );
    assert_eq!(body, json!({"message": "boom", "log": expected_link}));
}

#[tokio::test]
async fn failure_response_omits_log_when_disabled() {
    let handler = Handler::builder()
        .delegate(|_: Value, _: Context| ready(Err::<Value, _>(Failure::new("boom"))))
        .log_errors(false)
        .cloud_watch_log_links(false)
        .log_link_config(fixture_log_link_config())
        .build()
        .unwrap();

    let response = handler.call(json!({}), mock_context("nolink")).await.unwrap();
    assert_eq!(response.body, r#"{"message":"boom"}"#);
}

#[tokio::test]
async fn error_formatter_shapes_message() {
    let handler = Handler::builder()
        .delegate(|_: Value, _: Context| {
            ready(Err::<Value, _>(Failure::new("secret detail").with_code(503)))
        })
        .options(options())
        .error_formatter(|failure: &Failure| format!("service error ({})", failure.status_code()))
        .build()
        .unwrap();

    let response = handler.call(json!({}), mock_context("fmt")).await.unwrap();
    assert_eq!(response.status_code, 503);
    assert_eq!(response.body, r#"{"message":"service error (503)"}"#);
}

#[tokio::test]
async fn handler_serves_many_invocations() {
    let handler = Handler::new(
        |event: Value, _: Context| async move {
            match event.get("fail").and_then(Value::as_bool) {
                Some(true) => Err(Failure::new("asked to fail").with_code(400)),
                _ => Ok(event),
            }
        },
        options(),
    )
    .unwrap();

    let ok = handler.call(json!({"fail": false}), mock_context("a")).await.unwrap();
    let failed = handler.call(json!({"fail": true}), mock_context("b")).await.unwrap();
    let again = handler.call(json!({"fail": false}), mock_context("c")).await.unwrap();

    assert_eq!(ok.status_code, 200);
    assert_eq!(failed.status_code, 400);
    assert_eq!(ok, again);
}
