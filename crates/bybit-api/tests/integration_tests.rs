//! Integration tests for the Bybit API client.
//!
//! These drive the public client surface through an in-memory transport, so
//! they need no network access.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bybit_api::prelude::*;
use bybit_api::request::{HEADER_API_KEY, HEADER_SIGN, HEADER_TIMESTAMP};
use bybit_api::signer;
use bybit_api::types::{
    CancelOrderParam, KlineParam, SpotCancelOrderParam, SpotOrderType, SpotPostOrderParam,
};
use reqwest::header::HeaderValue;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

const KEY: &str = "test-key";
const SECRET: &str = "test-secret";

/// Transport that records requests and replies with a canned response.
#[derive(Debug)]
struct StubTransport {
    response: RawResponse,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl StubTransport {
    fn new(response: RawResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn json(status: u16, body: Value) -> Arc<Self> {
        Self::new(RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            body.to_string(),
        ))
    }

    fn last(&self) -> PreparedRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// Transport that fails the test when used.
#[derive(Debug)]
struct ForbiddenTransport;

#[async_trait]
impl Transport for ForbiddenTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        panic!("network I/O attempted: {} {}", request.method, request.url);
    }
}

/// Logger that keeps every line.
#[derive(Debug, Default)]
struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("debug: {message}"));
    }

    fn info(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("info: {message}"));
    }

    fn error(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("error: {message}"));
    }
}

fn private_client(transport: Arc<dyn Transport>) -> BybitClient {
    let config = Config::new(KEY, SECRET).with_base_url("http://127.0.0.1:9");
    BybitClient::with_transport(config, transport).unwrap()
}

fn public_client(transport: Arc<dyn Transport>) -> BybitClient {
    let config = Config::public().with_base_url("http://127.0.0.1:9");
    BybitClient::with_transport(config, transport).unwrap()
}

fn v5_ok(result: Value) -> Value {
    json!({
        "retCode": 0,
        "retMsg": "OK",
        "result": result,
        "retExtInfo": {},
        "time": 1700000000123_i64
    })
}

mod configuration {
    use super::*;

    #[tokio::test]
    async fn test_private_calls_without_credentials_never_reach_network() {
        let client = public_client(Arc::new(ForbiddenTransport));

        let err = client
            .get_private::<Value>("/v5/order/realtime", Params::new())
            .await
            .unwrap_err();
        assert!(err.is_configuration());

        let err = client
            .get_private::<Value>("/contract/v3/private/account/wallet/balance", Params::new())
            .await
            .unwrap_err();
        assert!(err.is_configuration());

        let body = json!({"symbol": "BTCUSDT"});
        let err = client
            .post_private::<Value, _>("/spot/v1/order", &body, BodyEncoding::Form)
            .await
            .unwrap_err();
        assert!(err.is_configuration());

        let err = client
            .delete_private::<Value>("/spot/v1/order", Params::new())
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_half_credentials_count_as_missing() {
        let config = Config::new(KEY, "").with_base_url("http://127.0.0.1:9");
        let client = BybitClient::with_transport(config, Arc::new(ForbiddenTransport)).unwrap();

        let err = client
            .post_private::<Value, _>("/v5/order/create", &json!({}), BodyEncoding::Json)
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_v5_rejects_form_bodies_locally() {
        let client = private_client(Arc::new(ForbiddenTransport));

        let err = client
            .post_private::<Value, _>("/v5/order/create", &json!({"a": 1}), BodyEncoding::Form)
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_debug_mode_requires_logger() {
        let config = Config::public().with_debug_mode(true);
        let err = BybitClient::with_transport(config, Arc::new(ForbiddenTransport)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_cancel_requires_an_order_id() {
        let client = private_client(Arc::new(ForbiddenTransport));

        let err = client
            .v5()
            .order()
            .cancel_order(&CancelOrderParam {
                category: Category::Linear,
                symbol: "BTCUSDT".into(),
                order_id: None,
                order_link_id: None,
                order_filter: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = client
            .spot()
            .v1()
            .cancel_order(&SpotCancelOrderParam::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}

mod v5 {
    use super::*;

    #[tokio::test]
    async fn test_create_order_signs_body_in_headers() {
        let transport = StubTransport::json(
            200,
            v5_ok(json!({
                "orderId": "1321003749386327552",
                "orderLinkId": "spot-test-postonly"
            })),
        );
        let client = private_client(transport.clone());

        let param = CreateOrderParam::limit(Category::Spot, "BTCUSDT", Side::Buy, "0.1", "15600")
            .time_in_force(TimeInForce::PostOnly)
            .order_link_id("spot-test-postonly");

        let response = client.v5().order().create_order(&param).await.unwrap();
        assert_eq!(response.ret_code, 0);
        assert_eq!(response.result.order_id, "1321003749386327552");
        assert_eq!(response.result.order_link_id, "spot-test-postonly");

        let sent = transport.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.path(), "/v5/order/create");
        assert!(sent.url.query().is_none());
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.header(HEADER_API_KEY), Some(KEY));

        // Body is the caller's JSON untouched by signing.
        let body: Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, serde_json::to_value(&param).unwrap());
        assert!(body.get("api_key").is_none());

        let timestamp: u64 = sent.header(HEADER_TIMESTAMP).unwrap().parse().unwrap();
        let expected = signer::sign_v5(timestamp, KEY, sent.body.as_ref().unwrap(), SECRET);
        assert_eq!(sent.header(HEADER_SIGN), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_open_orders_signs_query_string() {
        let transport = StubTransport::json(200, v5_ok(json!({
            "category": "linear",
            "nextPageCursor": "",
            "list": [{
                "orderId": "fd4300ae-7847-404e-b947-b46980a4d140",
                "orderLinkId": "test-000005",
                "symbol": "ETHUSDT",
                "price": "1600.00",
                "qty": "0.10",
                "side": "Buy",
                "orderStatus": "New",
                "orderType": "Limit",
                "avgPrice": "0",
                "leavesQty": "0.10",
                "cumExecQty": "0.00",
                "createdTime": "1684738540559",
                "updatedTime": "1684738540561"
            }]
        })));
        let client = private_client(transport.clone());

        let response = client
            .v5()
            .order()
            .open_orders(&OpenOrdersParam::new(Category::Linear).symbol("ETHUSDT"))
            .await
            .unwrap();

        let order = &response.result.list[0];
        assert_eq!(order.symbol, "ETHUSDT");
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.price.to_string(), "1600.00");

        let sent = transport.last();
        assert_eq!(sent.method, Method::GET);
        let query = sent.url.query().unwrap().to_string();
        assert_eq!(query, "category=linear&symbol=ETHUSDT");

        let timestamp: u64 = sent.header(HEADER_TIMESTAMP).unwrap().parse().unwrap();
        assert_eq!(
            sent.header(HEADER_SIGN),
            Some(signer::sign_v5(timestamp, KEY, query.as_bytes(), SECRET).as_str())
        );
    }

    #[tokio::test]
    async fn test_rate_limit_headers_land_in_response() {
        let body = v5_ok(json!({"orderId": "1", "orderLinkId": ""}));
        let mut response = RawResponse::new(StatusCode::OK, body.to_string());
        response.headers.insert("X-Bapi-Limit", HeaderValue::from_static("120"));
        response.headers.insert("X-Bapi-Limit-Status", HeaderValue::from_static("119"));
        response
            .headers
            .insert("X-Bapi-Limit-Reset-Timestamp", HeaderValue::from_static("1700000000000"));

        let client = private_client(StubTransport::new(response));
        let param = CreateOrderParam::market(Category::Linear, "BTCUSDT", Side::Sell, "0.01");
        let result = client.v5().order().create_order(&param).await.unwrap();

        assert_eq!(result.rate_limit.rate_limit, 120);
        assert_eq!(result.rate_limit.rate_limit_status, 119);
        assert_eq!(result.rate_limit.rate_limit_reset_ms, 1700000000000);
        assert_eq!(result.time, 1700000000123);
    }

    #[tokio::test]
    async fn test_missing_rate_limit_headers_default_to_zero() {
        let client = private_client(StubTransport::json(200, v5_ok(json!({"orderId": "1"}))));
        let param = CreateOrderParam::market(Category::Linear, "BTCUSDT", Side::Sell, "0.01");

        let result = client.v5().order().create_order(&param).await.unwrap();
        assert_eq!(result.rate_limit, RateLimitTelemetry::default());
    }

    #[tokio::test]
    async fn test_business_error_despite_http_200() {
        let client = private_client(StubTransport::json(
            200,
            json!({"retCode": 10001, "retMsg": "params error: symbol invalid", "result": {}}),
        ));
        let param = CreateOrderParam::market(Category::Linear, "NOPE", Side::Buy, "1");

        let err = client.v5().order().create_order(&param).await.unwrap_err();
        assert!(err.is_decode());
        let api = err.api_error().unwrap();
        assert_eq!(api.code, 10001);
        assert_eq!(api.message, "params error: symbol invalid");
    }

    #[tokio::test]
    async fn test_status_taxonomy() {
        for (status, check) in [
            (403, Error::is_access_denied as fn(&Error) -> bool),
            (404, Error::is_not_found),
        ] {
            let client = private_client(StubTransport::json(status, json!({})));
            let err = client
                .get_private::<Value>("/v5/order/realtime", Params::new())
                .await
                .unwrap_err();
            assert!(check(&err), "status {status} gave {err:?}");
        }

        for status in [429, 500, 502, 418] {
            let client = private_client(StubTransport::json(status, json!({})));
            let err = client
                .get_private::<Value>("/v5/order/realtime", Params::new())
                .await
                .unwrap_err();
            assert!(matches!(err, Error::Unexpected { status: s } if s == status));
        }
    }

    #[tokio::test]
    async fn test_custom_validator_replaces_default() {
        #[derive(Debug)]
        struct RejectAll;

        impl BodyValidator for RejectAll {
            fn validate(&self, _body: &[u8]) -> Result<()> {
                Err(Error::Api(ApiError::new(-1, "rejected")))
            }
        }

        let client = private_client(StubTransport::json(200, v5_ok(json!({}))))
            .with_body_validator(ApiGeneration::V5, Arc::new(RejectAll));

        let err = client
            .get_private::<Value>("/v5/order/realtime", Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.api_error().map(|e| e.code), Some(-1));

        // The legacy validator is untouched.
        let ok: Value = client
            .get_public("/spot/v1/time", &Params::new())
            .await
            .unwrap();
        assert_eq!(ok["retCode"], 0);
    }
}

mod legacy {
    use super::*;

    fn legacy_ok(result: Value) -> Value {
        json!({"ret_code": 0, "ret_msg": "", "ext_code": null, "ext_info": null, "result": result})
    }

    #[tokio::test]
    async fn test_public_get_is_unsigned() {
        let transport =
            StubTransport::json(200, legacy_ok(json!({"serverTime": 1625799317787_i64})));
        let client = public_client(transport.clone());

        let time = client.spot().v1().server_time().await.unwrap();
        assert_eq!(time.result.server_time, 1625799317787);

        let sent = transport.last();
        assert_eq!(sent.url.as_str(), "http://127.0.0.1:9/spot/v1/time");
        assert!(sent.headers.is_empty());
    }

    #[tokio::test]
    async fn test_kline_passes_params_verbatim() {
        let transport = StubTransport::json(200, json!({
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "category": "linear",
                "symbol": "BTCUSDT",
                "interval": "60",
                "list": [[
                    "1670608800000", "17071", "17073", "17027", "17055.5", "268611", "15.74462667"
                ]]
            }
        }));
        let client = public_client(transport.clone());

        let klines = client
            .contract()
            .kline(&KlineParam {
                category: "linear".into(),
                symbol: "BTCUSDT".into(),
                interval: "60".into(),
                start: 1670601600000,
                end: 1670608800000,
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(klines.ret_code, 0);
        assert_eq!(klines.result.list[0][4], "17055.5");

        let sent = transport.last().query_params();
        assert_eq!(sent.get("interval").map(String::as_str), Some("60"));
        assert!(sent.get("limit").is_none());
        assert!(sent.get("sign").is_none());
    }

    #[tokio::test]
    async fn test_balance_injects_signature_into_query() {
        let transport = StubTransport::json(200, json!({
            "retCode": 0,
            "retMsg": "OK",
            "result": {"list": [{
                "coin": "BTC",
                "equity": "0.1",
                "walletBalance": "0.1",
                "availableBalance": "0.09"
            }]}
        }));
        let client = private_client(transport.clone());

        let balance = client.contract().balance("btc").await.unwrap();
        assert_eq!(balance.result.list[0].coin, "BTC");
        assert_eq!(balance.result.list[0].available_balance.to_string(), "0.09");

        let mut sent = transport.last().query_params();
        assert_eq!(sent.get("api_key").map(String::as_str), Some(KEY));
        assert_eq!(sent.get("coin").map(String::as_str), Some("BTC"));
        let sign = sent.remove("sign").unwrap();
        assert_eq!(sign, signer::sign_legacy(&sent, SECRET));
    }

    #[tokio::test]
    async fn test_spot_post_order_sends_signed_form() {
        let transport = StubTransport::json(200, legacy_ok(json!({
            "orderId": "1037799004578056704",
            "orderLinkId": "1638451282020267",
            "symbol": "BTCUSDT",
            "transactTime": "1638451282090",
            "price": "28383.5",
            "origQty": "1.100000",
            "type": "MARKET",
            "side": "BUY",
            "status": "NEW",
            "timeInForce": "GTC",
            "accountId": "213998",
            "symbolName": "BTCUSDT",
            "executedQty": "0"
        })));
        let client = private_client(transport.clone());

        let param = SpotPostOrderParam {
            symbol: "BTCUSDT".into(),
            qty: "1.1".into(),
            side: Side::Buy,
            order_type: SpotOrderType::Market,
            time_in_force: None,
            price: None,
            order_link_id: None,
        };
        let response = client.spot().v1().post_order(&param).await.unwrap();
        assert_eq!(response.result.order_id, "1037799004578056704");
        assert_eq!(response.result.order_type, SpotOrderType::Market);

        let sent = transport.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.header("content-type"), Some("application/x-www-form-urlencoded"));

        let body = String::from_utf8(sent.body.clone().unwrap()).unwrap();
        let mut form: Params = serde_urlencoded::from_str(&body).unwrap();
        assert_eq!(form.get("type").map(String::as_str), Some("MARKET"));
        assert_eq!(form.get("side").map(String::as_str), Some("Buy"));
        let sign = form.remove("sign").unwrap();
        assert_eq!(sign, signer::sign_legacy(&form, SECRET));
    }

    #[tokio::test]
    async fn test_spot_cancel_uses_delete() {
        let transport = StubTransport::json(200, legacy_ok(json!({
            "orderId": "889208273689997824",
            "orderLinkId": "",
            "symbol": "BTCUSDT",
            "status": "CANCELED"
        })));
        let client = private_client(transport.clone());

        let response = client
            .spot()
            .v1()
            .cancel_order(&SpotCancelOrderParam {
                order_id: Some("889208273689997824".into()),
                order_link_id: None,
            })
            .await
            .unwrap();
        assert_eq!(response.result.status, "CANCELED");

        let sent = transport.last();
        assert_eq!(sent.method, Method::DELETE);
        let query = sent.query_params();
        assert_eq!(query.get("orderId").map(String::as_str), Some("889208273689997824"));
        assert!(query.get("orderLinkId").is_none());
        assert!(query.contains_key("sign"));
    }

    #[tokio::test]
    async fn test_legacy_json_body_carries_signature() {
        let transport = StubTransport::json(200, legacy_ok(json!({})));
        let client = private_client(transport.clone());

        let _: Value = client
            .post_private(
                "/v2/private/position/leverage/save",
                &json!({"symbol": "BTCUSD", "leverage": 10}),
                BodyEncoding::Json,
            )
            .await
            .unwrap();

        let sent = transport.last();
        let body: serde_json::Map<String, Value> =
            serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        let timestamp = body["timestamp"].as_str().unwrap();
        let material = format!("api_key={KEY}&leverage=10&symbol=BTCUSD&timestamp={timestamp}");
        assert_eq!(body["sign"], signer::hmac_hex(SECRET, material.as_bytes()));
    }

    #[tokio::test]
    async fn test_status_taxonomy() {
        let cases: [(u16, fn(&Error) -> bool); 5] = [
            (403, |e| matches!(e, Error::AccessDenied)),
            (404, |e| matches!(e, Error::NotFound)),
            (429, |e| matches!(e, Error::RateLimited { status: 429 })),
            (503, |e| matches!(e, Error::ServerError { status: 503 })),
            (401, |e| matches!(e, Error::RequestFailed { status: 401, .. })),
        ];

        for (status, check) in cases {
            let transport = StubTransport::json(status, json!({"ret_code": 0}));
            let client = private_client(transport.clone());
            let err = client
                .get_private::<Value>("/contract/v3/private/account/wallet/balance", Params::new())
                .await
                .unwrap_err();
            assert!(check(&err), "status {status} gave {err:?}");
            assert_eq!(transport.count(), 1);
        }
    }

    #[tokio::test]
    async fn test_legacy_business_error() {
        let client = private_client(StubTransport::json(
            200,
            json!({"ret_code": 10003, "ret_msg": "Invalid api_key.", "result": null}),
        ));

        let err = client.contract().balance("BTC").await.unwrap_err();
        assert!(err.api_error().unwrap().is_auth_error());
    }
}

mod debug_logging {
    use super::*;

    #[tokio::test]
    async fn test_debug_mode_logs_request_and_response() {
        let logger = Arc::new(MemoryLogger::default());
        let config = Config::public()
            .with_base_url("http://127.0.0.1:9")
            .with_debug(logger.clone());
        let transport =
            StubTransport::json(200, json!({"ret_code": 0, "result": {"serverTime": 1}}));
        let client = BybitClient::with_transport(config, transport).unwrap();

        client.spot().v1().server_time().await.unwrap();

        let lines = logger.lines.lock().unwrap();
        assert_eq!(lines[0], "debug: Request url: http://127.0.0.1:9/spot/v1/time");
        assert!(lines[1].starts_with("debug: Response: 200 OK"));
        assert!(lines[2].starts_with("debug: Body: {"));
    }

    #[tokio::test]
    async fn test_debug_mode_logs_forbidden() {
        let logger = Arc::new(MemoryLogger::default());
        let config = Config::new(KEY, SECRET)
            .with_base_url("http://127.0.0.1:9")
            .with_debug(logger.clone());
        let transport = StubTransport::json(403, json!({}));
        let client = BybitClient::with_transport(config, transport).unwrap();

        let err = client.contract().balance("BTC").await.unwrap_err();
        assert!(err.is_access_denied());

        let lines = logger.lines.lock().unwrap();
        assert_eq!(lines.last().map(String::as_str), Some("error: Error: 403"));
    }

    #[tokio::test]
    async fn test_unexpected_v5_body_only_logged() {
        let logger = Arc::new(MemoryLogger::default());
        let config = Config::new(KEY, SECRET)
            .with_base_url("http://127.0.0.1:9")
            .with_debug(logger.clone());
        let transport =
            StubTransport::new(RawResponse::new(StatusCode::BAD_GATEWAY, "upstream down"));
        let client = BybitClient::with_transport(config, transport).unwrap();

        let err = client
            .get_private::<Value>("/v5/order/realtime", Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unexpected { status: 502 }));
        assert!(!err.to_string().contains("upstream down"));

        let lines = logger.lines.lock().unwrap();
        assert!(lines.iter().any(|l| l == "debug: Body: upstream down"));
    }
}

mod sharing {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_calls_share_one_client() {
        let transport = StubTransport::json(200, v5_ok(json!({"orderId": "1"})));
        let client = private_client(transport.clone());

        let calls = (0..8).map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let qty = format!("0.0{i}");
                let param = CreateOrderParam::market(Category::Linear, "BTCUSDT", Side::Buy, qty);
                client.v5().order().create_order(&param).await
            })
        });

        for call in calls.collect::<Vec<_>>() {
            assert!(call.await.unwrap().is_ok());
        }
        assert_eq!(transport.count(), 8);
    }
}
