//! `HttpPizzaApi` against a throwaway local HTTP server.

use pizza_commerce::prelude::*;
use pizza_data::{FetchClient, HttpPizzaApi};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Serve exactly one request with a canned response; the handle yields the raw request.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn api_for(base_url: &str) -> HttpPizzaApi {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpPizzaApi::with_client(FetchClient::with_http_client(http).with_base_url(base_url))
}

fn body_of(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
}

#[tokio::test]
async fn fetches_catalog() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"id":"pepperoni","name":"The Pepperoni Pizza","description":"Pepperoni","image":"/public/pizzas/pepperoni.webp","sizes":{"S":9.75,"M":12.5,"L":15.25}},{"id":"odd","name":"No sizes"}]"#,
    )
    .await;

    let pizzas = api_for(&base).fetch_catalog().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/pizzas HTTP/1.1"));
    assert_eq!(pizzas.len(), 2);
    assert_eq!(pizzas[0].display_price(SizeCode::M).unwrap(), "$12.50");
    assert!(pizzas[1].sizes.is_none());
}

#[tokio::test]
async fn catalog_server_error_is_catalog_unavailable() {
    let (base, server) = serve_once("503 Service Unavailable", r#"{"error":"down"}"#).await;

    let result = api_for(&base).fetch_catalog().await;
    server.await.unwrap();

    assert!(matches!(result, Err(CommerceError::CatalogUnavailable(msg)) if msg.contains("503")));
}

#[tokio::test]
async fn submits_cart_as_json() {
    let (base, server) = serve_once("200 OK", r#"{"orderId": 2001}"#).await;
    let order = OrderRequest::new(vec![
        CartLineItem::new(
            PizzaType::new("veggie", "The Vegetables Pizza").with_price(SizeCode::M, 9.0),
            SizeCode::M,
            "$9.00",
        ),
        CartLineItem::new(
            PizzaType::new("veggie", "The Vegetables Pizza").with_price(SizeCode::M, 9.0),
            SizeCode::M,
            "$9.00",
        ),
    ]);

    let confirmation = api_for(&base).submit_order(&order).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /api/order HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    let sent: serde_json::Value = serde_json::from_str(body_of(&request)).unwrap();
    assert_eq!(sent["cart"].as_array().unwrap().len(), 2);
    assert_eq!(sent["cart"][1]["price"], "$9.00");
    assert_eq!(sent["cart"][1]["size"], "M");
    assert_eq!(confirmation.order_id, Some(OrderId::new("2001")));
}

#[tokio::test]
async fn submits_empty_cart() {
    let (base, server) = serve_once("200 OK", "").await;

    let confirmation = api_for(&base)
        .submit_order(&OrderRequest::default())
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(body_of(&request), r#"{"cart":[]}"#);
    assert_eq!(confirmation.order_id, None);
}

#[tokio::test]
async fn rejected_order_is_submission_failure() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"oven broke"}"#).await;

    let result = api_for(&base).submit_order(&OrderRequest::default()).await;
    server.await.unwrap();

    assert!(matches!(
        result,
        Err(CommerceError::SubmissionFailed(msg)) if msg.contains("oven broke")
    ));
}

#[tokio::test]
async fn fetches_past_order() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"order":{"order_id":15,"date":"2015-01-02","time":"18:27:50"},"orderItems":[{"pizzaTypeId":"bbq_ckn","name":"The Barbecue Chicken Pizza","size":"L","quantity":1,"price":20.75,"total":20.75}]}"#,
    )
    .await;

    let order = api_for(&base)
        .fetch_past_order(&OrderId::new("15"))
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/past-order/15 HTTP/1.1"));
    assert_eq!(order.order.date, "2015-01-02");
    assert_eq!(order.order_items[0].total_display(), "$20.75");
}

#[tokio::test]
async fn missing_past_order_is_not_found() {
    let (base, server) = serve_once("404 Not Found", r#"{"error":"order not found"}"#).await;

    let result = api_for(&base).fetch_past_order(&OrderId::new("999")).await;
    server.await.unwrap();

    assert_eq!(result, Err(CommerceError::OrderNotFound("999".into())));
}
