//! Session tests against a local mock of the CellarTracker endpoints
//!
//! These tests verify the login cookie contract and the table response
//! checks without network access.

use mockito::{Matcher, Server, ServerGuard};

use crate::app::client::{CellarClient, ClientConfig};
use crate::app::tables::TableRequest;
use crate::errors::{AuthError, FetchError};

const CSV: &str = "iWine,Wine,Vintage\n1,Chateau A,2010\n2,Chateau B,2015\n";

async fn mock_login(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/password.asp")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("Referrer".into(), "/default.asp".into()),
            Matcher::UrlEncoded("szUser".into(), "alice".into()),
            Matcher::UrlEncoded("szPassword".into(), "secret".into()),
            Matcher::UrlEncoded("UseCookie".into(), "true".into()),
        ]))
        .with_status(302)
        .with_header("location", "/default.asp")
        .with_header("set-cookie", "User=xyz; path=/")
        .create_async()
        .await
}

async fn connect(server: &ServerGuard) -> CellarClient {
    CellarClient::connect_with_config(&server.url(), "alice", "secret", &ClientConfig::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_succeeds_with_session_cookie() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server).await;

    let client = connect(&server).await;

    login.assert_async().await;
    assert!(client.base_url().as_str().starts_with(&server.url()));
}

#[tokio::test]
async fn test_login_without_cookie_fails_even_with_200() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/password.asp")
        .with_status(200)
        .with_body("<html><body>Invalid password</body></html>")
        .create_async()
        .await;

    let result =
        CellarClient::connect_with_config(&server.url(), "alice", "wrong", &ClientConfig::default())
            .await;

    assert!(matches!(result, Err(AuthError::LoginFailed)));
}

#[tokio::test]
async fn test_login_with_other_cookie_fails() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/password.asp")
        .with_status(302)
        .with_header("set-cookie", "ASPSESSIONID=abc; path=/")
        .create_async()
        .await;

    let result =
        CellarClient::connect_with_config(&server.url(), "alice", "secret", &ClientConfig::default())
            .await;

    assert!(matches!(result, Err(AuthError::LoginFailed)));
}

#[tokio::test]
async fn test_fetch_table_returns_body_verbatim() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let table = server
        .mock("GET", "/xlquery.asp")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("Table".into(), "Inventory".into()),
            Matcher::UrlEncoded("Format".into(), "csv".into()),
        ]))
        .match_header("cookie", Matcher::Regex("User=xyz".into()))
        .with_status(200)
        .with_body(CSV)
        .create_async()
        .await;

    let client = connect(&server).await;
    let text = client
        .fetch_table(&TableRequest::new("Inventory"))
        .await
        .unwrap();

    table.assert_async().await;
    assert_eq!(text, CSV);
}

#[tokio::test]
async fn test_fetch_table_sends_extra_params() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let table = server
        .mock("GET", "/xlquery.asp")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("Table".into(), "List".into()),
            Matcher::UrlEncoded("Format".into(), "csv".into()),
            Matcher::UrlEncoded("Location".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(CSV)
        .create_async()
        .await;

    let client = connect(&server).await;
    let request = TableRequest::new("List").with_param("Location", "1");
    client.fetch_table(&request).await.unwrap();

    table.assert_async().await;
}

#[tokio::test]
async fn test_fetch_table_rejects_html_error_page() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _table = server
        .mock("GET", "/xlquery.asp")
        .match_query(Matcher::UrlEncoded("Table".into(), "Pending".into()))
        .with_status(200)
        .with_body("<html><body>Session expired</body></html>")
        .create_async()
        .await;

    let client = connect(&server).await;
    let err = client
        .fetch_table(&TableRequest::new("Pending"))
        .await
        .unwrap_err();

    match err {
        FetchError::BadResponse {
            url,
            status,
            snippet,
        } => {
            assert!(url.contains("Table=Pending"));
            assert_eq!(status, 200);
            assert!(snippet.contains("Session expired"));
        }
        other => panic!("expected bad response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_table_rejects_error_status() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _table = server
        .mock("GET", "/xlquery.asp")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("iWine\n1\n")
        .create_async()
        .await;

    let client = connect(&server).await;
    let err = client
        .fetch_table(&TableRequest::new("Notes"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::BadResponse { status: 500, .. }));
}
