//! Command handlers for Cellar Dump CLI
//!
//! This module implements the command handlers that connect CLI arguments
//! with the credential store and the dump runner. The store is passed in;
//! `main` hands over the platform keyring.

use std::time::Instant;

use tracing::{debug, info};

use crate::app::{default_tables, CellarClient, Dumper};
use crate::auth::{prompt_credentials, setup_credentials, CredentialStore, SecretStore};
use crate::cli::{DumpArgs, DumpProgress};
use crate::config::AppConfig;
use crate::errors::{AppError, DumpError, Result};

/// Process exit status for a finished command
pub fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Handle the login command
pub fn handle_login<S: SecretStore>(store: &CredentialStore<S>) -> Result<()> {
    setup_credentials(store, prompt_credentials).map_err(AppError::Auth)
}

/// Handle the logout command
pub fn handle_logout<S: SecretStore>(store: &CredentialStore<S>, quiet: bool) -> Result<()> {
    store.clear().map_err(AppError::Auth)?;

    if !quiet {
        println!("Credentials removed for {}", store.service());
    }
    Ok(())
}

/// Handle the dump command
///
/// Loads credentials, logs in, then fetches, validates and writes every table
/// in order. The first failure aborts the run.
pub async fn handle_dump<S: SecretStore>(
    args: DumpArgs,
    config: &AppConfig,
    store: &CredentialStore<S>,
    quiet: bool,
) -> Result<()> {
    let start = Instant::now();
    let output_dir = args.output_dir();

    // Checked before login so a typo costs no round trip
    if !output_dir.is_dir() {
        return Err(DumpError::OutputDirMissing { path: output_dir }.into());
    }

    let (username, password) = store.get()?;

    let client = CellarClient::connect_with_config(
        &config.service.base_url,
        &username,
        &password,
        &config.client.to_runtime_config(),
    )
    .await?;
    debug!("Session established against {}", client.base_url());

    let tables = default_tables();
    let mut progress = DumpProgress::new(tables.len(), !args.show, quiet);
    let summary = Dumper::new(&output_dir, args.show)
        .run_with_observer(&client, &tables, &mut progress)
        .await?;
    progress.finish();

    info!(
        "Dumped {} tables ({} rows) in {:.1}s",
        summary.files.len(),
        summary.total_rows,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;
    use crate::errors::{AuthError, FetchError};
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use tempfile::TempDir;

    fn table_body(name: &str) -> String {
        format!("iWine,Table\n1,{name}\n")
    }

    fn config_for(server: &ServerGuard) -> AppConfig {
        let mut config = AppConfig::default();
        config.service.base_url = server.url();
        config
    }

    fn logged_in_store() -> CredentialStore<MemoryStore> {
        let store = CredentialStore::new("cellar-dump-test", MemoryStore::new());
        store.set("alice", "secret").unwrap();
        store
    }

    fn dump_args(dir: &TempDir) -> DumpArgs {
        DumpArgs {
            output: dir.path().to_path_buf(),
            show: false,
        }
    }

    async fn mock_login(server: &mut ServerGuard, hits: usize) -> Mock {
        server
            .mock("POST", "/password.asp")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("szUser".into(), "alice".into()),
                Matcher::UrlEncoded("szPassword".into(), "secret".into()),
            ]))
            .expect(hits)
            .with_status(302)
            .with_header("set-cookie", "User=xyz; path=/")
            .create_async()
            .await
    }

    async fn mock_tables(server: &mut ServerGuard, failing: Option<&str>) -> Vec<Mock> {
        let mut mocks = Vec::new();
        for table in default_tables() {
            let body = if failing == Some(table.name.as_str()) {
                "<html><body>Session expired</body></html>".to_string()
            } else {
                table_body(&table.name)
            };
            let mock = server
                .mock("GET", "/xlquery.asp")
                .match_query(Matcher::UrlEncoded("Table".into(), table.name.clone()))
                .with_status(200)
                .with_body(body)
                .create_async()
                .await;
            mocks.push(mock);
        }
        mocks
    }

    #[tokio::test]
    async fn test_dump_command_succeeds() {
        let mut server = Server::new_async().await;
        let login = mock_login(&mut server, 1).await;
        let _tables = mock_tables(&mut server, None).await;
        let out = TempDir::new().unwrap();

        let result = handle_dump(dump_args(&out), &config_for(&server), &logged_in_store(), true).await;

        login.assert_async().await;
        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(exit_code(&result), 0);
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 12);
        assert_eq!(
            std::fs::read_to_string(out.path().join("privatenotes.csv")).unwrap(),
            table_body("PrivateNotes")
        );
    }

    #[tokio::test]
    async fn test_dump_command_without_credentials_fails() {
        let mut server = Server::new_async().await;
        let login = mock_login(&mut server, 0).await;
        let out = TempDir::new().unwrap();
        let store = CredentialStore::new("cellar-dump-test", MemoryStore::new());

        let result = handle_dump(dump_args(&out), &config_for(&server), &store, true).await;

        login.assert_async().await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::MissingCredentials))
        ));
        assert_eq!(exit_code(&result), 1);
    }

    #[tokio::test]
    async fn test_dump_command_with_rejected_login_fails() {
        let mut server = Server::new_async().await;
        let _login = server
            .mock("POST", "/password.asp")
            .with_status(200)
            .with_body("<html>Login failed</html>")
            .create_async()
            .await;
        let out = TempDir::new().unwrap();

        let result = handle_dump(dump_args(&out), &config_for(&server), &logged_in_store(), true).await;

        assert!(matches!(result, Err(AppError::Auth(AuthError::LoginFailed))));
        assert_eq!(exit_code(&result), 1);
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_dump_command_stops_at_expired_session() {
        let mut server = Server::new_async().await;
        let _login = mock_login(&mut server, 1).await;
        let _tables = mock_tables(&mut server, Some("Pending")).await;
        let out = TempDir::new().unwrap();

        let result = handle_dump(dump_args(&out), &config_for(&server), &logged_in_store(), true).await;

        assert!(matches!(
            result,
            Err(AppError::Dump(DumpError::Fetch(FetchError::BadResponse { status: 200, .. })))
        ));
        assert_eq!(exit_code(&result), 1);
        // List, Inventory, Notes, PrivateNotes and Purchase precede Pending
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 5);
    }

    #[tokio::test]
    async fn test_dump_command_missing_dir_skips_login() {
        let mut server = Server::new_async().await;
        let login = mock_login(&mut server, 0).await;
        let out = TempDir::new().unwrap();
        let args = DumpArgs {
            output: out.path().join("missing"),
            show: false,
        };

        let result = handle_dump(args, &config_for(&server), &logged_in_store(), true).await;

        login.assert_async().await;
        assert!(matches!(
            result,
            Err(AppError::Dump(DumpError::OutputDirMissing { .. }))
        ));
    }

    #[test]
    fn test_logout_clears_store() {
        let store = logged_in_store();

        let result = handle_logout(&store, true);

        assert_eq!(exit_code(&result), 0);
        assert!(!store.has_credentials());
    }
}
