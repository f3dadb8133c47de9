use std::{
    io::{self, Cursor},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use newreleases::{
    api::{ApiError, AuthKeysGetter},
    cli::get_auth_key::{
        Flow, FlowError, FlowMessages, Outcome, SelectionInput, acquire_and_store_key,
        parse_selection,
    },
    config::ConfigError,
    management::{ConfigManager, ConfigWriter},
    terminal::{PasswordReader, Terminal},
    types::AuthKey,
};

const SAVED_PATH: &str = "/tmp/newreleases-test.yaml";
const SELECT_PROMPT: &str = "Select auth key (enter row number): ";

struct FakeGetter {
    keys: Vec<AuthKey>,
    reject: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeGetter {
    fn with_keys(keys: Vec<AuthKey>) -> Self {
        FakeGetter {
            keys,
            reject: false,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn rejecting() -> Self {
        FakeGetter {
            reject: true,
            ..Self::with_keys(Vec::new())
        }
    }
}

#[async_trait]
impl AuthKeysGetter for FakeGetter {
    async fn get_auth_keys(&self, email: &str, password: &str) -> Result<Vec<AuthKey>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject {
            return Err(ApiError::Unauthorized);
        }
        Ok(self.keys.clone())
    }
}

#[derive(Default)]
struct FakeWriter {
    saved: Mutex<Vec<String>>,
}

#[async_trait]
impl ConfigWriter for FakeWriter {
    async fn persist_secret(&self, secret: &str) -> Result<PathBuf, ConfigError> {
        self.saved.lock().unwrap().push(secret.to_string());
        Ok(PathBuf::from(SAVED_PATH))
    }
}

struct FakePassword;

impl PasswordReader for FakePassword {
    fn read_password(&self) -> io::Result<String> {
        Ok("secret-password".to_string())
    }
}

struct BrokenPassword;

impl PasswordReader for BrokenPassword {
    fn read_password(&self) -> io::Result<String> {
        Err(io::Error::other("terminal unavailable"))
    }
}

struct FailingWriter;

#[async_trait]
impl ConfigWriter for FailingWriter {
    async fn persist_secret(&self, _secret: &str) -> Result<PathBuf, ConfigError> {
        Err(ConfigError::Write {
            path: PathBuf::from(SAVED_PATH),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
    }
}

// Helper function to create a numbered test key
fn key(n: usize) -> AuthKey {
    AuthKey {
        name: format!("key-{}", n),
        secret: format!("secret-{}", n),
        authorized_networks: Vec::new(),
    }
}

fn keys(count: usize) -> Vec<AuthKey> {
    (1..=count).map(key).collect()
}

struct FlowRun {
    result: Result<Outcome, FlowError>,
    out: String,
    err: String,
}

async fn run_flow_with(flow: Flow<'_>, input: &str) -> FlowRun {
    run_flow_reading(flow, input, &FakePassword).await
}

async fn run_flow_reading(flow: Flow<'_>, input: &str, password: &dyn PasswordReader) -> FlowRun {
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();

    let result = {
        let mut term = Terminal::new(&mut input, &mut out, &mut err, password);
        flow.run(&mut term).await
    };

    FlowRun {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

async fn run_flow(input: &str, getter: &FakeGetter, writer: &dyn ConfigWriter) -> FlowRun {
    run_flow_with(Flow::new(getter, writer), input).await
}

#[tokio::test]
async fn test_rejected_credentials_fail_with_exchange_error() {
    let getter = FakeGetter::rejecting();
    let writer = FakeWriter::default();

    let run = run_flow("user@example.com\n", &getter, &writer).await;

    // The unauthorized error reaches the caller unchanged
    assert!(matches!(
        run.result,
        Err(FlowError::Exchange(ApiError::Unauthorized))
    ));
    assert!(writer.saved.lock().unwrap().is_empty());
    assert!(!run.out.contains("Using auth key"));
}

#[tokio::test]
async fn test_zero_keys_prints_hint_and_saves_nothing() {
    let getter = FakeGetter::with_keys(Vec::new());
    let writer = FakeWriter::default();
    let messages = FlowMessages::default();

    let run = run_flow("user@example.com\n", &getter, &writer).await;

    assert_eq!(run.result.unwrap(), Outcome::Aborted);
    assert_eq!(
        run.out,
        format!(
            "{}\nEmail: Password: \n{}\n",
            messages.banner, messages.no_keys_hint
        )
    );
    assert_eq!(run.err, "No auth keys found.\n");
    assert!(writer.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_single_key_is_saved_without_selection() {
    let getter = FakeGetter::with_keys(keys(1));
    let writer = FakeWriter::default();

    let run = run_flow("user@example.com\n", &getter, &writer).await;

    assert_eq!(
        run.result.unwrap(),
        Outcome::Done {
            name: "key-1".to_string(),
            path: PathBuf::from(SAVED_PATH),
        }
    );
    assert!(!run.out.contains(SELECT_PROMPT));
    assert!(run.out.ends_with(&format!(
        "Using auth key: key-1.\nConfiguration saved to: {}.\n",
        SAVED_PATH
    )));
    assert_eq!(*writer.saved.lock().unwrap(), vec!["secret-1".to_string()]);
    assert!(run.err.is_empty());
}

#[tokio::test]
async fn test_credentials_are_trimmed_and_passed_to_exchange() {
    let getter = FakeGetter::with_keys(keys(1));
    let writer = FakeWriter::default();

    run_flow("  user@example.com \n", &getter, &writer).await;

    let calls = getter.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![("user@example.com".to_string(), "secret-password".to_string())]
    );
}

#[tokio::test]
async fn test_invalid_selection_is_retried() {
    let getter = FakeGetter::with_keys(keys(3));
    let writer = FakeWriter::default();

    let run = run_flow("user@example.com\nabc\n2\n", &getter, &writer).await;

    assert_eq!(
        run.result.unwrap(),
        Outcome::Done {
            name: "key-2".to_string(),
            path: PathBuf::from(SAVED_PATH),
        }
    );
    // One message per rejected line and one prompt per attempt
    assert_eq!(run.err, "Invalid row number.\n");
    assert_eq!(run.out.matches(SELECT_PROMPT).count(), 2);
    assert_eq!(*writer.saved.lock().unwrap(), vec!["secret-2".to_string()]);

    // Every key is listed before the prompt
    for n in 1..=3 {
        assert!(run.out.contains(&format!("key-{}", n)));
    }
}

#[tokio::test]
async fn test_out_of_range_rows_are_rejected() {
    let getter = FakeGetter::with_keys(keys(3));
    let writer = FakeWriter::default();

    let run = run_flow("user@example.com\n0\n4\n1\n", &getter, &writer).await;

    assert!(matches!(run.result, Ok(Outcome::Done { .. })));
    assert_eq!(run.err, "Invalid row number.\nInvalid row number.\n");
    assert_eq!(*writer.saved.lock().unwrap(), vec!["secret-1".to_string()]);
}

#[tokio::test]
async fn test_empty_selection_aborts() {
    let getter = FakeGetter::with_keys(keys(2));
    let writer = FakeWriter::default();

    let run = run_flow("user@example.com\n\n", &getter, &writer).await;

    assert_eq!(run.result.unwrap(), Outcome::Aborted);
    assert_eq!(run.err, "No key selected.\n");
    assert!(run.out.ends_with("Configuration is not saved.\n"));
    assert!(writer.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_end_of_input_at_selection_aborts() {
    let getter = FakeGetter::with_keys(keys(2));
    let writer = FakeWriter::default();

    let run = run_flow("user@example.com\n", &getter, &writer).await;

    assert_eq!(run.result.unwrap(), Outcome::Aborted);
    assert_eq!(run.err, "No key selected.\n");
    assert!(writer.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_end_of_input_at_email_is_read_error() {
    let getter = FakeGetter::with_keys(keys(1));
    let writer = FakeWriter::default();

    let run = run_flow("", &getter, &writer).await;

    assert!(matches!(run.result, Err(FlowError::Read(_))));
    assert!(getter.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_password_read_failure_is_read_error() {
    let getter = FakeGetter::with_keys(keys(1));
    let writer = FakeWriter::default();

    let run = run_flow_reading(
        Flow::new(&getter, &writer),
        "user@example.com\n",
        &BrokenPassword,
    )
    .await;

    assert!(matches!(run.result, Err(FlowError::Read(_))));
    assert!(getter.calls.lock().unwrap().is_empty());
    assert!(writer.saved.lock().unwrap().is_empty());

    // The password prompt line is still ended
    assert!(run.out.ends_with("Password: \n"));
}

#[tokio::test]
async fn test_write_failure_is_write_error() {
    let getter = FakeGetter::with_keys(keys(1));

    let run = run_flow("user@example.com\n", &getter, &FailingWriter).await;

    assert!(matches!(
        run.result,
        Err(FlowError::Write(ConfigError::Write { .. }))
    ));
    assert!(!run.out.contains("Using auth key"));
    assert!(!run.out.contains("Configuration saved to"));
}

#[tokio::test]
async fn test_slow_exchange_times_out() {
    let getter = FakeGetter {
        delay: Some(Duration::from_secs(5)),
        ..FakeGetter::with_keys(keys(1))
    };
    let writer = FakeWriter::default();
    let flow = Flow::new(&getter, &writer).with_exchange_timeout(Duration::from_millis(20));

    let run = run_flow_with(flow, "user@example.com\n").await;

    assert!(matches!(
        run.result,
        Err(FlowError::Exchange(ApiError::Timeout))
    ));
    assert!(writer.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_messages_are_printed() {
    let getter = FakeGetter::with_keys(Vec::new());
    let writer = FakeWriter::default();
    let flow = Flow::new(&getter, &writer).with_messages(FlowMessages {
        banner: "Welcome".to_string(),
        no_keys_hint: "Create one first".to_string(),
    });

    let run = run_flow_with(flow, "user@example.com\n").await;

    assert_eq!(run.out, "Welcome\nEmail: Password: \nCreate one first\n");
}

#[tokio::test]
async fn test_same_selection_twice_stores_same_secret() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let manager = ConfigManager::new(path.clone());
    let getter = FakeGetter::with_keys(keys(3));

    let first = run_flow("user@example.com\n3\n", &getter, &manager).await;
    assert!(first.result.is_ok());
    let after_first = std::fs::read_to_string(&path).unwrap();

    let second = run_flow("user@example.com\n3\n", &getter, &manager).await;
    assert!(second.result.is_ok());
    let after_second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(after_first, after_second);
    let stored = manager.load().await.unwrap();
    assert_eq!(stored.auth_key.as_deref(), Some("secret-3"));
}

#[tokio::test]
async fn test_acquire_and_store_key_uses_defaults() {
    let getter = FakeGetter::with_keys(keys(1));
    let writer = FakeWriter::default();
    let mut input = Cursor::new(b"user@example.com\n".to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let password = FakePassword;

    let result = {
        let mut term = Terminal::new(&mut input, &mut out, &mut err, &password);
        acquire_and_store_key(&mut term, &getter, &writer).await
    };

    assert!(matches!(result, Ok(Outcome::Done { .. })));
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with(&FlowMessages::default().banner));
}

#[test]
fn test_parse_selection() {
    assert_eq!(parse_selection("", 3), SelectionInput::Empty);
    assert_eq!(parse_selection("   ", 3), SelectionInput::Empty);
    assert_eq!(parse_selection("1", 3), SelectionInput::Row(0));
    assert_eq!(parse_selection(" 3 ", 3), SelectionInput::Row(2));

    // Outside the listed rows
    assert_eq!(parse_selection("0", 3), SelectionInput::Invalid);
    assert_eq!(parse_selection("4", 3), SelectionInput::Invalid);

    // Not a row number at all
    assert_eq!(parse_selection("abc", 3), SelectionInput::Invalid);
    assert_eq!(parse_selection("-1", 3), SelectionInput::Invalid);
    assert_eq!(parse_selection("1.5", 3), SelectionInput::Invalid);
}
