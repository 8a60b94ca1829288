use rest_client::{ClientConfig, HttpMethod, RequestExecutor};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), rest_client::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env()?;
    let mut executor = RequestExecutor::new();

    executor.set_body(r#"{"title": "foo", "body": "bar", "userId": 1}"#);
    executor.add_header("Content-type", "application/json; charset=UTF-8");
    let body = executor.request(HttpMethod::Post, &config.url("/posts"), config.timeout_ms);
    report("POST", &executor, &body);

    let body = executor.request(HttpMethod::Get, &config.url("/todos/1"), config.timeout_ms);
    report("GET", &executor, &body);

    let body = executor.request(HttpMethod::Delete, &config.url("/posts/1"), config.timeout_ms);
    report("DELETE", &executor, &body);

    Ok(())
}

fn report(label: &str, executor: &RequestExecutor, body: &str) {
    if executor.status_code() == 0 {
        tracing::warn!(request = label, "request did not complete");
        return;
    }
    println!("{label} {}: {body}", executor.status_code());
}
