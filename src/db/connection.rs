use std::thread;

use postgres::{Client, NoTls};
use tracing::{debug, error};

use crate::config::{AppConfig, RetryPolicy};
use crate::error::{LoadError, Result};

/// Open a database connection under the retry policy: each failed attempt is
/// logged with its attempt number, followed by the policy's fixed delay.
/// Spending the whole budget returns `ConnectionExhausted`.
pub fn connect_with_retry(config: &AppConfig, policy: &RetryPolicy) -> Result<Client> {
    let mut pg_config = postgres::Config::new();
    pg_config
        .host(&config.host)
        .port(config.port)
        .dbname(&config.database)
        .user(&config.user)
        .password(&config.password);

    let mut attempt = 0;
    loop {
        attempt += 1;
        match pg_config.connect(NoTls) {
            Ok(client) => {
                debug!("connected to {}:{}/{}", config.host, config.port, config.database);
                return Ok(client);
            }
            Err(err) => {
                error!("Attempt {} - database connection failed: {}", attempt, err);
                if attempt >= policy.max_attempts {
                    return Err(LoadError::ConnectionExhausted {
                        attempts: attempt,
                        source: err,
                    });
                }
                thread::sleep(policy.delay);
            }
        }
    }
}
