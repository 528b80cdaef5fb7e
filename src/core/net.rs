// src/core/net.rs

// Blocking HTTP GET (reqwest)

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::error::{Error, Result};

/// `timeout = None` disables the client-side timeout entirely.
pub fn client(timeout: Option<Duration>) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// One GET with the given `User-Agent`. Non-2xx is an error; no retries.
pub fn http_get(client: &Client, url: &str, user_agent: &str) -> Result<String> {
    let resp = client.get(url).header(USER_AGENT, user_agent).send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { status: status.as_u16(), url: s!(url) });
    }
    Ok(resp.text()?)
}
