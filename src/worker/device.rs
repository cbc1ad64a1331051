use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use log;

use crate::interface::{LedId, LedState};

pub const LED_STATE_PATH : &str = "/led";

#[derive(Debug, Error)]
pub enum DeviceError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("unexpected LED state body: {0}")]
  Parse(#[from] serde_json::Error),
  #[error("device answered with status {0}")]
  Http(StatusCode),
}

/// The three calls the firmware offers.
#[async_trait]
pub trait LedDevice : Send + Sync {
  /// Reachability check. Never fails, any error counts as unreachable.
  async fn probe(&self) -> bool;

  async fn fetch_led_state(&self) -> Result<LedState, DeviceError>;

  /// Flips one LED on the device and returns the raw answer.
  async fn toggle(&self, led : LedId) -> Result<String, DeviceError>;
}

#[derive(Clone, Debug)]
pub struct DeviceClient {
  client : reqwest::Client,
  base_url : String,
  timeout : Duration,
}

impl DeviceClient {
  pub fn new(base_url : &str, timeout : Duration) -> Result<Self, DeviceError> {
    let client = build_client(timeout)?;
    Ok( DeviceClient {
      client,
      base_url : base_url.trim_end_matches('/').to_string(),
      timeout,
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path : &str) -> String {
    format!("{}{}", self.base_url, path)
  }
}

#[async_trait]
impl LedDevice for DeviceClient {
  async fn probe(&self) -> bool {
    // a fresh client per probe, so a timed out request leaves nothing behind in the shared pool
    let client = match build_client(self.timeout) {
      Ok( client ) => client,
      Err( e ) => {
        log::warn!("Failed to build probe client : {}", e);
        return false;
      },
    };

    match client.get(self.url(LED_STATE_PATH)).send().await {
      Ok( response ) => response.status().is_success(),
      Err( e ) => {
        log::trace!("Probe of {} failed : {}", self.base_url, e);
        false
      },
    }
  }

  async fn fetch_led_state(&self) -> Result<LedState, DeviceError> {
    let response = self.client.get(self.url(LED_STATE_PATH)).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err( DeviceError::Http(status) );
    }
    let body = response.text().await?;
    Ok( parse_led_state(&body)? )
  }

  async fn toggle(&self, led : LedId) -> Result<String, DeviceError> {
    let response = self.client.post(self.url(led.toggle_path())).body("").send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err( DeviceError::Http(status) );
    }
    Ok( response.text().await? )
  }
}

fn build_client(timeout : Duration) -> Result<reqwest::Client, reqwest::Error> {
  reqwest::Client::builder().timeout(timeout).build()
}

/// Parses the `/led` body: an object of booleans where absent keys read as off.
pub fn parse_led_state(body : &str) -> Result<LedState, serde_json::Error> {
  let leds : HashMap<String, bool> = serde_json::from_str(body)?;
  Ok( LedState {
    led1 : leds.get("led1").copied().unwrap_or(false),
    led2 : leds.get("led2").copied().unwrap_or(false),
  })
}
