use serde::{Serialize, Deserialize};
use std::option::Option;
use std::time::Duration;

pub const DEFAULT_BASE_URL : &str = "http://192.168.1.155";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedId {
  Led1,
  Led2,
}

impl LedId {
  pub const ALL : [LedId; 2] = [LedId::Led1, LedId::Led2];

  pub fn toggle_path(&self) -> &'static str {
    match self {
      LedId::Led1 => "/toggle-led1",
      LedId::Led2 => "/toggle-led2",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      LedId::Led1 => "LED 1",
      LedId::Led2 => "LED 2",
    }
  }
}

/// Local mirror of the LEDs on the device. Only meaningful while connected.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedState {
  pub led1 : bool,
  pub led2 : bool,
}

impl LedState {
  pub fn get(&self, led : LedId) -> bool {
    match led {
      LedId::Led1 => self.led1,
      LedId::Led2 => self.led2,
    }
  }
}

/// What the GUI renders after a poll tick. `None` is shown as "Unknown".
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSnapshot {
  pub connected : bool,
  pub led1 : Option<bool>,
  pub led2 : Option<bool>,
}

impl DeviceSnapshot {
  pub fn disconnected() -> Self {
    DeviceSnapshot::default()
  }

  pub fn with_leds(leds : LedState) -> Self {
    DeviceSnapshot {
      connected : true,
      led1 : Some( leds.led1 ),
      led2 : Some( leds.led2 ),
    }
  }

  pub fn led(&self, led : LedId) -> Option<bool> {
    match led {
      LedId::Led1 => self.led1,
      LedId::Led2 => self.led2,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartLightCommand {
  Toggle(LedId),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SmartLightConfig {
  pub base_url : String,
  pub request_timeout_ms : u64,
  pub poll_interval_ms : u64,
  pub fullscreen : bool,
}

impl Default for SmartLightConfig {
  fn default() -> Self {
    SmartLightConfig {
      base_url : String::from(DEFAULT_BASE_URL),
      request_timeout_ms : 1000,
      poll_interval_ms : 100,
      fullscreen : false,
    }
  }
}

impl SmartLightConfig {
  pub fn request_timeout(&self) -> Duration {
    Duration::from_millis(self.request_timeout_ms)
  }

  pub fn poll_interval(&self) -> Duration {
    Duration::from_millis(self.poll_interval_ms)
  }
}
