use crate::interface::{DeviceSnapshot, LedId};

pub fn status_text<'a>(connected : bool) -> &'a str {
  if connected {
    "Status: Connected"
  } else {
    "Status: Disconnected"
  }
}

pub fn led_text(led : LedId, value : Option<bool>) -> String {
  let state = match value {
    Some( true ) => "ON",
    Some( false ) => "OFF",
    None => "Unknown",
  };
  format!("{}: {}", led.label(), state)
}

/// The three labels of the main page for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texts {
  pub status : String,
  pub led1 : String,
  pub led2 : String,
}

impl Texts {
  pub fn new(snapshot : &DeviceSnapshot) -> Texts {
    Texts {
      status : status_text(snapshot.connected).to_string(),
      led1 : led_text(LedId::Led1, snapshot.led1),
      led2 : led_text(LedId::Led2, snapshot.led2),
    }
  }

  pub fn led(&self, led : LedId) -> &str {
    match led {
      LedId::Led1 => &self.led1,
      LedId::Led2 => &self.led2,
    }
  }
}
