use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use log;

use crate::egui::Context;
use crate::interface::{DeviceSnapshot, LedState};
use super::device::LedDevice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
  Disconnected,
  Connected,
}

#[derive(Debug, Clone)]
pub struct PollerState {
  pub link : LinkState,
  /// last LEDs read from the device; kept but stale while disconnected
  pub leds : LedState,
  pub published : DeviceSnapshot,
}

impl Default for PollerState {
  fn default() -> Self {
    PollerState {
      link : LinkState::Disconnected,
      leds : LedState::default(),
      published : DeviceSnapshot::default(),
    }
  }
}

/// One probe and, when the device answers, one fetch.
///
/// Only the probe decides connectivity. A failed fetch republishes the
/// previous LED values instead of flipping them to unknown.
pub async fn poll_tick<D : LedDevice + ?Sized>(device : &D, state : &mut PollerState) -> DeviceSnapshot {
  let connected = device.probe().await;

  let link = if connected { LinkState::Connected } else { LinkState::Disconnected };
  if link != state.link {
    log::info!("Device link {:?} -> {:?}", state.link, link);
    state.link = link;
  }

  let snapshot = if !connected {
    DeviceSnapshot::disconnected()
  } else {
    match device.fetch_led_state().await {
      Ok( leds ) => {
        state.leds = leds;
        DeviceSnapshot::with_leds(leds)
      },
      Err( e ) => {
        log::debug!("Failed to fetch LED state, keeping previous values : {}", e);
        DeviceSnapshot { connected : true, ..state.published }
      },
    }
  };

  state.published = snapshot;
  snapshot
}

pub async fn poll_loop<D : LedDevice + ?Sized>(
  device : Arc<D>,
  sender : Sender<DeviceSnapshot>,
  egui_ctx : Context,
  interval : Duration,
  cancel : CancellationToken)
{
  let mut state = PollerState::default();

  loop {
    let snapshot = tokio::select! {
      _ = cancel.cancelled() => break,
      snapshot = poll_tick(device.as_ref(), &mut state) => snapshot,
    };

    match sender.try_send(snapshot) {
      Ok(()) => egui_ctx.request_repaint(),
      Err( TrySendError::Full( _ ) ) => log::warn!("Failed to send device snapshot, GUI is not consuming it!"),
      Err( TrySendError::Closed( _ ) ) => {
        log::warn!("Failed to send device snapshot - channel is closed. Probably GUI is dead, exiting....");
        break;
      },
    }

    tokio::select! {
      _ = cancel.cancelled() => break,
      _ = tokio::time::sleep(interval) => (),
    }
  }

  log::info!("Poll loop stopped");
}
