use crate::egui::Context; // b/c of re-export
use std::sync::Arc;
use tokio::sync::mpsc::{Sender, Receiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio;
use log;
use crate::interface::*;

pub mod device;
pub mod poller;

use device::{DeviceClient, LedDevice};
use poller::poll_loop;

#[tokio::main]
pub async fn worker_thread(
  sender : Sender<DeviceSnapshot>,
  receiver : Receiver<SmartLightCommand>,
  ctx : Context,
  cfg : SmartLightConfig,
  cancel : CancellationToken)
{
  let result = worker_thread_prime(sender, receiver, ctx, cfg, cancel).await;
  if let Err ( e ) = result {
    log::error!("Error in worker_thread : {}. exiting....", e);
  }
}

pub async fn worker_thread_prime(
  sender : Sender<DeviceSnapshot>,
  receiver : Receiver<SmartLightCommand>,
  ctx : Context,
  cfg : SmartLightConfig,
  cancel : CancellationToken) -> Result<(), String>
{
  let device = DeviceClient::new(&cfg.base_url, cfg.request_timeout()).map_err(|x| x.to_string())?;
  log::info!("Watching smart light at {}", device.base_url());
  let device = Arc::new(device);

  let h1 = tokio::task::spawn( poll_loop(device.clone(), sender, ctx, cfg.poll_interval(), cancel.clone()) );
  let h2 = tokio::task::spawn( execute_command_loop(receiver, device, cancel) );

  if let Err( e ) = h1.await {
    log::warn!("poll_loop task is failed... {:?}", e);
  }
  if let Err( e ) = h2.await {
    log::warn!("execute_command_loop task is failed... {:?}", e);
  }

  Ok(())
}

pub async fn execute_command_loop<D : LedDevice + ?Sized + 'static>(
  mut receiver : Receiver<SmartLightCommand>,
  device : Arc<D>,
  cancel : CancellationToken)
{
  loop {
    tokio::select! {
      _ = cancel.cancelled() => break,
      cmd = receiver.recv() => match cmd {
        // handle dropped on purpose, the next poll tick shows the outcome
        Some( cmd ) => { execute_command(device.clone(), cmd); },
        None => {
          log::warn!("Failed to receive command, probably GUI is dead. Exiting...");
          break;
        },
      },
    }
  }
}

/// Runs `cmd` on its own task without waiting for it. Errors are logged and dropped.
pub fn execute_command<D : LedDevice + ?Sized + 'static>(device : Arc<D>, cmd : SmartLightCommand) -> JoinHandle<()>
{
  tokio::spawn(async move {
    log::debug!("Got CMD: {:?}", cmd);
    match cmd {
      SmartLightCommand::Toggle( led ) => match device.toggle(led).await {
        Ok( answer ) => log::debug!("{} toggled, device answered {}", led.label(), answer.trim()),
        Err( e ) => log::warn!("Error while toggling {} : {}", led.label(), e),
      },
    }
  })
}
