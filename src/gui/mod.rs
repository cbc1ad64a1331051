use eframe::egui;
use crate::egui::*;
use crate::egui::widget_text::RichText;
use tokio::sync::mpsc::{channel, Sender, Receiver};
use tokio::sync::mpsc::error::TryRecvError;
use tokio_util::sync::CancellationToken;
use std::thread;
use log;

use crate::interface::*;
use crate::worker::worker_thread;

pub mod texts;
use texts::Texts;

pub struct SmartLightApp {
  snapshot : DeviceSnapshot,
  receiver : Receiver<DeviceSnapshot>,
  sender : Sender<SmartLightCommand>,
  cancel : CancellationToken,
}

impl SmartLightApp {
  pub fn new(cc : &eframe::CreationContext<'_>, cfg : SmartLightConfig) -> Self {

    log::debug!("SmartLightApp created with {:?}", cfg);
    const MAX_NUM_MESSAGES : usize = 10;

    let (worker_sender, gui_receiver) = channel::<DeviceSnapshot>(MAX_NUM_MESSAGES);
    let (gui_sender, worker_receiver) = channel::<SmartLightCommand>(MAX_NUM_MESSAGES);
    let cancel = CancellationToken::new();

    let ctx = cc.egui_ctx.clone();

    let mut style = (*ctx.style()).clone();
    style.visuals.selection.bg_fill = Color32::DARK_GREEN;
    ctx.set_style(style);

    // it detaches but we are control it via channels and the token
    let worker_cancel = cancel.clone();
    thread::spawn(move|| worker_thread(worker_sender, worker_receiver, ctx, cfg, worker_cancel));

    SmartLightApp {
      snapshot : DeviceSnapshot::default(),
      receiver : gui_receiver,
      sender : gui_sender,
      cancel,
    }
  }

  fn send_command(&self, cmd : SmartLightCommand) {
    if let Err( err ) = self.sender.try_send( cmd ) {
      log::error!("Failed to send {:?} command. Ignoring.", err);
    }
  }

  fn led_group(&self, ui : &mut Ui, led : LedId, texts : &Texts) {
    let text = match self.snapshot.led(led) {
      Some( true ) => RichText::new(texts.led(led)).heading().color(Color32::GREEN),
      _ => RichText::new(texts.led(led)).heading(),
    };

    ui.group(|ui| {
      ui.vertical_centered(|ui| {
        ui.label( text );
        if ui.button("Toggle").clicked() {
          self.send_command( SmartLightCommand::Toggle(led) );
        }
      });
    });
  }
}

impl Drop for SmartLightApp {
  fn drop(&mut self) {
    self.cancel.cancel();
  }
}

/// Empties the channel and returns the newest value; only the last snapshot is actual.
pub fn drain_latest<T : std::fmt::Debug>(receiver : &mut Receiver<T>) -> Result<Option<T>, TryRecvError> {
  let mut latest : Option<T> = None;
  loop {
    match receiver.try_recv() {
      Ok( value ) => {
        log::trace!("recv: {:?}", value);
        latest = Some( value );
      },
      Err( TryRecvError::Empty ) => return Ok( latest ),
      Err( TryRecvError::Disconnected ) => return match latest {
        Some( value ) => Ok( Some( value ) ),
        None => Err( TryRecvError::Disconnected ),
      },
    }
  }
}

impl eframe::App for SmartLightApp {
  fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {

    match drain_latest(&mut self.receiver) {
      Ok( Some( snapshot ) ) => self.snapshot = snapshot,
      Ok( None ) => (),
      Err( _ ) => {
        log::error!("Worker thread is dead. Closing...");
        frame.close();
      },
    }

    let texts = Texts::new(&self.snapshot);
    let status_text = if self.snapshot.connected {
      RichText::new(&texts.status).heading().color(Color32::GREEN)
    } else {
      RichText::new(&texts.status).heading()
    };

    egui::CentralPanel::default().show(ctx, |ui| {
      ui.vertical_centered(|ui| {
        ui.label( status_text );
        ui.add_space(20.0);
        for led in LedId::ALL {
          self.led_group(ui, led, &texts);
          ui.add_space(10.0);
        }
      });

      if ui.ctx().input( |i| i.key_pressed(Key::Q) )   {
        frame.close();
      }
    });
  }
}
