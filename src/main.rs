use eframe::egui;
use env_logger;
use smart_light::gui::SmartLightApp;
use smart_light::interface::SmartLightConfig;

const APP_NAME : &str = "smart-light";

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let cfg : SmartLightConfig = match confy::load(APP_NAME, None) {
    Ok( cfg ) => cfg,
    Err( e ) => {
      log::error!("Failed to load {} config : {}. Using defaults.", APP_NAME, e);
      SmartLightConfig::default()
    },
  };

  let mut native_options = eframe::NativeOptions::default();
  native_options.fullscreen = cfg.fullscreen;
  native_options.initial_window_size = Some( egui::vec2(360.0, 420.0) );

  if let Err( e ) = eframe::run_native(
      "Smart Light",
      native_options,
      Box::new(|cc| Box::new(SmartLightApp::new(cc, cfg)) )
    )  {
    log::error!("Failed to run Smart Light {:?}", e);
  };
}
