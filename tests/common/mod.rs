//! In-process stand-in for the smart light firmware.
//!
//! Serves the same routes as the ESP32 web server: `GET /led` answers with the
//! JSON state of both LEDs, `POST /toggle-led1|2` flips one LED and answers
//! with its new value.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Online,
  /// every route answers 503
  Down,
  /// every route answers 500
  Failing,
  /// `/led` answers 200 with a body that is not JSON
  Garbled,
}

#[derive(Debug)]
struct Firmware {
  led1: bool,
  led2: bool,
  mode: Mode,
  led_body: Option<String>,
  toggles: usize,
}

pub struct EmulatedDevice {
  pub base_url: String,
  firmware: Arc<Mutex<Firmware>>,
  _shutdown: oneshot::Sender<()>,
}

impl EmulatedDevice {
  pub async fn start(mode: Mode) -> Self {
    let firmware = Arc::new(Mutex::new(Firmware {
      led1: false,
      led2: false,
      mode,
      led_body: None,
      toggles: 0,
    }));

    let shared = Arc::clone(&firmware);
    let make_service = make_service_fn(move |_conn| {
      let shared = Arc::clone(&shared);
      async move {
        Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
          let response = respond(&shared, &req);
          async move { Ok::<_, Infallible>(response) }
        }))
      }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = Server::bind(&addr).serve(make_service);
    let local_addr = server.local_addr();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
      let server = server.with_graceful_shutdown(async {
        let _ = shutdown_rx.await;
      });
      if let Err(e) = server.await {
        eprintln!("emulated device error: {}", e);
      }
    });

    EmulatedDevice {
      base_url: format!("http://{}", local_addr),
      firmware,
      _shutdown: shutdown_tx,
    }
  }

  pub fn set_mode(&self, mode: Mode) {
    self.firmware.lock().unwrap().mode = mode;
  }

  pub fn set_leds(&self, led1: bool, led2: bool) {
    let mut fw = self.firmware.lock().unwrap();
    fw.led1 = led1;
    fw.led2 = led2;
  }

  /// Replaces the `/led` answer verbatim, e.g. to leave out a key.
  pub fn set_led_body(&self, body: &str) {
    self.firmware.lock().unwrap().led_body = Some(body.to_string());
  }

  pub fn leds(&self) -> (bool, bool) {
    let fw = self.firmware.lock().unwrap();
    (fw.led1, fw.led2)
  }

  pub fn toggles(&self) -> usize {
    self.firmware.lock().unwrap().toggles
  }
}

fn respond(firmware: &Mutex<Firmware>, req: &Request<Body>) -> Response<Body> {
  let mut fw = firmware.lock().unwrap();

  match fw.mode {
    Mode::Down => return status(StatusCode::SERVICE_UNAVAILABLE),
    Mode::Failing => return status(StatusCode::INTERNAL_SERVER_ERROR),
    Mode::Online | Mode::Garbled => (),
  }

  match (req.method(), req.uri().path()) {
    (&Method::GET, "/led") => {
      if fw.mode == Mode::Garbled {
        return json("<html>led</html>".to_string());
      }
      let body = fw
        .led_body
        .clone()
        .unwrap_or_else(|| format!("{{\"led1\": {}, \"led2\": {}}}", fw.led1, fw.led2));
      json(body)
    }
    (&Method::POST, "/toggle-led1") => {
      fw.led1 = !fw.led1;
      fw.toggles += 1;
      json(format!("{{\"led1\": {}}}", fw.led1))
    }
    (&Method::POST, "/toggle-led2") => {
      fw.led2 = !fw.led2;
      fw.toggles += 1;
      json(format!("{{\"led2\": {}}}", fw.led2))
    }
    _ => status(StatusCode::NOT_FOUND),
  }
}

fn json(body: String) -> Response<Body> {
  let mut response = Response::new(Body::from(body));
  response.headers_mut().insert(
    hyper::header::CONTENT_TYPE,
    hyper::header::HeaderValue::from_static("application/json"),
  );
  response
}

fn status(code: StatusCode) -> Response<Body> {
  let mut response = Response::new(Body::empty());
  *response.status_mut() = code;
  response
}

/// A base URL nothing listens on.
pub fn unreachable_url() -> String {
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{}", addr)
}

/// A listener that accepts connections at the kernel level but never answers.
pub fn silent_device() -> (std::net::TcpListener, String) {
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let url = format!("http://{}", listener.local_addr().unwrap());
  (listener, url)
}
