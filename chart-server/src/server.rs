use std::io::{self, BufRead, BufReader, Write};
use std::net::{Ipv4Addr, SocketAddrV4, TcpListener, TcpStream};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use logger::{Color, Logger};
use threadpool::ThreadPool;
use vessel_sim::{NavSink, NavigationUpdate};

use crate::errors::ServerError;

const INDEX_HTML: &str = include_str!("../resources/index.html");

// A stalled client must not hold up delivery; writes that cannot complete
// within this window count as a delivery failure and the subscriber is
// dropped.
const WRITE_TIMEOUT_MILLIS: u64 = 100;

// A client that connects and never sends its request line must not pin a
// pool thread forever.
const REQUEST_TIMEOUT_MILLIS: u64 = 2000;

/// The stub HTTP server and broadcast sink.
///
/// Serves the chart page on `/`, keeps `/stream` connections open as
/// newline-delimited JSON subscribers, and answers anything else with 404.
/// Publishing only enqueues the serialized update; the blocking socket
/// writes run on a dedicated delivery thread, which also prunes dead
/// subscribers.
pub struct BroadcastServer {
    subscribers: Arc<Mutex<Vec<TcpStream>>>,
    updates: mpsc::Sender<String>,
    logger: Logger,
}

impl BroadcastServer {
    /// Creates the server and spawns its delivery thread.
    pub fn new(logger: Logger) -> Result<Self, ServerError> {
        let subscribers: Arc<Mutex<Vec<TcpStream>>> = Arc::new(Mutex::new(Vec::new()));
        let (updates, delivery_queue) = mpsc::channel::<String>();

        let delivery_subscribers = Arc::clone(&subscribers);
        let delivery_logger = logger.clone();
        thread::Builder::new()
            .name("delivery-thread".to_string())
            .spawn(move || {
                for payload in delivery_queue {
                    deliver(&payload, &delivery_subscribers, &delivery_logger);
                }
            })?;

        Ok(BroadcastServer {
            subscribers,
            updates,
            logger,
        })
    }

    /// Binds the listening socket and starts accepting connections on a
    /// dedicated thread; each connection is handled on the pool.
    pub fn start(&self, port: u16, pool: Arc<ThreadPool>) -> Result<(), ServerError> {
        let socket = SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), port);
        let listener = TcpListener::bind(socket)?;
        self.logger
            .info(
                &format!("Server listening on: http://{}", socket),
                Color::Green,
                true,
            )
            .ok();

        let subscribers = Arc::clone(&self.subscribers);
        let logger = self.logger.clone();
        thread::Builder::new()
            .name("accept-thread".to_string())
            .spawn(move || {
                for stream in listener.incoming() {
                    match stream {
                        Ok(stream) => {
                            let subscribers = Arc::clone(&subscribers);
                            let logger = logger.clone();
                            pool.execute(move || {
                                if let Err(e) = handle_connection(stream, subscribers, &logger) {
                                    logger.warn(&format!("Connection error: {}", e), true).ok();
                                }
                            });
                        }
                        Err(e) => {
                            logger
                                .error(&format!("Error accepting connection: {:?}", e), true)
                                .ok();
                        }
                    }
                }
            })?;

        Ok(())
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}

impl NavSink for BroadcastServer {
    // Queue-and-forget: the tick thread only serializes and enqueues, so a
    // stalled subscriber can never stretch a tick. Delivery failures never
    // reach the simulator.
    fn publish(&self, update: &NavigationUpdate) {
        if let Ok(payload) = serde_json::to_string(update) {
            self.updates.send(payload).ok();
        }
    }
}

// Runs on the delivery thread: write the payload to every subscriber and
// drop the ones whose sockets fail.
fn deliver(payload: &str, subscribers: &Arc<Mutex<Vec<TcpStream>>>, logger: &Logger) {
    let mut subscribers = match subscribers.lock() {
        Ok(subscribers) => subscribers,
        Err(_) => return,
    };

    let before = subscribers.len();
    subscribers.retain_mut(|stream| {
        stream
            .write_all(payload.as_bytes())
            .and_then(|_| stream.write_all(b"\n"))
            .and_then(|_| stream.flush())
            .is_ok()
    });

    let dropped = before - subscribers.len();
    if dropped > 0 {
        logger
            .warn(&format!("Dropped {} dead subscriber(s)", dropped), true)
            .ok();
    }
}

fn handle_connection(
    stream: TcpStream,
    subscribers: Arc<Mutex<Vec<TcpStream>>>,
    logger: &Logger,
) -> Result<(), ServerError> {
    let peer = stream.peer_addr()?;
    stream.set_read_timeout(Some(Duration::from_millis(REQUEST_TIMEOUT_MILLIS)))?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut stream = stream;
    match request_path(&request_line) {
        Some("/") => {
            logger
                .info(&format!("GET / from {}", peer), Color::White, true)
                .ok();
            write_response(&mut stream, "200 OK", "text/html", INDEX_HTML)?;
        }
        Some("/stream") => {
            logger
                .info(&format!("Subscriber connected: {}", peer), Color::Cyan, true)
                .ok();
            stream.write_all(
                b"HTTP/1.1 200 OK\r\n\
                  Content-Type: application/x-ndjson\r\n\
                  Cache-Control: no-cache\r\n\
                  Connection: keep-alive\r\n\r\n",
            )?;
            stream.flush()?;
            stream.set_write_timeout(Some(Duration::from_millis(WRITE_TIMEOUT_MILLIS)))?;
            if let Ok(mut subs) = subscribers.lock() {
                subs.push(stream);
            }
        }
        _ => {
            write_response(&mut stream, "404 Not Found", "text/plain", "Error")?;
        }
    }

    Ok(())
}

/// Extracts the request path from an HTTP GET request line. Anything that
/// is not a GET yields `None` and falls through to the 404 branch.
fn request_path(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(path)) => Some(path),
        _ => None,
    }
}

fn write_response(
    stream: &mut TcpStream,
    status: &str,
    content_type: &str,
    body: &str,
) -> io::Result<()> {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes())?;
    stream.flush()
}
