#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread::{self, ThreadId};
use std::time::Duration;

use bytes::Bytes;
use courier_call::{Call, Callback, Error, Exchange, Invocation, Method, RawResponse, Request, RequestExt, Response, Transport, TransportError};
use futures::FutureExt;
use parking_lot::Mutex;
use serde::Deserialize;

pub const GET_USER: Method = Method::new("UserService", "get_user");

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
	pub id: u64,
}

pub fn get_user_request(id: u64) -> Request {
	http::Request::get(format!("http://users.test/users/{id}")).body(Bytes::new()).unwrap()
}

/// What the stub does once its delay has elapsed.
#[derive(Debug, Clone)]
pub enum Reply {
	Status(u16, &'static str),
	Fail(io::ErrorKind),
	Reject(&'static str),
	Hang,
}

/// Scripted transport that counts exchanges and records invocation tags.
pub struct StubTransport {
	delay: Duration,
	reply: Reply,
	hits: AtomicUsize,
	dropped: Arc<AtomicBool>,
	seen: Mutex<Vec<Option<Invocation>>>,
}

impl StubTransport {
	pub fn new(reply: Reply) -> Arc<Self> {
		Self::delayed(Duration::ZERO, reply)
	}

	pub fn delayed(delay: Duration, reply: Reply) -> Arc<Self> {
		Arc::new(Self {
			delay,
			reply,
			hits: AtomicUsize::new(0),
			dropped: Arc::new(AtomicBool::new(false)),
			seen: Mutex::new(Vec::new()),
		})
	}

	pub fn hits(&self) -> usize {
		self.hits.load(Ordering::SeqCst)
	}

	/// True once an unfinished exchange future was dropped.
	pub fn aborted(&self) -> bool {
		self.dropped.load(Ordering::SeqCst)
	}

	pub fn seen_invocations(&self) -> Vec<Option<Invocation>> {
		self.seen.lock().clone()
	}
}

struct DropFlag {
	flag: Arc<AtomicBool>,
	armed: bool,
}

impl Drop for DropFlag {
	fn drop(&mut self) {
		if self.armed {
			self.flag.store(true, Ordering::SeqCst);
		}
	}
}

impl Transport for StubTransport {
	fn exchange(&self, request: Arc<Request>) -> Exchange {
		self.hits.fetch_add(1, Ordering::SeqCst);
		self.seen.lock().push(request.invocation().cloned());
		let delay = self.delay;
		let reply = self.reply.clone();
		let mut guard = DropFlag {
			flag: Arc::clone(&self.dropped),
			armed: true,
		};
		async move {
			if !delay.is_zero() {
				tokio::time::sleep(delay).await;
			}
			let outcome = match reply {
				Reply::Status(status, body) => Ok(http::Response::builder()
					.status(status)
					.body(Bytes::from_static(body.as_bytes()))
					.unwrap()),
				Reply::Fail(kind) => Err(TransportError::Io(io::Error::new(kind, "stub failure"))),
				Reply::Reject(reason) => Err(TransportError::InvalidRequest(reason.to_owned())),
				Reply::Hang => futures::future::pending::<Result<RawResponse, TransportError>>().await,
			};
			guard.armed = false;
			outcome
		}
		.boxed()
	}
}

/// One delivered notification plus the thread it arrived on.
#[derive(Debug)]
pub enum Notification<T> {
	Response(Response<T>, ThreadId),
	Failure(Error, ThreadId),
}

impl<T> Notification<T> {
	pub fn thread(&self) -> ThreadId {
		match self {
			Self::Response(_, id) | Self::Failure(_, id) => *id,
		}
	}
}

/// Callback forwarding every notification to a channel and counting them.
pub struct Recorder<T> {
	tx: mpsc::Sender<Notification<T>>,
	count: Arc<AtomicUsize>,
}

impl<T: Send + 'static> Recorder<T> {
	pub fn new() -> (Box<dyn Callback<T>>, mpsc::Receiver<Notification<T>>, Arc<AtomicUsize>) {
		let (tx, rx) = mpsc::channel();
		let count = Arc::new(AtomicUsize::new(0));
		let recorder = Self {
			tx,
			count: Arc::clone(&count),
		};
		(Box::new(recorder), rx, count)
	}
}

impl<T: Send + 'static> Callback<T> for Recorder<T> {
	fn on_response(self: Box<Self>, call: &dyn Call<T>, response: Response<T>) {
		assert!(call.is_executed());
		self.count.fetch_add(1, Ordering::SeqCst);
		let _ = self.tx.send(Notification::Response(response, thread::current().id()));
	}

	fn on_failure(self: Box<Self>, call: &dyn Call<T>, error: Error) {
		assert!(call.is_executed());
		self.count.fetch_add(1, Ordering::SeqCst);
		let _ = self.tx.send(Notification::Failure(error, thread::current().id()));
	}
}

pub fn recv<T>(rx: &mpsc::Receiver<Notification<T>>) -> Notification<T> {
	rx.recv_timeout(Duration::from_secs(5)).expect("callback was not notified")
}
