mod common;

use std::sync::Arc;
use std::thread;

use common::*;
use courier_call::{Adapted, Call, CallFactory, Invocation, JsonConverter, Platform, PlatformKind, ReturnShape};
use courier_invocation::Value;

#[test]
fn installed_main_thread_platform_owns_callbacks() {
	let installed = Platform::install(Platform::main_thread()).unwrap();
	assert!(std::ptr::eq(installed, Platform::get()));
	assert_eq!(Platform::get().kind(), PlatformKind::MainThread);

	let rejected = Platform::install(Platform::generic()).unwrap_err();
	assert_eq!(rejected.kind(), PlatformKind::Generic);
	assert_eq!(Platform::get().kind(), PlatformKind::MainThread);

	let main_loop = Platform::get().take_main_loop().unwrap();
	assert!(Platform::get().take_main_loop().is_none());
	let (ids_tx, ids_rx) = std::sync::mpsc::channel();
	let loop_thread = thread::spawn(move || {
		ids_tx.send(thread::current().id()).unwrap();
		main_loop.run()
	});
	let loop_id = ids_rx.recv().unwrap();

	let stub = StubTransport::new(Reply::Status(200, r#"{"id":42}"#));
	let factory = CallFactory::new(stub.clone());
	let call = factory.call(Invocation::of(GET_USER, &[Value::from(42)]), get_user_request(42), Arc::new(JsonConverter::<User>::new()));
	let Adapted::Call(call) = factory.adapt(call, ReturnShape::Call).unwrap() else {
		panic!("call shapes adapt to calls");
	};

	let (callback, rx, _) = Recorder::new();
	call.enqueue(callback).unwrap();
	let notification = recv(&rx);
	assert_eq!(notification.thread(), loop_id);
	assert!(matches!(notification, Notification::Response(_, _)));

	// The process-wide platform keeps its executor, so the loop runs for the
	// rest of the process.
	assert!(!loop_thread.is_finished());
}
