mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use courier_call::{Adapted, Call, CallFactory, CallFuture, Error, Invocation, JsonConverter, Platform, ReturnShape, TransportCall};
use courier_invocation::Value;

fn factory(stub: Arc<StubTransport>) -> CallFactory {
	CallFactory::from_platform(stub, &Platform::generic(), None)
}

fn get_user(factory: &CallFactory, id: u64) -> TransportCall<User> {
	factory.call(Invocation::of(GET_USER, &[Value::from(id)]), get_user_request(id), Arc::new(JsonConverter::<User>::new()))
}

#[tokio::test]
async fn future_resolves_with_the_decoded_response() {
	init_tracing();
	let stub = StubTransport::new(Reply::Status(200, r#"{"id":7}"#));
	let factory = factory(stub.clone());

	let future = CallFuture::<User>::new(Box::new(get_user(&factory, 7))).unwrap();
	assert!(future.call().is_executed());

	let response = future.await.unwrap();
	assert_eq!(response.into_body(), Some(User { id: 7 }));
	assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn future_surfaces_failures() {
	let stub = StubTransport::new(Reply::Status(200, "not json"));
	let factory = factory(stub);

	let err = CallFuture::<User>::new(Box::new(get_user(&factory, 7))).unwrap().await.unwrap_err();
	assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn future_rejects_a_started_call() {
	let stub = StubTransport::new(Reply::Status(200, r#"{"id":7}"#));
	let factory = factory(stub);
	let call = get_user(&factory, 7);
	call.execute().unwrap();

	assert!(matches!(CallFuture::<User>::new(Box::new(call)), Err(Error::AlreadyExecuted)));
}

#[tokio::test]
async fn dropping_an_unresolved_future_cancels_the_call() {
	let stub = StubTransport::new(Reply::Hang);
	let factory = factory(stub.clone());
	let future = CallFuture::<User>::new(Box::new(get_user(&factory, 7))).unwrap();
	tokio::time::timeout(Duration::from_secs(5), async {
		while stub.hits() == 0 {
			tokio::time::sleep(Duration::from_millis(1)).await;
		}
	})
	.await
	.unwrap();
	assert!(!future.call().is_canceled());
	drop(future);

	tokio::time::timeout(Duration::from_secs(5), async {
		while !stub.aborted() {
			tokio::time::sleep(Duration::from_millis(1)).await;
		}
	})
	.await
	.unwrap();
}

#[tokio::test]
async fn factory_picks_the_future_adapter_for_future_shapes() {
	let stub = StubTransport::new(Reply::Status(200, r#"{"id":9}"#));
	let factory = factory(stub);

	let Adapted::Future(future) = factory.adapt(get_user(&factory, 9), ReturnShape::Future).unwrap() else {
		panic!("future shapes adapt to futures");
	};
	assert_eq!(future.await.unwrap().into_body(), Some(User { id: 9 }));

	let Adapted::Call(call) = factory.adapt(get_user(&factory, 9), ReturnShape::Call).unwrap() else {
		panic!("call shapes adapt to calls");
	};
	assert!(!call.is_executed());
}

#[test]
fn plain_defaults_have_no_future_adapter() {
	let stub = StubTransport::new(Reply::Status(200, r#"{"id":9}"#));
	let platform = Platform::generic().extended_defaults(false);
	let factory = CallFactory::from_platform(stub.clone(), &platform, None);

	let err = factory.adapt(get_user(&factory, 9), ReturnShape::Future).unwrap_err();
	assert!(matches!(err, Error::Defect(_)));
	assert_eq!(stub.hits(), 0);
}
