use super::panic_message;

#[tokio::test]
async fn extracts_static_str_payload() {
	let handle = tokio::spawn(async { panic!("boom-str") });
	let payload = handle.await.unwrap_err().into_panic();
	let msg = panic_message(&*payload);
	assert!(msg.contains("boom-str"), "expected 'boom-str', got: {msg}");
}

#[tokio::test]
async fn extracts_string_payload() {
	let handle = tokio::spawn(async { panic!("{}", String::from("boom-string")) });
	let payload = handle.await.unwrap_err().into_panic();
	let msg = panic_message(&*payload);
	assert!(msg.contains("boom-string"), "expected 'boom-string', got: {msg}");
}

#[test]
fn opaque_payload_gets_placeholder() {
	let payload = std::panic::catch_unwind(|| std::panic::panic_any(17u32)).unwrap_err();
	assert_eq!(panic_message(&*payload), "non-string panic payload");
}
