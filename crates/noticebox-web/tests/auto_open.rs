#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! Auto-open when mounted after the document has loaded, plus the JSON
//! config errors surfaced by `mount()`.
//!
//! Run: `wasm-pack test --headless --firefox crates/noticebox-web --test auto_open`

mod common;

use common::{by_id, render, sleep, text};
use noticebox_web::{mount, start};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"
<div id="noticeModal" class="modal hidden" aria-hidden="true"
     data-open-on-load="true" data-default-title="Welcome" data-default-body="Thanks">
  <div class="modal-backdrop"></div>
  <div class="modal-panel" tabindex="-1">
    <h2 id="modalTitle">Notice</h2>
    <p id="modalBody"></p>
    <button id="ok" data-modal-close>OK</button>
  </div>
</div>
"#;

#[wasm_bindgen_test]
async fn late_mount_auto_opens_after_load_delay() {
    render(MARKUP);
    assert!(mount(Some("{not json".into())).is_err());
    assert!(mount(Some(r#"{"close_delay_ms": "soon"}"#.into())).is_err());

    let Ok(modal) = mount(Some(r#"{"close_delay_ms": 100}"#.into())) else {
        panic!("valid config should mount");
    };
    start();
    assert_eq!(modal.state(), "closed");

    sleep(100).await;
    assert_eq!(modal.state(), "closed");

    sleep(250).await;
    assert!(modal.is_open());
    assert_eq!(text("modalTitle").as_deref(), Some("Welcome"));
    assert_eq!(text("modalBody").as_deref(), Some("Thanks"));
    assert_eq!(
        by_id("noticeModal").get_attribute("aria-hidden").as_deref(),
        Some("false")
    );
}
