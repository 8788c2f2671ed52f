#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use noticebox_core::{DialogState, Dom, DomEvent, Harness, MemoryDom, ModalConfig, ModalController};

#[derive(Debug, Arbitrary)]
enum Input {
    Open(Option<String>, Option<String>),
    Close,
    Click(u8),
    CloseControlClick,
    BackdropClick,
    DocumentClick(u8),
    Key(String),
    PageLoaded,
    Frame,
    Wait(u16),
    Detach(u8),
}

fuzz_target!(|inputs: Vec<Input>| {
    let (mut dom, page) = MemoryDom::notice_page();
    dom.set_attribute(&page.root, "data-open-on-load", "true");
    let Ok(controller) = ModalController::install(dom, ModalConfig::default()) else {
        return;
    };
    let mut h = Harness::new(controller);
    let nodes = [
        page.trigger,
        page.trigger_label,
        page.outside,
        page.backdrop,
        page.panel,
        page.close_button,
        page.footer_close,
        page.title,
    ];

    for input in inputs.into_iter().take(256) {
        match input {
            Input::Open(title, body) => h.open(title.as_deref(), body.as_deref()),
            Input::Close => h.close(),
            Input::Click(i) => h.dispatch(DomEvent::Click {
                target: nodes[i as usize % nodes.len()],
            }),
            Input::CloseControlClick => h.dispatch(DomEvent::CloseControlClick),
            Input::BackdropClick => h.dispatch(DomEvent::BackdropClick),
            Input::DocumentClick(i) => h.dispatch(DomEvent::DocumentClick {
                target: nodes[i as usize % nodes.len()],
            }),
            Input::Key(key) => h.dispatch(DomEvent::key(&key)),
            Input::PageLoaded => h.dispatch(DomEvent::PageLoaded),
            Input::Frame => h.next_frame(),
            Input::Wait(ms) => h.advance(Duration::from_millis(u64::from(ms))),
            Input::Detach(i) => {
                let node = nodes[i as usize % nodes.len()];
                if node != page.panel && node != page.backdrop {
                    h.dom_mut().detach(&node);
                }
            }
        }

        let state = h.controller().state();
        let aria = h.dom().attribute(&page.root, "aria-hidden");
        assert_eq!(aria.as_deref() == Some("false"), state == DialogState::Open);
        assert_eq!(
            h.dom().has_class(&page.root, "hidden"),
            state == DialogState::Closed
        );
    }
});
