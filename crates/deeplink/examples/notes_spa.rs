//! Headless walkthrough of the navigation engine.
//!
//! Wires a router the way a browser host would: a lexicon for titles, a
//! history backend, a handful of routes, then a few simulated location
//! changes. Run with `cargo run --example notes_spa`.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use deeplink::{Activation, JsonLexicon, MemoryHistory, Router, RouterEvent};
use serde_json::json;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let lexicon = JsonLexicon::new(json!({
        "deeplink": {
            "baseTitle": "Notes",
            "errorTitle": "Not Found",
            "pages": {
                "/": "Home",
                "notes": {
                    "<": "Notes",
                    "/": "All Notes"
                }
            }
        },
        "error": { "not_found": "That page does not exist" }
    }));

    let history = MemoryHistory::new();
    let mut router = Router::new()
        .with_lexicon(lexicon)
        .with_history(history.clone());

    router.on_event(|event| {
        if let RouterEvent::Error(err) = event {
            println!("error event: {} ({})", err.reason(), err.path());
        }
    });

    let open_note: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = open_note.clone();
    router.route("notes/:id", move |caps, query| {
        let id = caps.get("id").unwrap_or("?").to_string();
        println!("opening note {} (query: {} pairs)", id, query.len());
        *sink.borrow_mut() = Some(id);
    });
    router.route("notes", |_caps, _query| {
        println!("listing all notes");
    });
    router.after_route("notes/:id", |caps, _query| {
        println!("note {} finished loading", caps.get("id").unwrap_or("?"));
    });

    router.activate("", Activation::new());

    // The host would do this on every hashchange.
    router.execute_route("#/notes");
    router.loaded();
    println!("title: {}", router.document_title());

    router.execute_route("#/notes/42");
    router.loaded();
    println!("open note: {:?}", open_note.borrow());

    // A tracked route change goes out through the history backend...
    router.set_route("/notes/7", None, None);
    // ...and comes back in when the location actually moves.
    if let Some(target) = history.last() {
        router.execute_route(&target);
        router.loaded();
    }

    router.execute_route("#/nowhere");
    println!("title after miss: {}", router.document_title());
    println!("message: {}", router.error_message("not_found"));

    Ok(())
}
