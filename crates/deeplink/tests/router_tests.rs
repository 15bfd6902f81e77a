//! Integration tests for the deeplink navigation engine.
//!
//! Covers the engine's observable contract:
//! - listener dispatch for matched routes, in registration order
//! - the not-found error event
//! - query captures reaching listeners
//! - lifecycle event ordering and the loaded/after-route flow
//! - route setting (absolute, relative, soft, untracked)
//! - page titles and the readiness gate

use std::cell::RefCell;
use std::rc::Rc;

use deeplink::{
    Activation, JsonLexicon, MemoryHistory, NavigateError, QueryMap, Router, RouterEvent,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn activated_router() -> Router {
    let mut router = Router::new();
    router.activate("", Activation::new());
    router
}

fn lexicon() -> JsonLexicon {
    JsonLexicon::new(json!({
        "deeplink": {
            "baseTitle": "Notes",
            "errorTitle": "Not Found",
            "pages": {
                "/": "Home",
                "user": { "<": "Users", "/": "All Users" }
            }
        },
        "error": { "not_found": "That page does not exist" }
    }))
}

#[test]
fn listener_fires_once_with_captures_and_empty_query() {
    let mut router = activated_router();

    let calls: Rc<RefCell<Vec<(Option<String>, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    router.route("user/:id", move |caps, query| {
        sink.borrow_mut()
            .push((caps.get("id").map(String::from), query.len()));
    });

    router.execute_route("#/user/42");

    assert_eq!(
        calls.borrow().as_slice(),
        &[(Some("42".to_string()), 0)]
    );
}

#[test]
fn listeners_fire_in_add_order_per_pattern() {
    let mut router = activated_router();

    let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();
    router.route("inbox", move |_, _| first.borrow_mut().push("first"));
    router.route("inbox", move |_, _| second.borrow_mut().push("second"));

    router.execute_route("#/inbox");

    assert_eq!(order.borrow().as_slice(), &["first", "second"]);
}

#[test]
fn patterns_dispatch_in_registration_order() {
    let mut router = activated_router();

    let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let by_param = order.clone();
    let by_literal = order.clone();
    router.route("user/:id", move |_, _| by_param.borrow_mut().push("param"));
    router.route("user/42", move |_, _| by_literal.borrow_mut().push("literal"));

    router.execute_route("#/user/42");

    assert_eq!(order.borrow().as_slice(), &["param", "literal"]);
}

#[test]
fn query_capture_reaches_listener() {
    let mut router = activated_router();

    let term: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = term.clone();
    router.route("search?q=:term", move |caps, _| {
        *sink.borrow_mut() = caps.get("term").map(String::from);
    });

    router.execute_route("#/search?q=hello");

    assert_eq!(term.borrow().as_deref(), Some("hello"));
}

#[test]
fn unmatched_path_raises_not_found_and_fires_no_listeners() {
    let mut router = activated_router();

    let fired = Rc::new(RefCell::new(false));
    let flag = fired.clone();
    router.route("user/:id", move |_, _| *flag.borrow_mut() = true);

    let errors: Rc<RefCell<Vec<NavigateError>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    router.on_event(move |event| {
        if let RouterEvent::Error(err) = event {
            sink.borrow_mut().push(err.clone());
        }
    });

    router.execute_route("#/nonexistent");

    assert!(!*fired.borrow());
    assert!(router.is_error());
    let errors = errors.borrow();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].reason(), "not_found");
    assert_eq!(errors[0].path(), "#/nonexistent");
}

#[test]
fn wildcard_only_hit_still_counts_as_not_found() {
    let mut router = activated_router();

    let swallowed = Rc::new(RefCell::new(false));
    let flag = swallowed.clone();
    router.route("*", move |_, _| *flag.borrow_mut() = true);

    let errored = Rc::new(RefCell::new(false));
    let err_flag = errored.clone();
    router.on_event(move |event| {
        if matches!(event, RouterEvent::Error(_)) {
            *err_flag.borrow_mut() = true;
        }
    });

    router.execute_route("#/anything");

    // A catch-all alone is not a page; the error fires and the catch-all
    // listener does not.
    assert!(*errored.borrow());
    assert!(!*swallowed.borrow());
}

#[test]
fn after_routes_fire_only_on_loaded() {
    let mut router = activated_router();

    let phases: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let on = phases.clone();
    let after = phases.clone();
    router.route("inbox", move |_, _| on.borrow_mut().push("route"));
    router.after_route("inbox", move |_, _| after.borrow_mut().push("after"));

    router.execute_route("#/inbox");
    assert_eq!(phases.borrow().as_slice(), &["route"]);

    router.loaded();
    assert_eq!(phases.borrow().as_slice(), &["route", "after"]);
    assert!(!router.is_loading());
}

#[test]
fn loaded_is_a_noop_after_an_error() {
    let mut router = activated_router();

    let after_fired = Rc::new(RefCell::new(false));
    let flag = after_fired.clone();
    router.after_route("inbox", move |_, _| *flag.borrow_mut() = true);

    router.execute_route("#/nonexistent");
    router.loaded();

    assert!(!*after_fired.borrow());
    assert!(router.is_error());
}

#[test]
fn lifecycle_event_order_on_success() {
    let mut router = activated_router();
    router.route("inbox", |_, _| {});

    let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    router.on_event(move |event| sink.borrow_mut().push(event.name()));

    router.execute_route("#/inbox");
    router.loaded();

    assert_eq!(
        events.borrow().as_slice(),
        &["loading", "completed", "loaded", "after_loaded"]
    );
}

#[test]
fn registering_on_active_router_fires_for_current_path() {
    let mut router = activated_router();
    router.execute_route("#/user/7");

    let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    router.route("user/:id", move |caps, _| {
        *sink.borrow_mut() = caps.get("id").map(String::from);
    });

    // No navigation happened; binding alone tested the current path.
    assert_eq!(seen.borrow().as_deref(), Some("7"));
}

#[test]
fn set_route_tracked_goes_through_history() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());
    router.activate("", Activation::new());

    router.set_route("/user/42", None, None);

    assert_eq!(history.entries(), vec!["/user/42/"]);
    // The route executes only when the host feeds the change back.
    assert_eq!(router.current_path(), "");
}

#[test]
fn set_route_untracked_executes_and_replaces_fragment() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());
    router.activate("", Activation::new());

    let fired = Rc::new(RefCell::new(false));
    let flag = fired.clone();
    router.route("user/:id", move |_, _| *flag.borrow_mut() = true);

    router.set_route("/user/42", None, Some(false));

    assert!(*fired.borrow());
    assert_eq!(router.current_path(), "/user/42/");
    assert!(history.entries().is_empty());
    assert_eq!(history.replaced(), vec!["#/user/42/"]);
}

#[test]
fn relative_set_route_appends_and_merges_query() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());
    router.activate("", Activation::new());

    router.execute_route("#/mail?lang=en");
    router.set_route("inbox?page=2", None, None);

    assert_eq!(history.last().as_deref(), Some("/mail/inbox/?lang=en&page=2"));
}

#[test]
fn relative_set_route_drops_empty_query_values() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());
    router.activate("", Activation::new());

    router.execute_route("#/mail?lang=en");
    router.set_route("inbox?lang=", None, None);

    assert_eq!(history.last().as_deref(), Some("/mail/inbox/"));
}

#[test]
fn soft_set_route_updates_state_without_dispatch() {
    let mut router = activated_router();

    let fired = Rc::new(RefCell::new(0usize));
    let count = fired.clone();
    router.route("user/:id", move |_, _| *count.borrow_mut() += 1);

    let completed = Rc::new(RefCell::new(0usize));
    let completions = completed.clone();
    router.on_event(move |event| {
        if matches!(event, RouterEvent::Completed) {
            *completions.borrow_mut() += 1;
        }
    });

    router.soft_set_route("/user/42", None, Some(false));

    assert_eq!(*fired.borrow(), 0);
    assert_eq!(*completed.borrow(), 1);
    assert_eq!(router.current_path(), "/user/42/");
}

#[test]
fn update_route_substitutes_current_segments() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());
    router.activate("", Activation::new());

    router.execute_route("#/mail/inbox");

    let mut params = QueryMap::new();
    params.insert("page", "2");
    router.update_route("/$/sent", &params, None, None);

    assert_eq!(history.last().as_deref(), Some("/mail/sent/?page=2"));
}

#[test]
fn purge_routes_clears_both_registries() {
    let mut router = activated_router();

    let fired = Rc::new(RefCell::new(false));
    let flag = fired.clone();
    router.route("inbox", move |_, _| *flag.borrow_mut() = true);
    router.after_route("inbox", |_, _| {});
    assert_eq!(router.tracked_routes(), vec!["inbox"]);
    assert_eq!(router.notify_routes(), vec!["inbox"]);

    router.purge_routes();
    assert!(router.tracked_routes().is_empty());
    assert!(router.notify_routes().is_empty());

    router.execute_route("#/inbox");
    assert!(!*fired.borrow());
}

#[rstest]
#[case("mail/inbox", true, false, true)]
#[case("mail", false, false, true)]
#[case("mail", true, false, false)]
#[case("sent,mail/inbox", true, false, true)]
#[case("sent,drafts", false, false, false)]
// Query-aware affiliation requires the declared query to match.
#[case("mail/inbox?lang=en", true, true, true)]
#[case("mail/inbox?lang=fr", true, true, false)]
#[case("", false, false, false)]
fn path_matches_checks_alternates_against_current_path(
    #[case] spec: &str,
    #[case] exact: bool,
    #[case] query: bool,
    #[case] expected: bool,
) {
    let mut router = activated_router();
    router.route("mail/inbox", |_, _| {});
    router.execute_route("#/mail/inbox?lang=en");

    assert_eq!(router.path_matches(spec, exact, query), expected);
}

#[test]
fn titles_follow_the_lexicon() {
    let mut router = Router::new().with_lexicon(lexicon());
    router.activate("", Activation::new());
    router.route("user/:id", |_, _| {});
    router.route("user", |_, _| {});

    router.execute_route("#/user");
    assert_eq!(router.document_title(), "All Users - Users - Notes");

    router.execute_route("#/nonexistent");
    assert_eq!(router.document_title(), "Not Found - Notes");
    assert_eq!(
        router.error_message("not_found"),
        "That page does not exist"
    );
}

#[test]
fn hold_until_queues_navigation_until_ready() {
    let gate = Rc::new(RefCell::new(false));

    let mut router = Router::new();
    let check = gate.clone();
    router.activate(
        "",
        Activation::new().with_hold_until(move || *check.borrow()),
    );

    let fired = Rc::new(RefCell::new(false));
    let flag = fired.clone();
    router.route("inbox", move |_, _| *flag.borrow_mut() = true);

    router.execute_route("#/inbox");
    assert!(!*fired.borrow());
    assert!(!router.try_ready());

    *gate.borrow_mut() = true;
    assert!(router.try_ready());
    assert!(*fired.borrow());
}

#[test]
fn activate_navigates_to_start_route_on_empty_path() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());

    router.activate("", Activation::new().with_start("/inbox"));

    assert_eq!(history.entries(), vec!["/inbox/"]);
}

#[test]
fn activate_keeps_initial_query_on_start_route() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());

    router.activate("#/?lang=en", Activation::new().with_start("/inbox"));

    assert_eq!(history.entries(), vec!["/inbox/?lang=en"]);
}

#[test]
fn activate_is_idempotent() {
    let history = MemoryHistory::new();
    let mut router = Router::new().with_history(history.clone());

    router.activate("", Activation::new().with_start("/inbox"));
    router.activate("", Activation::new().with_start("/other"));

    assert_eq!(history.entries(), vec!["/inbox/"]);
}

#[test]
fn static_mode_routes_from_the_query_string() {
    let mut router = Router::new();

    let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    router.route("?view=:name", move |caps, _| {
        *sink.borrow_mut() = caps.get("name").map(String::from);
    });

    router.activate_static("?view=reports", Activation::new());

    assert_eq!(seen.borrow().as_deref(), Some("reports"));
}

#[test]
fn reload_replays_the_full_path() {
    let mut router = activated_router();

    let count = Rc::new(RefCell::new(0usize));
    let counter = count.clone();
    router.route("user/:id", move |_, _| *counter.borrow_mut() += 1);

    router.execute_route("#/user/42");
    router.reload();

    assert_eq!(*count.borrow(), 2);
}
