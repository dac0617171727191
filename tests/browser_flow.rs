//! End-to-end browser flows driven headlessly through mock I/O streams and a
//! scripted catalog.

use cinescope::browser::io::{MockEventStream, MockRenderStream};
use cinescope::browser::{Completion, Focus, Track};
use cinescope::catalog::mock::{sample_detail, sample_item, sample_page};
use cinescope::catalog::{CatalogClient, ImageResolver, MockCatalog, SearchPage};
use cinescope::{AppController, ViewModel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

type TestController = AppController<MockEventStream, MockRenderStream>;

fn start(catalog: &Arc<MockCatalog>) -> (TestController, MockRenderStream) {
    let client: Arc<dyn CatalogClient> = Arc::clone(catalog) as Arc<dyn CatalogClient>;
    let view_model = ViewModel::new(client, ImageResolver::default());
    let stream = MockRenderStream::with_size((100, 30));
    let mut controller =
        AppController::with_io_streams(view_model, MockEventStream::empty(), stream.clone())
            .expect("controller");
    controller.render_full().expect("initial render");
    (controller, stream)
}

fn press(controller: &mut TestController, code: KeyCode) {
    controller
        .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .expect("key handled");
}

fn type_text(controller: &mut TestController, text: &str) {
    for ch in text.chars() {
        press(controller, KeyCode::Char(ch));
    }
}

fn batman_catalog() -> MockCatalog {
    MockCatalog::new()
        .with_search_page(
            "batman",
            sample_page(vec![
                sample_item(268, "Batman"),
                sample_item(272, "Batman Begins"),
                sample_item(155, "The Dark Knight"),
            ]),
        )
        .with_detail(sample_detail(272, "Batman Begins"))
}

#[tokio::test]
async fn search_select_and_close_detail() {
    let catalog = Arc::new(batman_catalog());
    let (mut controller, stream) = start(&catalog);

    type_text(&mut controller, "batman");
    press(&mut controller, KeyCode::Enter);
    assert_eq!(
        controller.wait_for_catalog().await.unwrap(),
        Some(Completion::Applied(Track::Search))
    );

    let output = stream.get_all_output();
    assert!(output.contains("Found 3 movies."));
    assert!(output.contains("The Dark Knight"));
    assert_eq!(controller.view_model().focus(), Focus::Grid);

    press(&mut controller, KeyCode::Right);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.view_model().focus(), Focus::Overlay);
    controller.wait_for_catalog().await.unwrap();

    let state = controller.view_model().state();
    assert_eq!(state.detail().map(|d| d.id()), Some(272));
    assert!(stream.get_all_output().contains("Runtime: 2h 19m"));

    press(&mut controller, KeyCode::Esc);
    assert!(!controller.view_model().state().is_overlay_open());
    assert_eq!(controller.view_model().focus(), Focus::Grid);
    assert_eq!(catalog.search_calls(), 1);
    assert_eq!(catalog.detail_calls(), 1);
}

#[tokio::test]
async fn slower_earlier_search_never_overwrites_newer_results() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_search_page("alien", sample_page(vec![sample_item(348, "Alien")]))
            .with_search_page(
                "aliens",
                sample_page(vec![sample_item(679, "Aliens"), sample_item(8077, "Alien³")]),
            ),
    );
    catalog.gate_search("alien");
    let (mut controller, _stream) = start(&catalog);

    type_text(&mut controller, "alien");
    press(&mut controller, KeyCode::Enter);
    press(&mut controller, KeyCode::Char('/'));
    type_text(&mut controller, "aliens");
    press(&mut controller, KeyCode::Enter);

    assert_eq!(
        controller.wait_for_catalog().await.unwrap(),
        Some(Completion::Applied(Track::Search))
    );
    catalog.release_search("alien");
    assert_eq!(
        controller.wait_for_catalog().await.unwrap(),
        Some(Completion::Stale(Track::Search))
    );

    let state = controller.view_model().state();
    assert_eq!(state.current_query(), Some("aliens"));
    let titles: Vec<&str> = state.results().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Aliens", "Alien³"]);
}

#[tokio::test]
async fn blank_and_fruitless_searches_raise_notices() {
    let catalog = Arc::new(MockCatalog::new());
    let (mut controller, stream) = start(&catalog);

    type_text(&mut controller, "  ");
    press(&mut controller, KeyCode::Enter);
    assert_eq!(catalog.search_calls(), 0);
    assert!(stream
        .get_all_output()
        .contains("Please enter your search query."));

    for _ in 0..2 {
        press(&mut controller, KeyCode::Backspace);
    }
    type_text(&mut controller, "zzzznotfound");
    press(&mut controller, KeyCode::Enter);
    controller.wait_for_catalog().await.unwrap();

    assert!(controller.view_model().state().results().is_empty());
    assert!(stream
        .get_all_output()
        .contains("No movies found for your request: \"zzzznotfound\""));
}

#[tokio::test]
async fn paging_replaces_the_result_set() {
    let first = SearchPage {
        page: 1,
        results: vec![sample_item(1, "Heat")],
        total_pages: 2,
        total_results: 2,
    };
    let second = SearchPage {
        page: 2,
        results: vec![sample_item(2, "Heat 2")],
        total_pages: 2,
        total_results: 2,
    };
    let catalog = Arc::new(
        MockCatalog::new()
            .with_search_page("heat", first)
            .with_search_page("heat", second),
    );
    let (mut controller, stream) = start(&catalog);

    type_text(&mut controller, "heat");
    press(&mut controller, KeyCode::Enter);
    controller.wait_for_catalog().await.unwrap();
    assert!(stream.get_all_output().contains("Page 1 of 2 (2 total)"));

    press(&mut controller, KeyCode::Char('n'));
    controller.wait_for_catalog().await.unwrap();

    let state = controller.view_model().state();
    let ids: Vec<u64> = state.results().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2]);
    assert_eq!(
        catalog.searched(),
        vec![("heat".to_string(), 1), ("heat".to_string(), 2)]
    );

    // Already on the last page
    press(&mut controller, KeyCode::Char('n'));
    assert_eq!(catalog.search_calls(), 2);
}

#[tokio::test]
async fn failed_detail_can_be_dismissed() {
    let catalog = Arc::new(
        MockCatalog::new().with_search_page("up", sample_page(vec![sample_item(14160, "Up")])),
    );
    let (mut controller, stream) = start(&catalog);

    type_text(&mut controller, "up");
    press(&mut controller, KeyCode::Enter);
    controller.wait_for_catalog().await.unwrap();
    press(&mut controller, KeyCode::Enter);
    controller.wait_for_catalog().await.unwrap();

    assert_eq!(
        controller.view_model().state().detail_error(),
        Some("Failed to load movie details.")
    );
    assert!(stream.get_all_output().contains("Failed to load movie details."));

    press(&mut controller, KeyCode::Char('x'));
    let state = controller.view_model().state();
    assert!(!state.is_overlay_open());
    assert_eq!(state.results().len(), 1);
    assert!(controller.view_model().status_line().notice().is_none());
}

#[tokio::test]
async fn ctrl_c_quits_from_search_bar() {
    let catalog = Arc::new(MockCatalog::new());
    let (mut controller, _stream) = start(&catalog);

    type_text(&mut controller, "q");
    assert!(!controller.should_quit());

    controller
        .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        .unwrap();
    assert!(controller.should_quit());
}

#[tokio::test]
async fn waiting_with_nothing_in_flight_returns_immediately() {
    let catalog = Arc::new(batman_catalog());
    let (mut controller, _stream) = start(&catalog);
    let idle = std::time::Duration::from_secs(2);

    let fresh = tokio::time::timeout(idle, controller.wait_for_catalog())
        .await
        .expect("idle wait returned");
    assert_eq!(fresh.unwrap(), None);

    type_text(&mut controller, "batman");
    press(&mut controller, KeyCode::Enter);
    controller.wait_for_catalog().await.unwrap();
    let drained = tokio::time::timeout(idle, controller.wait_for_catalog())
        .await
        .expect("drained wait returned");
    assert_eq!(drained.unwrap(), None);
}
